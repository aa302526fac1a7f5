use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidSendDate { input: String },
    NotPositive { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidSendDate { input } => {
                write!(f, "invalid send date: {input} (expected YYYYMMDD)")
            }
            Self::NotPositive { field } => write!(f, "{field} must be a positive integer"),
        }
    }
}

impl std::error::Error for ValidationError {}
