use std::io;

use dysms::{Credentials, SignerError};
use tracing_subscriber::EnvFilter;

/// Passes parameters through unsigned. Swap in a real signature-v1 signer
/// before pointing the demos at the live endpoint.
pub fn unsigned(
    _credentials: &Credentials,
    _method: &str,
    params: Vec<(String, String)>,
) -> Result<Vec<(String, String)>, SignerError> {
    Ok(params)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

pub fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}
