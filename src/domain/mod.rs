//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{QuerySendDetails, SEND_BATCH_SMS_MAX_RECIPIENTS, SendBatchSms, SendSms};
pub use response::{
    AcsResponse, DeliveryStatus, Envelope, Outcome, SUCCESS_CODE, SUCCESS_MESSAGE, SendDetail,
    normalize_response,
};
pub use validation::ValidationError;
pub use value::{
    AccessKeyId, AccessKeySecret, BizId, CurrentPage, OutId, PageSize, PhoneNumber,
    PhoneNumbers, RawPhoneNumber, SendDate, SignName, SmsUpExtendCode, TemplateCode,
    TemplateParam,
};
