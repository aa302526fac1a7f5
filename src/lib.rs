//! Typed Rust client for the Alibaba Cloud SMS (Dysmsapi) API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! wire-format details, and a small client layer orchestrating requests. Request
//! signing stays outside: plug a [`RequestSigner`] into [`HttpTransport`], or
//! bring your own [`SignedTransport`].
//!
//! ```rust,no_run
//! use dysms::{
//!     Credentials, HttpTransport, RawPhoneNumber, SendSms, SignName, SignerError, SmsClient,
//!     TemplateCode, TemplateParam,
//! };
//!
//! fn sign(
//!     _credentials: &Credentials,
//!     _method: &str,
//!     params: Vec<(String, String)>,
//! ) -> Result<Vec<(String, String)>, SignerError> {
//!     // Delegate to your signing library here.
//!     Ok(params)
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SmsClient::new(Credentials::from_env()?, HttpTransport::new(sign)?);
//!     let request = SendSms::new(
//!         SignName::new("SignCo")?,
//!         TemplateCode::new("SMS_0001")?,
//!         RawPhoneNumber::new("13800000000")?,
//!     )
//!     .with_template_param(TemplateParam::new().with("code", "1234"));
//!
//!     let outcome = client.send_sms(request).await?;
//!     println!("{}", outcome.to_json_string()?);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    API_VERSION, AcsRequest, BoxFuture, Credentials, Endpoint, HttpTransport,
    HttpTransportBuilder, RequestSigner, SignedTransport, SignerError, SmsClient, SmsError,
    TransportError,
};
pub use domain::{
    AccessKeyId, AccessKeySecret, AcsResponse, BizId, CurrentPage, DeliveryStatus, Envelope,
    OutId, Outcome, PageSize, PhoneNumber, PhoneNumbers, QuerySendDetails, RawPhoneNumber,
    SUCCESS_CODE, SUCCESS_MESSAGE, SendBatchSms, SendDate, SendDetail, SendSms, SignName,
    SmsUpExtendCode, TemplateCode, TemplateParam, ValidationError, normalize_response,
};
