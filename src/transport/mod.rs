//! Transport layer: wire-format details (action parameters, response decoding).

mod query_send_details;
mod response;
mod send_batch_sms;
mod send_sms;

pub use query_send_details::{QUERY_SEND_DETAILS_ACTION, encode_query_send_details_params};
pub use response::{decode_acs_response, decode_provider_error};
pub use send_batch_sms::{SEND_BATCH_SMS_ACTION, encode_send_batch_sms_params};
pub use send_sms::{SEND_SMS_ACTION, encode_send_sms_params};
