//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod http;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, warn};

pub use http::{Endpoint, HttpTransport, HttpTransportBuilder, RequestSigner, SignerError};

use crate::domain::{
    AccessKeyId, AccessKeySecret, AcsResponse, Outcome, QuerySendDetails, SendBatchSms, SendSms,
    ValidationError,
};
use crate::transport::{
    QUERY_SEND_DETAILS_ACTION, SEND_BATCH_SMS_ACTION, SEND_SMS_ACTION,
    encode_query_send_details_params, encode_send_batch_sms_params, encode_send_sms_params,
};

/// Dysmsapi version every request is sent with.
pub const API_VERSION: &str = "2017-05-25";

const ACCESS_KEY_ID_ENV: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
const ACCESS_KEY_SECRET_ENV: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One unsigned RPC-style request: action name, API version, action parameters.
pub struct AcsRequest {
    action: &'static str,
    version: &'static str,
    params: Vec<(String, String)>,
}

impl AcsRequest {
    pub fn new(action: &'static str, params: Vec<(String, String)>) -> Self {
        Self {
            action,
            version: API_VERSION,
            params,
        }
    }

    pub fn action(&self) -> &'static str {
        self.action
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn into_params(self) -> Vec<(String, String)> {
        self.params
    }
}

/// Signed-request collaborator: signs, sends, and decodes one request.
///
/// Implementations own signing, host resolution, retries, and timeouts.
/// [`HttpTransport`] is the bundled implementation.
pub trait SignedTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        credentials: &'a Credentials,
        request: AcsRequest,
    ) -> BoxFuture<'a, Result<AcsResponse, TransportError>>;
}

#[derive(Debug, Clone)]
/// Access key pair used to sign every request.
///
/// Both parts are validated once at construction; the secret is redacted in `Debug`.
pub struct Credentials {
    access_key_id: AccessKeyId,
    access_key_secret: AccessKeySecret,
}

impl Credentials {
    /// Validate both parts. Fails with [`SmsError::InvalidCredentials`] naming the
    /// first empty one.
    pub fn new(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Result<Self, SmsError> {
        let access_key_id =
            AccessKeyId::new(access_key_id).map_err(|_| SmsError::InvalidCredentials {
                field: AccessKeyId::FIELD,
            })?;
        let access_key_secret =
            AccessKeySecret::new(access_key_secret).map_err(|_| SmsError::InvalidCredentials {
                field: AccessKeySecret::FIELD,
            })?;
        Ok(Self {
            access_key_id,
            access_key_secret,
        })
    }

    /// Read `ALIBABA_CLOUD_ACCESS_KEY_ID` and `ALIBABA_CLOUD_ACCESS_KEY_SECRET`.
    ///
    /// A missing variable is treated like an empty one.
    pub fn from_env() -> Result<Self, SmsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SmsError> {
        let access_key_id = lookup(ACCESS_KEY_ID_ENV).unwrap_or_default();
        let access_key_secret = lookup(ACCESS_KEY_SECRET_ENV).unwrap_or_default();
        Self::new(access_key_id, access_key_secret)
    }

    pub fn access_key_id(&self) -> &AccessKeyId {
        &self.access_key_id
    }

    pub fn access_key_secret(&self) -> &AccessKeySecret {
        &self.access_key_secret
    }
}

#[derive(Debug, thiserror::Error)]
/// Failures surfaced by a [`SignedTransport`].
///
/// [`SmsClient`] passes these through untouched.
pub enum TransportError {
    /// The provider rejected the request and said why.
    #[error("provider error {code}: {message}")]
    Provider {
        http_status: Option<u16>,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// Non-successful HTTP status without a recognizable provider error body.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// HTTP client failure (DNS, TLS, timeouts, etc).
    #[error("http error: {0}")]
    Http(#[source] Box<dyn StdError + Send + Sync>),

    /// The request signer failed.
    #[error("signing error: {0}")]
    Sign(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsClient`] and its configuration types.
pub enum SmsError {
    /// `AccessKeyId` or `AccessKeySecret` was empty.
    #[error("invalid credentials: {field} must not be empty")]
    InvalidCredentials { field: &'static str },

    /// The configured endpoint does not form a valid URL.
    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A JSON-valued request parameter could not be serialized.
    #[error("could not encode request parameter: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Clone)]
/// Alibaba Cloud SMS client.
///
/// Builds `SendSms`, `SendBatchSms` and `QuerySendDetails` requests, runs each one
/// through the injected [`SignedTransport`] exactly once, and normalizes send
/// responses into an [`Outcome`]. Query responses are returned as received.
pub struct SmsClient {
    credentials: Credentials,
    transport: Arc<dyn SignedTransport>,
}

impl SmsClient {
    pub fn new(credentials: Credentials, transport: impl SignedTransport + 'static) -> Self {
        Self {
            credentials,
            transport: Arc::new(transport),
        }
    }

    /// Validate the key pair and bind it to `transport`.
    pub fn from_keys(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
        transport: impl SignedTransport + 'static,
    ) -> Result<Self, SmsError> {
        let credentials = Credentials::new(access_key_id, access_key_secret)?;
        Ok(Self::new(credentials, transport))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send one templated message to one or more numbers.
    ///
    /// Returns [`Outcome::Success`] when the provider answers with a `Message` and
    /// `Code == "OK"`, and [`Outcome::Provider`] with the untouched response
    /// otherwise. Transport failures are returned as [`SmsError::Transport`].
    pub async fn send_sms(&self, request: SendSms) -> Result<Outcome, SmsError> {
        let params = encode_send_sms_params(&request)?;
        let response = self
            .execute(AcsRequest::new(SEND_SMS_ACTION, params))
            .await?;
        Ok(send_outcome(SEND_SMS_ACTION, response))
    }

    /// Send per-number sign names and template params in one call.
    ///
    /// Same outcome rule as [`SmsClient::send_sms`]. The provider caps a batch at
    /// 100 numbers; larger batches are rejected by the provider, not split here.
    pub async fn send_batch_sms(&self, request: SendBatchSms) -> Result<Outcome, SmsError> {
        let params = encode_send_batch_sms_params(&request)?;
        let response = self
            .execute(AcsRequest::new(SEND_BATCH_SMS_ACTION, params))
            .await?;
        Ok(send_outcome(SEND_BATCH_SMS_ACTION, response))
    }

    /// Fetch delivery records for one number on one day.
    ///
    /// The response is returned exactly as the transport produced it, including
    /// paging metadata, whatever its `Code`.
    pub async fn query_details(
        &self,
        request: QuerySendDetails,
    ) -> Result<AcsResponse, SmsError> {
        let params = encode_query_send_details_params(&request);
        self.execute(AcsRequest::new(QUERY_SEND_DETAILS_ACTION, params))
            .await
    }

    async fn execute(&self, request: AcsRequest) -> Result<AcsResponse, SmsError> {
        debug!(action = request.action(), "executing request");
        self.transport
            .execute(&self.credentials, request)
            .await
            .map_err(SmsError::Transport)
    }
}

fn send_outcome(action: &'static str, response: AcsResponse) -> Outcome {
    let outcome = Outcome::from_response(response);
    if !outcome.is_success() {
        warn!(
            action,
            code = outcome.provider_code().unwrap_or("<missing>"),
            "send was not accepted"
        );
    }
    outcome
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{Map, Value, json};

    use crate::domain::{
        QuerySendDetails, RawPhoneNumber, SendBatchSms, SendDate, SendSms, SignName,
        TemplateCode, TemplateParam,
    };

    use super::*;

    const _: () = {
        const fn assert_send_sync<T: Send + Sync>() {}
        let _ = assert_send_sync::<SmsClient>;
        let _ = assert_send_sync::<SmsError>;
    };

    #[derive(Debug, Clone)]
    enum FakeReply {
        Body(Map<String, Value>),
        Reject { code: String, message: String },
    }

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        calls: usize,
        last_key_id: Option<String>,
        last_request: Option<AcsRequest>,
        reply: FakeReply,
    }

    impl FakeTransport {
        fn replying(body: Value) -> Self {
            let Value::Object(map) = body else {
                panic!("fake reply must be a JSON object");
            };
            Self::new(FakeReply::Body(map))
        }

        fn rejecting(code: &str, message: &str) -> Self {
            Self::new(FakeReply::Reject {
                code: code.to_owned(),
                message: message.to_owned(),
            })
        }

        fn new(reply: FakeReply) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    calls: 0,
                    last_key_id: None,
                    last_request: None,
                    reply,
                })),
            }
        }

        fn last_request(&self) -> AcsRequest {
            self.state.lock().unwrap().last_request.clone().unwrap()
        }

        fn calls(&self) -> usize {
            self.state.lock().unwrap().calls
        }
    }

    impl SignedTransport for FakeTransport {
        fn execute<'a>(
            &'a self,
            credentials: &'a Credentials,
            request: AcsRequest,
        ) -> BoxFuture<'a, Result<AcsResponse, TransportError>> {
            Box::pin(async move {
                let reply = {
                    let mut state = self.state.lock().unwrap();
                    state.calls += 1;
                    state.last_key_id = Some(credentials.access_key_id().as_str().to_owned());
                    state.last_request = Some(request);
                    state.reply.clone()
                };
                match reply {
                    FakeReply::Body(map) => Ok(AcsResponse::from(map)),
                    FakeReply::Reject { code, message } => Err(TransportError::Provider {
                        http_status: Some(400),
                        code,
                        message,
                        request_id: Some("req-1".to_owned()),
                    }),
                }
            })
        }
    }

    fn make_client(transport: FakeTransport) -> SmsClient {
        SmsClient::from_keys("test_id", "test_secret", transport).unwrap()
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn verification_sms() -> SendSms {
        SendSms::new(
            SignName::new("SignCo").unwrap(),
            TemplateCode::new("SMS_0001").unwrap(),
            RawPhoneNumber::new("13800000000").unwrap(),
        )
        .with_template_param(TemplateParam::new().with("code", "1234"))
    }

    fn batch_sms() -> SendBatchSms {
        SendBatchSms::new(
            vec![SignName::new("阿里云").unwrap()],
            TemplateCode::new("SMS_0002").unwrap(),
            vec![
                RawPhoneNumber::new("13800000000").unwrap(),
                RawPhoneNumber::new("13900000000").unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn empty_credentials_are_rejected_whatever_the_other_part() {
        for other in ["", "  ", "value"] {
            let err = Credentials::new("", other).unwrap_err();
            assert!(matches!(
                err,
                SmsError::InvalidCredentials {
                    field: "AccessKeyId"
                }
            ));
        }
        for id in ["id", "another-id"] {
            let err = SmsClient::from_keys(id, "", FakeTransport::rejecting("x", "y"))
                .err()
                .unwrap();
            assert!(matches!(
                err,
                SmsError::InvalidCredentials {
                    field: "AccessKeySecret"
                }
            ));
        }
    }

    #[test]
    fn missing_env_variables_are_invalid_credentials() {
        let err = Credentials::from_lookup(|name| {
            (name == "ALIBABA_CLOUD_ACCESS_KEY_SECRET").then(|| "secret".to_owned())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            SmsError::InvalidCredentials {
                field: "AccessKeyId"
            }
        ));

        let err = Credentials::from_lookup(|name| {
            (name == "ALIBABA_CLOUD_ACCESS_KEY_ID").then(|| "id".to_owned())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            SmsError::InvalidCredentials {
                field: "AccessKeySecret"
            }
        ));

        let credentials = Credentials::from_lookup(|name| match name {
            "ALIBABA_CLOUD_ACCESS_KEY_ID" => Some("id".to_owned()),
            "ALIBABA_CLOUD_ACCESS_KEY_SECRET" => Some("secret".to_owned()),
            _ => None,
        })
        .unwrap();
        assert_eq!(credentials.access_key_id().as_str(), "id");
        assert_eq!(credentials.access_key_secret().expose(), "secret");
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let credentials = Credentials::new("id", "very-secret").unwrap();
        let debug = format!("{credentials:?}");
        assert!(debug.contains("id"));
        assert!(!debug.contains("very-secret"));
    }

    #[tokio::test]
    async fn send_sms_ok_response_becomes_envelope() {
        let transport = FakeTransport::replying(json!({
            "Code": "OK",
            "Message": "OK",
            "RequestId": "r1",
            "BizId": "b1"
        }));
        let client = make_client(transport.clone());

        let outcome = client.send_sms(verification_sms()).await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(
            outcome.to_json_string().unwrap(),
            r#"{"code":200,"message":"验证码发送成功"}"#
        );

        let request = transport.last_request();
        assert_eq!(request.action(), "SendSms");
        assert_eq!(request.version(), "2017-05-25");
        assert_param(request.params(), "PhoneNumbers", "13800000000");
        assert_param(request.params(), "SignName", "SignCo");
        assert_param(request.params(), "TemplateCode", "SMS_0001");
        assert_param(request.params(), "TemplateParam", r#"{"code":"1234"}"#);
        assert_eq!(
            transport.state.lock().unwrap().last_key_id.as_deref(),
            Some("test_id")
        );
    }

    #[tokio::test]
    async fn send_sms_business_error_is_passed_through() {
        let body = json!({
            "Code": "isv.BUSINESS_LIMIT_CONTROL",
            "Message": "触发分钟级流控"
        });
        let client = make_client(FakeTransport::replying(body.clone()));

        let outcome = client.send_sms(verification_sms()).await.unwrap();
        assert!(!outcome.is_success());
        assert_eq!(serde_json::to_value(&outcome).unwrap(), body);
    }

    #[tokio::test]
    async fn send_sms_transport_failure_propagates() {
        let transport = FakeTransport::rejecting("SignatureDoesNotMatch", "bad signature");
        let client = make_client(transport.clone());

        let err = client.send_sms(verification_sms()).await.unwrap_err();
        match err {
            SmsError::Transport(TransportError::Provider { code, message, .. }) => {
                assert_eq!(code, "SignatureDoesNotMatch");
                assert_eq!(message, "bad signature");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn send_batch_sms_encodes_json_lists_and_normalizes() {
        let transport = FakeTransport::replying(json!({
            "Code": "OK",
            "Message": "OK",
            "RequestId": "r2",
            "BizId": "b2"
        }));
        let client = make_client(transport.clone());

        let outcome = client.send_batch_sms(batch_sms()).await.unwrap();
        assert!(outcome.is_success());

        let request = transport.last_request();
        assert_eq!(request.action(), "SendBatchSms");
        assert_param(
            request.params(),
            "PhoneNumberJson",
            r#"["13800000000","13900000000"]"#,
        );
        assert_param(request.params(), "SignNameJson", r#"["阿里云"]"#);
        assert!(!request.params().iter().any(|(k, _)| k == "TemplateParamJson"));
    }

    #[tokio::test]
    async fn send_batch_sms_error_is_passed_through() {
        let body = json!({
            "Code": "isv.MOBILE_COUNT_OVER_LIMIT",
            "Message": "手机号码数量超过限制",
            "RequestId": "r3"
        });
        let client = make_client(FakeTransport::replying(body.clone()));

        let outcome = client.send_batch_sms(batch_sms()).await.unwrap();
        assert_eq!(serde_json::to_value(&outcome).unwrap(), body);
    }

    #[tokio::test]
    async fn query_details_returns_raw_response_even_when_ok() {
        let body = json!({
            "Code": "OK",
            "Message": "OK",
            "RequestId": "r4",
            "TotalCount": 1,
            "SmsSendDetailDTOs": {
                "SmsSendDetailDTO": [{
                    "PhoneNum": "13800000000",
                    "SendStatus": 3,
                    "ErrCode": "DELIVERED"
                }]
            }
        });
        let transport = FakeTransport::replying(body.clone());
        let client = make_client(transport.clone());

        let request = QuerySendDetails::new(
            RawPhoneNumber::new("13800000000").unwrap(),
            SendDate::new("20240301").unwrap(),
        );
        let response = client.query_details(request).await.unwrap();
        assert_eq!(serde_json::to_value(&response).unwrap(), body);
        assert_eq!(response.send_details().unwrap().len(), 1);

        let request = transport.last_request();
        assert_eq!(request.action(), "QuerySendDetails");
        assert_param(request.params(), "SendDate", "20240301");
        assert_param(request.params(), "PageSize", "10");
        assert_param(request.params(), "CurrentPage", "1");
    }

    #[tokio::test]
    async fn query_details_transport_failure_propagates() {
        let client = make_client(FakeTransport::rejecting("Throttling.User", "slow down"));
        let request = QuerySendDetails::new(
            RawPhoneNumber::new("13800000000").unwrap(),
            SendDate::new("20240301").unwrap(),
        );
        let err = client.query_details(request).await.unwrap_err();
        assert!(matches!(
            err,
            SmsError::Transport(TransportError::Provider { .. })
        ));
    }
}
