use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `Code` value the provider uses for an accepted request.
pub const SUCCESS_CODE: &str = "OK";

/// Fixed message carried by the success [`Envelope`].
pub const SUCCESS_MESSAGE: &str = "验证码发送成功";

const CODE_FIELD: &str = "Code";
const MESSAGE_FIELD: &str = "Message";
const REQUEST_ID_FIELD: &str = "RequestId";
const BIZ_ID_FIELD: &str = "BizId";
const TOTAL_COUNT_FIELD: &str = "TotalCount";
const DETAILS_FIELD: &str = "SmsSendDetailDTOs";
const DETAIL_FIELD: &str = "SmsSendDetailDTO";

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
/// Provider response as returned by a signed-request transport.
///
/// Holds the top-level JSON object exactly as received (field names, casing, and
/// order preserved). Accessors read well-known fields without consuming them.
pub struct AcsResponse(Map<String, Value>);

impl AcsResponse {
    /// Provider result code (`Code`), when present as a string.
    pub fn code(&self) -> Option<&str> {
        self.str_field(CODE_FIELD)
    }

    /// Provider message (`Message`), when present as a string.
    pub fn message(&self) -> Option<&str> {
        self.str_field(MESSAGE_FIELD)
    }

    /// `true` if a `Message` field exists at all (any JSON type).
    pub fn has_message(&self) -> bool {
        self.0.contains_key(MESSAGE_FIELD)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.str_field(REQUEST_ID_FIELD)
    }

    /// Send id (`BizId`) returned by `SendSms` / `SendBatchSms`.
    pub fn biz_id(&self) -> Option<&str> {
        self.str_field(BIZ_ID_FIELD)
    }

    /// `true` when the provider accepted the request: a `Message` is present and
    /// `Code == "OK"`.
    pub fn is_ok(&self) -> bool {
        self.has_message() && self.code() == Some(SUCCESS_CODE)
    }

    /// Total number of records matching a `QuerySendDetails` call.
    ///
    /// The provider has sent this both as a number and as a string.
    pub fn total_count(&self) -> Option<u64> {
        match self.0.get(TOTAL_COUNT_FIELD)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Typed view over the delivery records of a `QuerySendDetails` response.
    ///
    /// Returns an empty list if the response carries no records.
    pub fn send_details(&self) -> Result<Vec<SendDetail>, serde_json::Error> {
        let records = self
            .0
            .get(DETAILS_FIELD)
            .and_then(|dtos| dtos.get(DETAIL_FIELD));
        match records {
            Some(records) => serde_json::from_value(records.clone()),
            None => Ok(Vec::new()),
        }
    }

    /// Look up any top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for AcsResponse {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Flatten a provider response into a plain JSON map.
///
/// No key is renamed, added or dropped. Applying it to a response built from an
/// existing map yields that map again.
pub fn normalize_response(raw: AcsResponse) -> Map<String, Value> {
    raw.into_map()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Normalized success shape: `{"code": 200, "message": "..."}`.
pub struct Envelope {
    pub code: u16,
    pub message: String,
}

impl Envelope {
    pub const SUCCESS_CODE: u16 = 200;

    pub fn success() -> Self {
        Self {
            code: Self::SUCCESS_CODE,
            message: SUCCESS_MESSAGE.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
/// Result of a send call that reached the provider.
///
/// Accepted sends collapse into [`Envelope`]. Anything else is handed back as the
/// provider sent it, so callers keep the full error code taxonomy.
pub enum Outcome {
    Success(Envelope),
    Provider(Map<String, Value>),
}

impl Outcome {
    /// Apply the success rule (`Message` present and `Code == "OK"`).
    pub fn from_response(response: AcsResponse) -> Self {
        if response.is_ok() {
            Self::Success(Envelope::success())
        } else {
            Self::Provider(normalize_response(response))
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Provider `Code` of a non-success outcome.
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Provider(map) => map.get(CODE_FIELD).and_then(Value::as_str),
        }
    }

    /// JSON string form of the outcome.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Waiting,
    Failed,
    Delivered,
    Unknown(i64),
}

impl DeliveryStatus {
    fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Waiting,
            2 => Self::Failed,
            3 => Self::Delivered,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
/// One delivery record (`SmsSendDetailDTO`) from `QuerySendDetails`.
pub struct SendDetail {
    pub phone_num: String,
    pub send_status: i64,
    #[serde(default)]
    pub err_code: Option<String>,
    #[serde(default)]
    pub template_code: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub send_date: Option<String>,
    #[serde(default)]
    pub receive_date: Option<String>,
    #[serde(default)]
    pub out_id: Option<String>,
}

impl SendDetail {
    pub fn delivery_status(&self) -> DeliveryStatus {
        DeliveryStatus::from_code(self.send_status)
    }
}
