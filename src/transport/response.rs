use serde::Deserialize;
use serde_json::Value;

use crate::domain::AcsResponse;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },
}

/// Error fields the provider puts in the body of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

pub fn decode_acs_response(json: &str) -> Result<AcsResponse, DecodeError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(AcsResponse::from(map)),
        other => Err(DecodeError::NotAnObject {
            kind: json_kind(&other),
        }),
    }
}

/// Best-effort decode of an error body. `None` if it carries no `Code`.
pub fn decode_provider_error(json: &str) -> Option<ProviderErrorBody> {
    serde_json::from_str(json).ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_keeps_every_field() {
        let json = r#"
        {
          "Message": "OK",
          "RequestId": "F655A8D5-B967-440B-8683-DAD6FF8DE990",
          "BizId": "900619746936498440^0",
          "Code": "OK",
          "Extra": { "Nested": [1, 2] }
        }
        "#;

        let response = decode_acs_response(json).unwrap();
        assert_eq!(response.code(), Some("OK"));
        assert_eq!(response.biz_id(), Some("900619746936498440^0"));
        assert_eq!(
            response.get("Extra"),
            Some(&serde_json::json!({ "Nested": [1, 2] }))
        );
        assert_eq!(
            response.as_map().keys().collect::<Vec<_>>(),
            vec!["Message", "RequestId", "BizId", "Code", "Extra"]
        );
    }

    #[test]
    fn decode_rejects_non_object_bodies() {
        assert!(matches!(
            decode_acs_response("[1, 2]"),
            Err(DecodeError::NotAnObject { kind: "array" })
        ));
        assert!(matches!(
            decode_acs_response("{ not json }"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn provider_error_body_is_read_when_present() {
        let json = r#"
        {
          "RequestId": "r1",
          "HostId": "dysmsapi.aliyuncs.com",
          "Code": "SignatureDoesNotMatch",
          "Message": "Specified signature is not matched with our calculation."
        }
        "#;
        let body = decode_provider_error(json).unwrap();
        assert_eq!(body.code, "SignatureDoesNotMatch");
        assert_eq!(body.request_id.as_deref(), Some("r1"));

        assert_eq!(decode_provider_error("<html>bad gateway</html>"), None);
        assert_eq!(decode_provider_error(r#"{"Message":"no code"}"#), None);
    }
}
