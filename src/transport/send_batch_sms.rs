use crate::domain::{SendBatchSms, TemplateCode};

pub const SEND_BATCH_SMS_ACTION: &str = "SendBatchSms";

const PHONE_NUMBER_JSON: &str = "PhoneNumberJson";
const SIGN_NAME_JSON: &str = "SignNameJson";
const TEMPLATE_PARAM_JSON: &str = "TemplateParamJson";
const SMS_UP_EXTEND_CODE_JSON: &str = "SmsUpExtendCodeJson";

/// List-valued fields go out as JSON arrays. `serde_json` writes non-ASCII text
/// literally, which keeps the signed payload byte-identical to what was built.
pub fn encode_send_batch_sms_params(
    request: &SendBatchSms,
) -> Result<Vec<(String, String)>, serde_json::Error> {
    let mut params = vec![
        (
            PHONE_NUMBER_JSON.to_owned(),
            serde_json::to_string(request.phone_numbers())?,
        ),
        (
            SIGN_NAME_JSON.to_owned(),
            serde_json::to_string(request.sign_names())?,
        ),
        (
            TemplateCode::FIELD.to_owned(),
            request.template_code().as_str().to_owned(),
        ),
    ];

    if let Some(template_params) = request.template_params() {
        params.push((
            TEMPLATE_PARAM_JSON.to_owned(),
            serde_json::to_string(template_params)?,
        ));
    }
    if let Some(codes) = request.sms_up_extend_codes() {
        params.push((
            SMS_UP_EXTEND_CODE_JSON.to_owned(),
            serde_json::to_string(codes)?,
        ));
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use crate::domain::{RawPhoneNumber, SignName, SmsUpExtendCode, TemplateParam};

    use super::*;

    fn request() -> SendBatchSms {
        SendBatchSms::new(
            vec![
                SignName::new("阿里云").unwrap(),
                SignName::new("SignCo").unwrap(),
            ],
            TemplateCode::new("SMS_0002").unwrap(),
            vec![
                RawPhoneNumber::new("13800000000").unwrap(),
                RawPhoneNumber::new("13900000000").unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn encode_lists_as_json_arrays_with_literal_unicode() {
        let request = request().with_template_params(vec![
            TemplateParam::new().with("name", "张三"),
            TemplateParam::new().with("name", "李四"),
        ]);
        let params = encode_send_batch_sms_params(&request).unwrap();

        assert_eq!(
            params,
            vec![
                (
                    "PhoneNumberJson".to_owned(),
                    r#"["13800000000","13900000000"]"#.to_owned()
                ),
                ("SignNameJson".to_owned(), r#"["阿里云","SignCo"]"#.to_owned()),
                ("TemplateCode".to_owned(), "SMS_0002".to_owned()),
                (
                    "TemplateParamJson".to_owned(),
                    r#"[{"name":"张三"},{"name":"李四"}]"#.to_owned()
                ),
            ]
        );
        assert!(params.iter().all(|(_, v)| !v.contains("\\u")));
    }

    #[test]
    fn optional_lists_are_omitted_when_absent() {
        let params = encode_send_batch_sms_params(&request()).unwrap();
        assert_eq!(params.len(), 3);
        assert!(!params.iter().any(|(k, _)| k == "TemplateParamJson"));
    }

    #[test]
    fn extend_codes_are_encoded_when_present() {
        let request = request().with_sms_up_extend_codes(vec![
            SmsUpExtendCode::new("90997").unwrap(),
            SmsUpExtendCode::new("90998").unwrap(),
        ]);
        let params = encode_send_batch_sms_params(&request).unwrap();
        assert!(params.contains(&(
            "SmsUpExtendCodeJson".to_owned(),
            r#"["90997","90998"]"#.to_owned()
        )));
    }
}
