use crate::domain::{
    OutId, PhoneNumbers, SendSms, SignName, SmsUpExtendCode, TemplateCode, TemplateParam,
};

pub const SEND_SMS_ACTION: &str = "SendSms";

pub fn encode_send_sms_params(
    request: &SendSms,
) -> Result<Vec<(String, String)>, serde_json::Error> {
    let mut params = vec![
        (
            PhoneNumbers::FIELD.to_owned(),
            request.phone_numbers().joined(),
        ),
        (
            SignName::FIELD.to_owned(),
            request.sign_name().as_str().to_owned(),
        ),
        (
            TemplateCode::FIELD.to_owned(),
            request.template_code().as_str().to_owned(),
        ),
    ];

    // An empty mapping is treated like an absent one.
    if let Some(template_param) = request.template_param().filter(|it| !it.is_empty()) {
        params.push((
            TemplateParam::FIELD.to_owned(),
            serde_json::to_string(template_param)?,
        ));
    }
    if let Some(out_id) = request.out_id() {
        params.push((OutId::FIELD.to_owned(), out_id.as_str().to_owned()));
    }
    if let Some(code) = request.sms_up_extend_code() {
        params.push((SmsUpExtendCode::FIELD.to_owned(), code.as_str().to_owned()));
    }

    Ok(params)
}
