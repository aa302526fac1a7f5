mod common;

use dysms::{
    Credentials, HttpTransport, RawPhoneNumber, SendSms, SignName, SmsClient, TemplateCode,
    TemplateParam,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let sign_name = common::required_env("DYSMS_SIGN_NAME")?;
    let template_code = common::required_env("DYSMS_TEMPLATE_CODE")?;
    let phone_raw = common::required_env("DYSMS_PHONE")?;
    let code = std::env::var("DYSMS_CODE").unwrap_or_else(|_| "1234".to_owned());

    let client = SmsClient::new(
        Credentials::from_env()?,
        HttpTransport::new(common::unsigned)?,
    );
    let request = SendSms::new(
        SignName::new(sign_name)?,
        TemplateCode::new(template_code)?,
        RawPhoneNumber::new(phone_raw)?,
    )
    .with_template_param(TemplateParam::new().with("code", code));

    let outcome = client.send_sms(request).await?;
    println!("{}", outcome.to_json_string()?);

    Ok(())
}
