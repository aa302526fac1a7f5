mod common;

use dysms::{
    Credentials, HttpTransport, RawPhoneNumber, SendBatchSms, SignName, SmsClient, TemplateCode,
    TemplateParam,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let sign_name = common::required_env("DYSMS_SIGN_NAME")?;
    let template_code = common::required_env("DYSMS_TEMPLATE_CODE")?;
    // Comma-separated, e.g. "13800000000,13900000000".
    let phones_raw = common::required_env("DYSMS_PHONES")?;

    let phones = phones_raw
        .split(',')
        .map(RawPhoneNumber::new)
        .collect::<Result<Vec<_>, _>>()?;
    let sign_names = vec![SignName::new(sign_name)?; phones.len()];
    let template_params = (0..phones.len())
        .map(|i| TemplateParam::new().with("code", format!("{:04}", 1000 + i)))
        .collect();

    let client = SmsClient::new(
        Credentials::from_env()?,
        HttpTransport::new(common::unsigned)?,
    );
    let request = SendBatchSms::new(sign_names, TemplateCode::new(template_code)?, phones)?
        .with_template_params(template_params);

    let outcome = client.send_batch_sms(request).await?;
    println!("{}", outcome.to_json_string()?);

    Ok(())
}
