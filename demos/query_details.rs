mod common;

use dysms::{
    BizId, Credentials, HttpTransport, PageSize, QuerySendDetails, RawPhoneNumber, SendDate,
    SmsClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let phone_raw = common::required_env("DYSMS_PHONE")?;
    // yyyyMMdd
    let send_date = common::required_env("DYSMS_SEND_DATE")?;

    let client = SmsClient::new(
        Credentials::from_env()?,
        HttpTransport::new(common::unsigned)?,
    );
    let mut request =
        QuerySendDetails::new(RawPhoneNumber::new(phone_raw)?, SendDate::new(send_date)?)
            .with_page_size(PageSize::new(50)?);
    if let Ok(biz_id) = std::env::var("DYSMS_BIZ_ID") {
        request = request.with_biz_id(BizId::new(biz_id)?);
    }

    let response = client.query_details(request).await?;
    println!(
        "code: {:?}, total: {:?}, request_id: {:?}",
        response.code(),
        response.total_count(),
        response.request_id()
    );
    for detail in response.send_details()? {
        println!(
            "{} {:?} {}",
            detail.phone_num,
            detail.delivery_status(),
            detail.content.as_deref().unwrap_or_default()
        );
    }

    Ok(())
}
