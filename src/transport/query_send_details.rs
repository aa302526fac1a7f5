use crate::domain::{BizId, CurrentPage, PageSize, QuerySendDetails, RawPhoneNumber, SendDate};

pub const QUERY_SEND_DETAILS_ACTION: &str = "QuerySendDetails";

pub fn encode_query_send_details_params(request: &QuerySendDetails) -> Vec<(String, String)> {
    let mut params = vec![
        (
            RawPhoneNumber::FIELD.to_owned(),
            request.phone_number().raw().to_owned(),
        ),
        (SendDate::FIELD.to_owned(), request.send_date().to_wire()),
        (
            PageSize::FIELD.to_owned(),
            request.page_size().value().to_string(),
        ),
        (
            CurrentPage::FIELD.to_owned(),
            request.current_page().value().to_string(),
        ),
    ];
    if let Some(biz_id) = request.biz_id() {
        params.push((BizId::FIELD.to_owned(), biz_id.as_str().to_owned()));
    }
    params
}
