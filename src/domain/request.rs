use crate::domain::validation::ValidationError;
use crate::domain::value::{
    BizId, CurrentPage, OutId, PageSize, PhoneNumbers, RawPhoneNumber, SendDate, SignName,
    SmsUpExtendCode, TemplateCode, TemplateParam,
};

/// Provider-side ceiling for one `SendBatchSms` call. Not enforced locally.
pub const SEND_BATCH_SMS_MAX_RECIPIENTS: usize = 100;

#[derive(Debug, Clone)]
pub struct SendSms {
    sign_name: SignName,
    template_code: TemplateCode,
    phone_numbers: PhoneNumbers,
    template_param: Option<TemplateParam>,
    out_id: Option<OutId>,
    sms_up_extend_code: Option<SmsUpExtendCode>,
}

impl SendSms {
    pub fn new(
        sign_name: SignName,
        template_code: TemplateCode,
        phone_numbers: impl Into<PhoneNumbers>,
    ) -> Self {
        Self {
            sign_name,
            template_code,
            phone_numbers: phone_numbers.into(),
            template_param: None,
            out_id: None,
            sms_up_extend_code: None,
        }
    }

    pub fn with_template_param(mut self, template_param: TemplateParam) -> Self {
        self.template_param = Some(template_param);
        self
    }

    pub fn with_out_id(mut self, out_id: OutId) -> Self {
        self.out_id = Some(out_id);
        self
    }

    pub fn with_sms_up_extend_code(mut self, code: SmsUpExtendCode) -> Self {
        self.sms_up_extend_code = Some(code);
        self
    }

    pub fn sign_name(&self) -> &SignName {
        &self.sign_name
    }

    pub fn template_code(&self) -> &TemplateCode {
        &self.template_code
    }

    pub fn phone_numbers(&self) -> &PhoneNumbers {
        &self.phone_numbers
    }

    pub fn template_param(&self) -> Option<&TemplateParam> {
        self.template_param.as_ref()
    }

    pub fn out_id(&self) -> Option<&OutId> {
        self.out_id.as_ref()
    }

    pub fn sms_up_extend_code(&self) -> Option<&SmsUpExtendCode> {
        self.sms_up_extend_code.as_ref()
    }
}

#[derive(Debug, Clone)]
/// Batch send: per-number sign names and template params, one template.
///
/// `sign_names` and `template_params` align positionally with `phone_numbers`.
/// Whether a shorter list is accepted (e.g. a single shared sign name) is up to
/// the provider. The list length cap ([`SEND_BATCH_SMS_MAX_RECIPIENTS`]) is also
/// left to the provider; chunk larger sends yourself.
pub struct SendBatchSms {
    sign_names: Vec<SignName>,
    template_code: TemplateCode,
    phone_numbers: Vec<RawPhoneNumber>,
    template_params: Option<Vec<TemplateParam>>,
    sms_up_extend_codes: Option<Vec<SmsUpExtendCode>>,
}

impl SendBatchSms {
    pub fn new(
        sign_names: Vec<SignName>,
        template_code: TemplateCode,
        phone_numbers: Vec<RawPhoneNumber>,
    ) -> Result<Self, ValidationError> {
        if phone_numbers.is_empty() {
            return Err(ValidationError::Empty {
                field: "PhoneNumberJson",
            });
        }
        if sign_names.is_empty() {
            return Err(ValidationError::Empty {
                field: "SignNameJson",
            });
        }
        Ok(Self {
            sign_names,
            template_code,
            phone_numbers,
            template_params: None,
            sms_up_extend_codes: None,
        })
    }

    pub fn with_template_params(mut self, template_params: Vec<TemplateParam>) -> Self {
        self.template_params = Some(template_params);
        self
    }

    pub fn with_sms_up_extend_codes(mut self, codes: Vec<SmsUpExtendCode>) -> Self {
        self.sms_up_extend_codes = Some(codes);
        self
    }

    pub fn sign_names(&self) -> &[SignName] {
        &self.sign_names
    }

    pub fn template_code(&self) -> &TemplateCode {
        &self.template_code
    }

    pub fn phone_numbers(&self) -> &[RawPhoneNumber] {
        &self.phone_numbers
    }

    pub fn template_params(&self) -> Option<&[TemplateParam]> {
        self.template_params.as_deref()
    }

    pub fn sms_up_extend_codes(&self) -> Option<&[SmsUpExtendCode]> {
        self.sms_up_extend_codes.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct QuerySendDetails {
    phone_number: RawPhoneNumber,
    send_date: SendDate,
    page_size: PageSize,
    current_page: CurrentPage,
    biz_id: Option<BizId>,
}

impl QuerySendDetails {
    /// Query the first page of 10 records for `phone_number` on `send_date`.
    pub fn new(phone_number: RawPhoneNumber, send_date: SendDate) -> Self {
        Self {
            phone_number,
            send_date,
            page_size: PageSize::default(),
            current_page: CurrentPage::default(),
            biz_id: None,
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_current_page(mut self, current_page: CurrentPage) -> Self {
        self.current_page = current_page;
        self
    }

    pub fn with_biz_id(mut self, biz_id: BizId) -> Self {
        self.biz_id = Some(biz_id);
        self
    }

    pub fn phone_number(&self) -> &RawPhoneNumber {
        &self.phone_number
    }

    pub fn send_date(&self) -> SendDate {
        self.send_date
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn current_page(&self) -> CurrentPage {
        self.current_page
    }

    pub fn biz_id(&self) -> Option<&BizId> {
        self.biz_id.as_ref()
    }
}
