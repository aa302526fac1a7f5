use std::fmt;

use chrono::NaiveDate;
use phonenumber::country;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Alibaba Cloud `AccessKeyId`.
///
/// Invariant: non-empty after trimming.
pub struct AccessKeyId(String);

impl AccessKeyId {
    /// Parameter name used by the signed-request scheme (`AccessKeyId`).
    pub const FIELD: &'static str = "AccessKeyId";

    /// Create a validated [`AccessKeyId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Alibaba Cloud `AccessKeySecret`.
///
/// Invariant: must not be empty (kept verbatim). `Debug` output is redacted.
pub struct AccessKeySecret(String);

impl AccessKeySecret {
    /// Name used in validation errors (`AccessKeySecret`).
    pub const FIELD: &'static str = "AccessKeySecret";

    /// Create a validated [`AccessKeySecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessKeySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessKeySecret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// SMS signature name (`SignName`), exactly as registered in the console.
///
/// Invariant: non-empty after trimming.
pub struct SignName(String);

impl SignName {
    /// Parameter name (`SignName`).
    pub const FIELD: &'static str = "SignName";

    /// Create a validated [`SignName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sign name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS template code (`TemplateCode`), e.g. `SMS_0001`.
///
/// Invariant: non-empty after trimming.
pub struct TemplateCode(String);

impl TemplateCode {
    /// Parameter name (`TemplateCode`).
    pub const FIELD: &'static str = "TemplateCode";

    /// Create a validated [`TemplateCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated template code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
/// Template variable substitutions, e.g. `{"code": "1234"}`.
///
/// Serialized as a JSON object string before it goes on the wire. Keys keep the
/// order they were inserted in.
pub struct TemplateParam(Map<String, Value>);

impl TemplateParam {
    /// Parameter name used by `SendSms` (`TemplateParam`).
    pub const FIELD: &'static str = "TemplateParam";

    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) one variable and return the updated mapping.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add (or replace) one variable.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }

    /// Look up one variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Variable names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K, V> FromIterator<(K, V)> for TemplateParam
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), Value::String(value.into())))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Caller-side tracking id (`OutId`), echoed back in delivery receipts.
///
/// Invariant: must not be empty. Sent verbatim (whitespace is preserved).
pub struct OutId(String);

impl OutId {
    /// Parameter name (`OutId`).
    pub const FIELD: &'static str = "OutId";

    /// Create a validated [`OutId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the out id as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// Uplink extension code (`SmsUpExtendCode`).
///
/// Invariant: non-empty after trimming. The provider limits it to 7 digits; that
/// limit is left to the provider.
pub struct SmsUpExtendCode(String);

impl SmsUpExtendCode {
    /// Parameter name used by `SendSms` (`SmsUpExtendCode`).
    pub const FIELD: &'static str = "SmsUpExtendCode";

    /// Create a validated [`SmsUpExtendCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated extension code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Provider-assigned send id (`BizId`) returned by `SendSms`.
///
/// Invariant: non-empty after trimming.
pub struct BizId(String);

impl BizId {
    /// Parameter name (`BizId`).
    pub const FIELD: &'static str = "BizId";

    /// Create a validated [`BizId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated biz id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Unvalidated phone number as sent to the provider.
///
/// Invariant: non-empty after trimming. This type does not normalize; parse into
/// [`PhoneNumber`] and convert it into [`RawPhoneNumber`] for provider formatting.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Parameter name used by `QuerySendDetails` (`PhoneNumber`).
    pub const FIELD: &'static str = "PhoneNumber";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the provider.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert a parsed number into the provider's format: the national number for
    /// mainland China, country code followed by the national number otherwise.
    fn from(value: PhoneNumber) -> Self {
        let digits = value.e164.trim_start_matches('+');
        match digits.strip_prefix(PhoneNumber::MAINLAND_CODE) {
            Some(national) => Self(national.to_owned()),
            None => Self(digits.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One or more recipients for `SendSms` (`PhoneNumbers`), sent comma-joined.
pub struct PhoneNumbers(Vec<RawPhoneNumber>);

impl PhoneNumbers {
    /// Parameter name (`PhoneNumbers`).
    pub const FIELD: &'static str = "PhoneNumbers";

    /// A single recipient.
    pub fn one(phone: RawPhoneNumber) -> Self {
        Self(vec![phone])
    }

    /// Several recipients sharing one message.
    pub fn many(phones: Vec<RawPhoneNumber>) -> Result<Self, ValidationError> {
        if phones.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(phones))
    }

    pub fn as_slice(&self) -> &[RawPhoneNumber] {
        &self.0
    }

    /// Comma-joined wire value.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(RawPhoneNumber::raw)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<RawPhoneNumber> for PhoneNumbers {
    fn from(value: RawPhoneNumber) -> Self {
        Self::one(value)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parameter name (`PhoneNumber`).
    pub const FIELD: &'static str = "PhoneNumber";

    const MAINLAND_CODE: &'static str = "86";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country
    /// prefix. Use [`PhoneNumber::parse_cn`] for the common mainland case.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Parse with mainland China as the default region.
    pub fn parse_cn(input: impl Into<String>) -> Result<Self, ValidationError> {
        Self::parse(Some(country::Id::CN), input)
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Day to query delivery records for (`SendDate`, wire format `YYYYMMDD`).
///
/// Only the format is validated. The provider rejects dates older than 30 days.
pub struct SendDate(NaiveDate);

impl SendDate {
    /// Parameter name (`SendDate`).
    pub const FIELD: &'static str = "SendDate";

    const FORMAT: &'static str = "%Y%m%d";

    /// Parse a `YYYYMMDD` string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidSendDate {
                input: trimmed.to_owned(),
            });
        }
        NaiveDate::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidSendDate {
                input: trimmed.to_owned(),
            })
    }

    /// Wrap an already-known calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// `YYYYMMDD` wire value.
    pub fn to_wire(self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Page size for `QuerySendDetails` (`PageSize`).
///
/// Invariant: `>= 1`.
pub struct PageSize(u32);

impl PageSize {
    /// Parameter name (`PageSize`).
    pub const FIELD: &'static str = "PageSize";

    pub const DEFAULT: u32 = 10;

    /// Create a validated page size.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::NotPositive { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// 1-based page index for `QuerySendDetails` (`CurrentPage`).
///
/// Invariant: `>= 1`.
pub struct CurrentPage(u32);

impl CurrentPage {
    /// Parameter name (`CurrentPage`).
    pub const FIELD: &'static str = "CurrentPage";

    pub const DEFAULT: u32 = 1;

    /// Create a validated page index.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::NotPositive { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for CurrentPage {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
