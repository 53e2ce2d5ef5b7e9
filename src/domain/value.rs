use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Cloopen account identifier (`accountSid`).
///
/// Invariant: non-empty after trimming.
pub struct AccountSid(String);

impl AccountSid {
    /// Configuration key used for the account identifier.
    pub const FIELD: &'static str = "account_sid";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Cloopen account secret (`accountToken`).
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct AccountToken(String);

impl AccountToken {
    /// Configuration key used for the account secret.
    pub const FIELD: &'static str = "account_token";

    /// Create a validated [`AccountToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the secret.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccountToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccountToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Cloopen application identifier (`appId`).
///
/// Invariant: non-empty after trimming.
pub struct AppId(String);

impl AppId {
    /// Configuration key used for the application identifier.
    pub const FIELD: &'static str = "app_id";

    /// Create a validated [`AppId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Provider-side template identifier (`templateId`).
///
/// Invariant: non-empty after trimming.
pub struct TemplateId(String);

impl TemplateId {
    /// JSON field name used by Cloopen (`templateId`).
    pub const FIELD: &'static str = "templateId";

    /// Create a validated [`TemplateId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated identifier.
    pub fn as_str(&self) -> &str {
        &self.0
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
    /// JSON field name used by Cloopen (`to`).
    pub const FIELD: &'static str = "to";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
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

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Cloopen status code (`statusCode`).
///
/// Cloopen reports codes as six-digit strings; the value is kept verbatim.
pub struct StatusCode(String);

impl StatusCode {
    /// The only code Cloopen uses for an accepted message.
    pub const SUCCESS: &'static str = "000000";

    /// Wrap a status code as reported by the provider.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Borrow the code as reported by the provider.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` only for the exact success sentinel `000000`.
    pub fn is_success(&self) -> bool {
        self.0 == Self::SUCCESS
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
