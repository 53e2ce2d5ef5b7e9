use crate::domain::validation::ValidationError;
use crate::domain::value::PhoneNumber;

/// Templated SMS send request.
///
/// Fields are checked by [`TemplateSms::validate`] when the request is sent, not at
/// construction, so an invalid request still produces a log record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSms {
    /// Explicit provider template id; bypasses the name lookup when non-empty.
    pub template_id: Option<String>,
    /// Human-readable template name, looked up in the configured template map.
    pub template_name: String,
    /// Destination phone number.
    pub to: String,
    /// Ordered values for the template placeholders.
    pub datas: Vec<String>,
}

impl TemplateSms {
    pub const TEMPLATE_NAME_FIELD: &'static str = "template_name";
    pub const TO_FIELD: &'static str = "to";
    pub const DATAS_FIELD: &'static str = "datas";

    /// Build a request resolved through the template map.
    pub fn new(
        template_name: impl Into<String>,
        to: impl Into<String>,
        datas: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            template_id: None,
            template_name: template_name.into(),
            to: to.into(),
            datas: datas.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a request addressed to a parsed phone number (sent in E.164 form).
    pub fn for_phone(
        template_name: impl Into<String>,
        phone: &PhoneNumber,
        datas: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(template_name, phone.e164(), datas)
    }

    /// Override the template id; the name is still required by [`TemplateSms::validate`].
    pub fn with_template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Structural checks run before template resolution or any network call.
    ///
    /// The template name is required even when an explicit template id is set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.template_name.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::TEMPLATE_NAME_FIELD,
            });
        }
        if self.to.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::TO_FIELD,
            });
        }
        if self.datas.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::DATAS_FIELD,
            });
        }
        Ok(())
    }

    /// Explicit template id, if one was supplied and is non-blank.
    pub fn explicit_template_id(&self) -> Option<&str> {
        self.template_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
