use crate::domain::value::StatusCode;

/// The two fields of a Cloopen reply that decide the outcome of a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSmsResponse {
    pub status_code: Option<StatusCode>,
    pub status_msg: Option<String>,
}

impl TemplateSmsResponse {
    pub fn is_success(&self) -> bool {
        self.status_code.as_ref().is_some_and(StatusCode::is_success)
    }
}
