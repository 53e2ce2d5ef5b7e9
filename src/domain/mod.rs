//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod template;
mod validation;
mod value;

pub use request::TemplateSms;
pub use response::TemplateSmsResponse;
pub use template::{Templates, UnknownTemplate};
pub use validation::ValidationError;
pub use value::{AccountSid, AccountToken, AppId, PhoneNumber, StatusCode, TemplateId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_sid_rejects_empty() {
        assert!(matches!(
            AccountSid::new("   "),
            Err(ValidationError::Empty {
                field: AccountSid::FIELD
            })
        ));
    }

    #[test]
    fn account_token_debug_is_redacted() {
        let token = AccountToken::new("super-secret").unwrap();
        assert_eq!(format!("{token:?}"), "AccountToken(***)");
        assert_eq!(token.as_str(), "super-secret");
    }

    #[test]
    fn app_id_is_trimmed() {
        assert_eq!(AppId::new(" app ").unwrap().as_str(), "app");
    }

    #[test]
    fn phone_number_parses_with_region_and_trims() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::CN), " 13800138000 ").unwrap();
        assert_eq!(pn.raw(), "13800138000");
        assert_eq!(pn.e164(), "+8613800138000");
    }

    #[test]
    fn phone_number_rejects_garbage() {
        assert!(matches!(
            PhoneNumber::parse(None, "not a number"),
            Err(ValidationError::InvalidPhoneNumber { .. })
        ));
    }

    #[test]
    fn validate_accepts_complete_request() {
        let sms = TemplateSms::new("login", "13800138000", ["1234", "5"]);
        assert_eq!(sms.validate(), Ok(()));
    }

    #[test]
    fn validate_requires_destination() {
        let sms = TemplateSms::new("login", "  ", ["1234"]);
        assert_eq!(
            sms.validate(),
            Err(ValidationError::Empty {
                field: TemplateSms::TO_FIELD
            })
        );
    }

    #[test]
    fn validate_requires_substitutions() {
        let sms = TemplateSms::new("login", "13800138000", Vec::<String>::new());
        assert_eq!(
            sms.validate(),
            Err(ValidationError::Empty {
                field: TemplateSms::DATAS_FIELD
            })
        );
    }

    #[test]
    fn validate_requires_name_even_with_explicit_template_id() {
        let sms = TemplateSms::new("", "13800138000", ["1234"]).with_template_id("100001");
        assert_eq!(
            sms.validate(),
            Err(ValidationError::Empty {
                field: TemplateSms::TEMPLATE_NAME_FIELD
            })
        );
    }

    #[test]
    fn for_phone_uses_e164() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::CN), "13800138000").unwrap();
        let sms = TemplateSms::for_phone("login", &pn, ["1"]);
        assert_eq!(sms.to, "+8613800138000");
    }

    #[test]
    fn status_code_success_is_exact() {
        assert!(StatusCode::new("000000").is_success());
        assert!(!StatusCode::new("0").is_success());
        assert!(!StatusCode::new("111111").is_success());
    }

    #[test]
    fn response_without_status_code_is_failure() {
        let response = TemplateSmsResponse {
            status_code: None,
            status_msg: None,
        };
        assert!(!response.is_success());
    }
}
