use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidServer { reason: String },
    InvalidUtcOffset { hours: i8 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidServer { reason } => write!(f, "invalid server address: {reason}"),
            Self::InvalidUtcOffset { hours } => {
                write!(f, "utc offset out of range: {hours} hours")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "to" };
        assert_eq!(err.to_string(), "to must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::InvalidServer {
            reason: "empty host".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid server address: empty host");

        let err = ValidationError::InvalidUtcOffset { hours: 30 };
        assert_eq!(
            err.to_string(),
            "utc offset out of range: 30 hours"
        );
    }
}
