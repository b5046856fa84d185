//! Application error types.

use jobzee_client::ApiError;
use thiserror::Error;
use validator::ValidationErrors;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// The form failed local checks; the message is shown as-is.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The action needs a session the store does not hold.
    #[error("No active session")]
    NotSignedIn,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Text for an error notice: local messages verbatim, the backend's
    /// message when it sent one, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotSignedIn => fallback.to_string(),
            AppError::Api(err) => err.user_message(fallback),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(first_validation_message(&errors))
    }
}

/// First failing field's message, by field name so the choice is stable.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field))
            })
        })
        .unwrap_or_else(|| "Please fill full form!".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 3, message = "Name is too short"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_validation_message_is_first_field_alphabetically() {
        let form = Form {
            name: "x".to_string(),
            email: "nope".to_string(),
        };
        let err = AppError::from(form.validate().unwrap_err());
        assert_eq!(err.user_message("ignored"), "Invalid email");
    }

    #[test]
    fn test_validation_message_uses_custom_text() {
        let form = Form {
            name: "x".to_string(),
            email: "a@b.io".to_string(),
        };
        let err = AppError::from(form.validate().unwrap_err());
        assert_eq!(err.user_message("ignored"), "Name is too short");
    }

    #[test]
    fn test_api_error_falls_back() {
        let err = AppError::from(ApiError::Network("refused".to_string()));
        assert_eq!(err.user_message("Failed to load jobs"), "Failed to load jobs");
    }
}
