//! Authentication and account payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::user::{Role, User};

/// Body of `POST /user/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Response of `POST /user/login`.
///
/// The backend also sets the session cookie; `token` duplicates it and is
/// not used by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Generic `{ message }` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Response of `GET /user/getuser`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

/// Registration form, sent as multipart to `POST /user/register`.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 3, max = 30, message = "Name must contain 3 to 30 characters"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please provide your phone number"))]
    pub phone: String,
    #[validate(length(min = 8, max = 32, message = "Password must contain 8 to 32 characters"))]
    pub password: String,
    pub role: Role,
    /// Already-uploaded picture URL.
    #[validate(url(message = "Profile picture must be a URL"))]
    pub profile_picture: Option<String>,
}

/// Body of `POST /user/send-otp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpRequest {
    pub email: String,
}

/// Body of `POST /user/verify-otp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Body of `POST /user/update-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// Body of `POST /profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 3, max = 30, message = "Name must contain 3 to 30 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Please provide your phone number"))]
    pub phone: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
}

impl From<&User> for ProfileUpdate {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            phone: user.phone.clone(),
            email: user.email.clone(),
        }
    }
}

/// Response of `POST /profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub profile: Option<User>,
}

/// Image chosen on the profile screen, sent as the `profilePic` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePicture {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ProfilePicture {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Response of `POST /user/upload-profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePictureResponse {
    #[serde(default)]
    pub message: String,
    /// URL of the stored picture.
    #[serde(default, rename = "profilePic")]
    pub profile_picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_format() {
        let body = LoginRequest {
            email: "a@b.io".to_string(),
            password: "hunter22".to_string(),
            role: Role::JobSeeker,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["role"], "Job Seeker");
        assert_eq!(value["email"], "a@b.io");
    }

    #[test]
    fn test_profile_picture_response_reads_url() {
        let response: ProfilePictureResponse = serde_json::from_str(
            r#"{"success":true,"profilePic":"https://cdn.example.com/p.png"}"#,
        )
        .unwrap();
        assert_eq!(response.profile_picture.as_deref(), Some("https://cdn.example.com/p.png"));
        assert!(response.message.is_empty());
    }

    #[test]
    fn test_update_password_uses_camel_case() {
        let body = UpdatePasswordRequest {
            email: "a@b.io".to_string(),
            new_password: "n3w-passw0rd".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["newPassword"], "n3w-passw0rd");
    }

    #[test]
    fn test_register_form_validation() {
        let mut form = RegisterForm {
            name: "Linus".to_string(),
            email: "linus@example.com".to_string(),
            phone: "123".to_string(),
            password: "correct-horse".to_string(),
            role: Role::Employer,
            profile_picture: None,
        };
        assert!(form.validate().is_ok());

        form.password = "short".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_login_response_tolerates_missing_token() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"success": true, "message": "Welcome back"}"#).unwrap();
        assert_eq!(resp.message, "Welcome back");
        assert!(resp.token.is_none());
    }
}
