//! `/user/*` and `/profile` endpoints.

use jobzee_models::{
    LoginRequest, LoginResponse, MessageResponse, OtpRequest, ProfilePicture, ProfilePictureResponse,
    ProfileResponse, ProfileUpdate, RegisterForm, UpdatePasswordRequest, User, UserEnvelope,
    VerifyOtpRequest,
};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};

impl ApiClient {
    /// "Who am I": the user owning the current session cookie.
    pub async fn current_user(&self) -> ApiResult<User> {
        let envelope: UserEnvelope = self.get_json("current_user", "/user/getuser").await?;
        Ok(envelope.user)
    }

    /// Log in; on success the backend sets the session cookie.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let response = self
            .send_json("login", Method::POST, "/user/login", Some(request))
            .await;
        self.credentials_changed();
        response
    }

    /// End the session; the backend clears the cookie.
    pub async fn logout(&self) -> ApiResult<MessageResponse> {
        let response = self
            .send_json::<(), _>("logout", Method::GET, "/user/logout", None)
            .await;
        self.credentials_changed();
        response
    }

    /// Create an account. Sent as multipart form data.
    pub async fn register(&self, form: &RegisterForm) -> ApiResult<MessageResponse> {
        let mut multipart = Form::new()
            .text("role", form.role.as_str())
            .text("name", form.name.clone())
            .text("phone", form.phone.clone())
            .text("email", form.email.clone())
            .text("password", form.password.clone());
        if let Some(url) = &form.profile_picture {
            multipart = multipart.text("profilePic", url.clone());
        }

        let response = self
            .send_multipart("register", "/user/register", multipart)
            .await;
        self.credentials_changed();
        response
    }

    /// Password reset, step 1: mail a one-time code.
    pub async fn send_otp(&self, email: &str) -> ApiResult<MessageResponse> {
        let body = OtpRequest {
            email: email.to_string(),
        };
        self.send_json("send_otp", Method::POST, "/user/send-otp", Some(&body))
            .await
    }

    /// Password reset, step 2: check the code.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> ApiResult<MessageResponse> {
        let body = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        self.send_json("verify_otp", Method::POST, "/user/verify-otp", Some(&body))
            .await
    }

    /// Password reset, step 3: set the new password.
    pub async fn update_password(&self, email: &str, new_password: &str) -> ApiResult<MessageResponse> {
        let body = UpdatePasswordRequest {
            email: email.to_string(),
            new_password: new_password.to_string(),
        };
        self.send_json("update_password", Method::POST, "/user/update-password", Some(&body))
            .await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<ProfileResponse> {
        self.send_json("update_profile", Method::POST, "/profile", Some(update))
            .await
    }

    /// Replace the signed-in user's picture. The reply carries the new URL.
    pub async fn upload_profile_picture(&self, picture: &ProfilePicture) -> ApiResult<ProfilePictureResponse> {
        let part = Part::bytes(picture.bytes.clone())
            .file_name(picture.file_name.clone())
            .mime_str(&picture.mime_type)
            .map_err(|e| ApiError::InvalidRequest(format!("picture content type: {}", e)))?;
        let form = Form::new().part("profilePic", part);

        self.send_multipart("upload_profile_picture", "/user/upload-profile", form)
            .await
    }
}
