//! The slice of the backend the session layer depends on.

use async_trait::async_trait;
use jobzee_models::{LoginRequest, LoginResponse, MessageResponse, User};

use crate::client::ApiClient;
use crate::error::ApiResult;

/// Session-related backend calls.
///
/// The application layer holds this as a trait object so session resolution
/// can be exercised without a live backend.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// "Who am I" using ambient credentials.
    async fn current_user(&self) -> ApiResult<User>;

    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    async fn logout(&self) -> ApiResult<MessageResponse>;
}

#[async_trait]
impl SessionApi for ApiClient {
    async fn current_user(&self) -> ApiResult<User> {
        ApiClient::current_user(self).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        ApiClient::login(self, request).await
    }

    async fn logout(&self) -> ApiResult<MessageResponse> {
        ApiClient::logout(self).await
    }
}
