//! Account registration.

use jobzee_models::RegisterForm;
use tracing::info;
use validator::Validate;

use super::{message_or, ViewContext};
use crate::error::AppResult;
use crate::routes::Route;
use crate::session::ResolveOutcome;

pub struct RegisterView {
    ctx: ViewContext,
}

impl RegisterView {
    pub fn new(ctx: ViewContext) -> Self {
        Self { ctx }
    }

    /// Create the account; the backend signs the new user in, so the
    /// session is resolved afterwards.
    pub async fn submit(&self, form: &RegisterForm) -> Option<Route> {
        let result = self.register(form).await;
        self.ctx.notifier.settle(result, "Registration failed")
    }

    async fn register(&self, form: &RegisterForm) -> AppResult<Route> {
        form.validate()?;
        let response = self.ctx.client.register(form).await?;
        self.ctx
            .notifier
            .success(message_or(&response.message, "User Registered!"));
        info!(role = %form.role, "Registered");

        // Registration stands even if no session follows; send them to log in.
        match self.ctx.resolver.resolve().await {
            ResolveOutcome::Authenticated => Ok(Route::Home),
            _ if self.ctx.store.get().is_authenticated() => Ok(Route::Home),
            _ => Ok(Route::Login),
        }
    }
}
