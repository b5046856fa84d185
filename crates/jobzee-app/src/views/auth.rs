//! Login, logout and the forgot-password flow.

use jobzee_models::{LoginRequest, Role};
use tracing::{debug, info};

use super::{message_or, ViewContext};
use crate::error::{AppError, AppResult};
use crate::routes::Route;
use crate::session::ResolveOutcome;

/// Login form as typed; the role is a radio choice and may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl LoginForm {
    fn to_request(&self) -> AppResult<LoginRequest> {
        match self.role {
            Some(role) if !self.email.trim().is_empty() && !self.password.is_empty() => {
                Ok(LoginRequest {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                    role,
                })
            }
            _ => Err(AppError::validation("Please fill all fields.")),
        }
    }
}

pub struct LoginView {
    ctx: ViewContext,
}

impl LoginView {
    pub fn new(ctx: ViewContext) -> Self {
        Self { ctx }
    }

    /// Log in and re-resolve the session. Returns where to go next.
    ///
    /// The cookie set by the backend is the only credential kept; the token
    /// in the response body is ignored.
    pub async fn submit(&self, form: &LoginForm) -> Option<Route> {
        let result = self.login(form).await;
        let route = self.ctx.notifier.settle(result, "Login failed!")?;
        self.ctx.notifier.success("Login successful!");
        Some(route)
    }

    async fn login(&self, form: &LoginForm) -> AppResult<Route> {
        let request = form.to_request()?;
        self.ctx.session_api.login(&request).await?;

        match self.ctx.resolver.resolve().await {
            ResolveOutcome::Authenticated => {}
            // A concurrent write won; trust whatever the store holds now.
            ResolveOutcome::Discarded if self.ctx.store.get().is_authenticated() => {}
            outcome => {
                debug!(?outcome, "Login accepted but no session followed");
                return Err(AppError::NotSignedIn);
            }
        }

        info!(role = %request.role, "Logged in");
        Ok(Route::Home)
    }

    /// Forgot-password flow bound to this view.
    pub fn password_reset(&self) -> PasswordReset {
        PasswordReset::new(self.ctx.clone())
    }
}

/// End the session. On success the store is cleared and the caller should
/// go to the returned login route; on failure the session is left intact.
pub async fn logout(ctx: &ViewContext) -> Option<Route> {
    match ctx.session_api.logout().await {
        Ok(response) => {
            ctx.store.set_unauthenticated();
            ctx.notifier
                .success(message_or(&response.message, "Logged out successfully!"));
            info!("Logged out");
            Some(Route::Login)
        }
        Err(e) => {
            ctx.notifier.report(&AppError::from(e), "Failed to log out!");
            None
        }
    }
}

/// Steps of the forgot-password dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetStep {
    #[default]
    Closed,
    EnterEmail,
    EnterOtp,
    EnterNewPassword,
}

/// Forgot-password dialog: email, then one-time code, then new password.
///
/// Each step is an independent backend call; the backend is trusted to tie
/// them together.
pub struct PasswordReset {
    ctx: ViewContext,
    step: ResetStep,
    email: String,
}

impl PasswordReset {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            step: ResetStep::Closed,
            email: String::new(),
        }
    }

    pub fn step(&self) -> ResetStep {
        self.step
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn open(&mut self) {
        if self.step == ResetStep::Closed {
            self.step = ResetStep::EnterEmail;
        }
    }

    /// Close the dialog and forget everything typed into it.
    pub fn close(&mut self) {
        self.step = ResetStep::Closed;
        self.email.clear();
    }

    /// Mail a code. Allowed again from the code step to resend.
    pub async fn send_otp(&mut self, email: &str) -> bool {
        let result = self.try_send_otp(email).await;
        self.ctx.notifier.settle(result, "Failed to send OTP.").is_some()
    }

    async fn try_send_otp(&mut self, email: &str) -> AppResult<()> {
        self.expect_step(&[ResetStep::EnterEmail, ResetStep::EnterOtp])?;
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::validation("Please enter your email."));
        }

        self.ctx.client.send_otp(email).await?;
        self.ctx.notifier.success("OTP sent to your email.");
        self.email = email.to_string();
        self.step = ResetStep::EnterOtp;
        Ok(())
    }

    pub async fn verify_otp(&mut self, otp: &str) -> bool {
        let result = self.try_verify_otp(otp).await;
        self.ctx.notifier.settle(result, "Invalid OTP.").is_some()
    }

    async fn try_verify_otp(&mut self, otp: &str) -> AppResult<()> {
        self.expect_step(&[ResetStep::EnterOtp])?;
        let otp = otp.trim();
        if otp.is_empty() {
            return Err(AppError::validation("Please enter the OTP."));
        }

        self.ctx.client.verify_otp(&self.email, otp).await?;
        self.ctx.notifier.success("OTP verified successfully.");
        self.step = ResetStep::EnterNewPassword;
        Ok(())
    }

    /// Set the new password; closes the dialog on success.
    pub async fn update_password(&mut self, new_password: &str) -> bool {
        let result = self.try_update_password(new_password).await;
        self.ctx
            .notifier
            .settle(result, "Failed to update password.")
            .is_some()
    }

    async fn try_update_password(&mut self, new_password: &str) -> AppResult<()> {
        self.expect_step(&[ResetStep::EnterNewPassword])?;
        if new_password.is_empty() {
            return Err(AppError::validation("Please enter a new password."));
        }

        self.ctx
            .client
            .update_password(&self.email, new_password)
            .await?;
        self.ctx.notifier.success("Password updated successfully.");
        self.close();
        Ok(())
    }

    fn expect_step(&self, allowed: &[ResetStep]) -> AppResult<()> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            Err(AppError::validation("Please start the password reset again."))
        }
    }
}
