//! The signed-in user's profile.

use jobzee_client::ApiError;
use jobzee_models::{ProfilePicture, ProfileUpdate, User};
use validator::Validate;

use super::{message_or, ViewContext};
use crate::error::AppResult;

pub struct ProfileView {
    ctx: ViewContext,
    profile: Option<User>,
}

impl ProfileView {
    pub fn new(ctx: ViewContext) -> Self {
        Self { ctx, profile: None }
    }

    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    /// Fetch the profile through "who am I".
    pub async fn load(&mut self) -> bool {
        let result = self.ctx.client.current_user().await.map_err(Into::into);
        match self.ctx.notifier.settle(result, "Failed to fetch profile") {
            Some(user) => {
                self.profile = Some(user);
                true
            }
            None => false,
        }
    }

    /// Save edits; the session store picks up the updated user.
    pub async fn save(&mut self, update: &ProfileUpdate) -> bool {
        let result = self.try_save(update).await;
        self.ctx
            .notifier
            .settle(result, "Failed to update profile")
            .is_some()
    }

    async fn try_save(&mut self, update: &ProfileUpdate) -> AppResult<()> {
        update.validate()?;
        let response = self.ctx.client.update_profile(update).await?;

        let updated = match (response.profile, self.profile.take()) {
            (Some(user), _) => Some(user),
            (None, Some(mut user)) => {
                user.name = update.name.clone();
                user.phone = update.phone.clone();
                user.email = update.email.clone();
                Some(user)
            }
            (None, None) => None,
        };
        if let Some(user) = &updated {
            if self.ctx.store.get().is_authenticated() {
                self.ctx.store.set_authenticated(user.clone());
            }
        }
        self.profile = updated;

        self.ctx
            .notifier
            .success(message_or(&response.message, "Profile updated successfully"));
        Ok(())
    }

    /// Upload a new picture. The loaded profile and the session user both
    /// take the returned URL, so the header shows it straight away.
    pub async fn upload_picture(&mut self, picture: &ProfilePicture) -> bool {
        let result = self.try_upload(picture).await;
        self.ctx
            .notifier
            .settle(result, "Failed to upload profile picture.")
            .is_some()
    }

    async fn try_upload(&mut self, picture: &ProfilePicture) -> AppResult<()> {
        let response = self.ctx.client.upload_profile_picture(picture).await?;
        let url = response
            .profile_picture
            .ok_or_else(|| ApiError::invalid_response("upload reply has no profilePic"))?;

        if let Some(user) = self.profile.as_mut() {
            user.profile_picture = Some(url.clone());
        }
        if let Some(mut user) = self.ctx.store.get().user().cloned() {
            user.profile_picture = Some(url);
            self.ctx.store.set_authenticated(user);
        }

        self.ctx.notifier.success("Profile picture updated successfully!");
        Ok(())
    }
}
