//! Job applications: submit, list for the current role, delete.

use jobzee_models::{Application, ApplicationDraft, ApplicationId, Role};
use tracing::debug;
use validator::Validate;

use super::{message_or, ViewContext};
use crate::error::{AppError, AppResult};

pub struct ApplicationsView {
    ctx: ViewContext,
    applications: Vec<Application>,
}

impl ApplicationsView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            applications: Vec::new(),
        }
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// Submit an application with its resume.
    pub async fn submit(&self, draft: &ApplicationDraft) -> bool {
        let result = self.try_submit(draft).await;
        self.ctx
            .notifier
            .settle(result, "Something went wrong!")
            .is_some()
    }

    async fn try_submit(&self, draft: &ApplicationDraft) -> AppResult<()> {
        draft.validate()?;
        let response = self.ctx.client.post_application(draft).await?;
        self.ctx
            .notifier
            .success(message_or(&response.message, "Application Submitted!"));
        Ok(())
    }

    /// Load applications for the signed-in user: those received by an
    /// employer, or those sent by anyone else.
    pub async fn load(&mut self) -> bool {
        let result = self.fetch().await;
        match self.ctx.notifier.settle(result, "Error fetching applications") {
            Some(applications) => {
                debug!(count = applications.len(), "Applications loaded");
                self.applications = applications;
                true
            }
            None => false,
        }
    }

    async fn fetch(&self) -> AppResult<Vec<Application>> {
        let applications = match self.ctx.store.get().role() {
            Some(Role::Employer) => self.ctx.client.employer_applications().await?,
            Some(_) => self.ctx.client.jobseeker_applications().await?,
            None => return Err(AppError::NotSignedIn),
        };
        Ok(applications)
    }

    /// Withdraw or discard an application; it leaves the list on success.
    pub async fn delete(&mut self, id: &ApplicationId) -> bool {
        match self.ctx.client.delete_application(id).await {
            Ok(response) => {
                self.applications.retain(|a| &a.id != id);
                self.ctx
                    .notifier
                    .success(message_or(&response.message, "Application deleted successfully!"));
                true
            }
            Err(e) => {
                self.ctx
                    .notifier
                    .report(&AppError::from(e), "Failed to delete application");
                false
            }
        }
    }
}
