//! `/application/*` endpoints.

use jobzee_models::{Application, ApplicationDraft, ApplicationId, ApplicationsEnvelope, MessageResponse};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::client::{segment, ApiClient};
use crate::error::{ApiError, ApiResult};

impl ApiClient {
    /// Submit an application together with its resume file.
    pub async fn post_application(&self, draft: &ApplicationDraft) -> ApiResult<MessageResponse> {
        let resume = Part::bytes(draft.resume.bytes.clone())
            .file_name(draft.resume.file_name.clone())
            .mime_str(&draft.resume.mime_type)
            .map_err(|e| ApiError::InvalidRequest(format!("resume content type: {}", e)))?;

        let form = Form::new()
            .text("name", draft.name.clone())
            .text("email", draft.email.clone())
            .text("phone", draft.phone.clone())
            .text("address", draft.address.clone())
            .text("coverLetter", draft.cover_letter.clone())
            .text("jobId", draft.job_id.as_str().to_string())
            .part("resume", resume);

        self.send_multipart("post_application", "/application/post", form)
            .await
    }

    /// Applications received for the logged-in employer's jobs.
    pub async fn employer_applications(&self) -> ApiResult<Vec<Application>> {
        let envelope: ApplicationsEnvelope = self
            .get_json("employer_applications", "/application/employer/getall")
            .await?;
        Ok(envelope.applications)
    }

    /// Applications the logged-in job seeker has sent.
    pub async fn jobseeker_applications(&self) -> ApiResult<Vec<Application>> {
        let envelope: ApplicationsEnvelope = self
            .get_json("jobseeker_applications", "/application/jobseeker/getall")
            .await?;
        Ok(envelope.applications)
    }

    pub async fn delete_application(&self, id: &ApplicationId) -> ApiResult<MessageResponse> {
        let path = format!("/application/delete/{}", segment(id.as_str()));
        self.send_json::<(), _>("delete_application", Method::DELETE, &path, None)
            .await
    }
}
