//! `/job/*` endpoints.

use jobzee_models::{Job, JobDraft, JobEnvelope, JobId, JobsEnvelope, MessageResponse, MyJobsEnvelope};
use reqwest::Method;

use crate::client::{segment, ApiClient};
use crate::error::ApiResult;

impl ApiClient {
    /// All open jobs.
    pub async fn list_jobs(&self) -> ApiResult<Vec<Job>> {
        let envelope: JobsEnvelope = self.get_json("list_jobs", "/job/getall").await?;
        Ok(envelope.jobs)
    }

    pub async fn get_job(&self, id: &JobId) -> ApiResult<Job> {
        let path = format!("/job/{}", segment(id.as_str()));
        let envelope: JobEnvelope = self.get_json("get_job", &path).await?;
        Ok(envelope.job)
    }

    /// Jobs posted by the logged-in employer.
    pub async fn my_jobs(&self) -> ApiResult<Vec<Job>> {
        let envelope: MyJobsEnvelope = self.get_json("my_jobs", "/job/getmyjobs").await?;
        Ok(envelope.my_jobs)
    }

    pub async fn post_job(&self, draft: &JobDraft) -> ApiResult<MessageResponse> {
        self.send_json("post_job", Method::POST, "/job/post", Some(draft))
            .await
    }

    pub async fn update_job(&self, id: &JobId, draft: &JobDraft) -> ApiResult<MessageResponse> {
        let path = format!("/job/update/{}", segment(id.as_str()));
        self.send_json("update_job", Method::PUT, &path, Some(draft))
            .await
    }

    pub async fn delete_job(&self, id: &JobId) -> ApiResult<MessageResponse> {
        let path = format!("/job/delete/{}", segment(id.as_str()));
        self.send_json::<(), _>("delete_job", Method::DELETE, &path, None)
            .await
    }
}
