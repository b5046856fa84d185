//! Job listings: all jobs, one job, the employer's own jobs and their edits.

use jobzee_models::{Job, JobDraft, JobId};
use tracing::debug;
use validator::Validate;

use super::{message_or, ViewContext};
use crate::error::AppResult;

pub struct JobsView {
    ctx: ViewContext,
    jobs: Vec<Job>,
}

impl JobsView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            jobs: Vec::new(),
        }
    }

    /// Jobs currently shown.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Load every open job.
    pub async fn load_all(&mut self) -> bool {
        let result = self.ctx.client.list_jobs().await.map_err(Into::into);
        self.replace(result, "Failed to load jobs")
    }

    /// Load the jobs posted by the signed-in employer.
    pub async fn load_mine(&mut self) -> bool {
        let result = self.ctx.client.my_jobs().await.map_err(Into::into);
        self.replace(result, "Failed to load your jobs")
    }

    fn replace(&mut self, result: AppResult<Vec<Job>>, fallback: &str) -> bool {
        match self.ctx.notifier.settle(result, fallback) {
            Some(jobs) => {
                debug!(count = jobs.len(), "Jobs loaded");
                self.jobs = jobs;
                true
            }
            None => false,
        }
    }

    pub async fn details(&self, id: &JobId) -> Option<Job> {
        let result = self.ctx.client.get_job(id).await.map_err(Into::into);
        self.ctx.notifier.settle(result, "Failed to load job details")
    }

    pub async fn post(&self, draft: &JobDraft) -> bool {
        let result = self.try_post(draft).await;
        self.ctx.notifier.settle(result, "Something went wrong").is_some()
    }

    async fn try_post(&self, draft: &JobDraft) -> AppResult<()> {
        draft.validate()?;
        let response = self.ctx.client.post_job(draft).await?;
        self.ctx
            .notifier
            .success(message_or(&response.message, "Job posted successfully!"));
        Ok(())
    }

    /// Save edits to one of the listed jobs; the local copy follows on success.
    pub async fn update(&mut self, id: &JobId, draft: &JobDraft) -> bool {
        let result = self.try_update(id, draft).await;
        self.ctx.notifier.settle(result, "Failed to update job").is_some()
    }

    async fn try_update(&mut self, id: &JobId, draft: &JobDraft) -> AppResult<()> {
        draft.validate()?;
        let response = self.ctx.client.update_job(id, draft).await?;
        if let Some(job) = self.jobs.iter_mut().find(|j| &j.id == id) {
            apply_draft(job, draft);
        }
        self.ctx
            .notifier
            .success(message_or(&response.message, "Job updated successfully!"));
        Ok(())
    }

    /// Delete a job; it disappears from the list on success.
    pub async fn delete(&mut self, id: &JobId) -> bool {
        let result = self.try_delete(id).await;
        self.ctx.notifier.settle(result, "Failed to delete job").is_some()
    }

    async fn try_delete(&mut self, id: &JobId) -> AppResult<()> {
        let response = self.ctx.client.delete_job(id).await?;
        self.jobs.retain(|j| &j.id != id);
        self.ctx
            .notifier
            .success(message_or(&response.message, "Job deleted successfully!"));
        Ok(())
    }
}

fn apply_draft(job: &mut Job, draft: &JobDraft) {
    job.title = draft.title.clone();
    job.description = draft.description.clone();
    job.category = draft.category.clone();
    job.country = draft.country.clone();
    job.city = draft.city.clone();
    job.location = draft.location.clone();
    job.salary = draft.salary;
    if let Some(expired) = draft.expired {
        job.expired = expired;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;
    use crate::views::test_support::{context, job_json};
    use jobzee_models::Salary;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_my_jobs(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/job/getmyjobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "myJobs": [job_json("j-1", "u-1"), job_json("j-2", "u-1")]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_load_all_failure_keeps_list_and_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job/getall"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (ctx, mut board) = context(&server);
        let mut view = JobsView::new(ctx);

        assert!(!view.load_all().await);
        assert!(view.jobs().is_empty());
        let notice = &board.drain()[0];
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Failed to load jobs");
    }

    #[tokio::test]
    async fn test_delete_removes_locally() {
        let server = MockServer::start().await;
        mount_my_jobs(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/job/delete/j-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Job Deleted!" })))
            .expect(1)
            .mount(&server)
            .await;

        let (ctx, mut board) = context(&server);
        let mut view = JobsView::new(ctx);
        assert!(view.load_mine().await);
        assert_eq!(view.jobs().len(), 2);

        assert!(view.delete(&JobId::from_string("j-1")).await);
        assert_eq!(view.jobs().len(), 1);
        assert_eq!(view.jobs()[0].id, JobId::from_string("j-2"));
        assert_eq!(board.drain()[0].message, "Job Deleted!");
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_job() {
        let server = MockServer::start().await;
        mount_my_jobs(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/job/delete/j-1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Job not found!" })))
            .mount(&server)
            .await;

        let (ctx, mut board) = context(&server);
        let mut view = JobsView::new(ctx);
        view.load_mine().await;

        assert!(!view.delete(&JobId::from_string("j-1")).await);
        assert_eq!(view.jobs().len(), 2);
        assert_eq!(board.drain()[0].message, "Job not found!");
    }

    #[tokio::test]
    async fn test_update_applies_draft_locally() {
        let server = MockServer::start().await;
        mount_my_jobs(&server).await;
        Mock::given(method("PUT"))
            .and(path("/job/update/j-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Job Updated!" })))
            .expect(1)
            .mount(&server)
            .await;

        let (ctx, _board) = context(&server);
        let mut view = JobsView::new(ctx);
        view.load_mine().await;

        let mut draft = view.jobs()[1].to_draft();
        draft.title = "Staff Data Engineer".to_string();
        draft.salary = Salary::Range { from: 2000, to: 3000 };
        draft.expired = Some(true);

        assert!(view.update(&JobId::from_string("j-2"), &draft).await);
        let job = &view.jobs()[1];
        assert_eq!(job.title, "Staff Data Engineer");
        assert_eq!(job.salary, Salary::Range { from: 2000, to: 3000 });
        assert!(job.expired);
    }

    #[tokio::test]
    async fn test_post_validates_before_sending() {
        let server = MockServer::start().await;
        let (ctx, mut board) = context(&server);
        let view = JobsView::new(ctx);

        let job: Job = serde_json::from_value(job_json("j-9", "u-1")).unwrap();
        let mut draft = job.to_draft();
        draft.description = "Too short".to_string();

        assert!(!view.post(&draft).await);
        assert_eq!(
            board.drain()[0].message,
            "Description must contain 30 to 500 characters"
        );
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job/j-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "job": job_json("j-3", "u-7") })))
            .mount(&server)
            .await;

        let (ctx, _board) = context(&server);
        let job = JobsView::new(ctx).details(&JobId::from_string("j-3")).await.unwrap();
        assert_eq!(job.salary, Salary::Fixed(1500));
        assert_eq!(job.owner_id.as_str(), "u-7");
    }
}
