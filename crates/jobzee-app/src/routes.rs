//! Route table.

use std::fmt;

use jobzee_models::JobId;

use crate::gate::Gate;

/// A screen of the application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Jobs,
    JobDetails(JobId),
    /// Application form for a job.
    Apply(JobId),
    MyApplications,
    PostJob,
    MyJobs,
    Profile,
    Admin,
    /// Unmatched path, kept as requested.
    NotFound(String),
}

impl Route {
    /// Match a path. Query strings, fragments and a trailing slash are ignored.
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["job", "getall"] => Route::Jobs,
            ["job", "post"] => Route::PostJob,
            ["job", "me"] => Route::MyJobs,
            ["job", id] => Route::JobDetails(JobId::from_string(*id)),
            ["application", id] => Route::Apply(JobId::from_string(*id)),
            ["applications", "me"] => Route::MyApplications,
            ["profile"] => Route::Profile,
            ["admin"] => Route::Admin,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Jobs => "/job/getall".to_string(),
            Route::JobDetails(id) => format!("/job/{}", id),
            Route::Apply(id) => format!("/application/{}", id),
            Route::MyApplications => "/applications/me".to_string(),
            Route::PostJob => "/job/post".to_string(),
            Route::MyJobs => "/job/me".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Who may see this screen.
    pub fn gate(&self) -> Gate {
        match self {
            Route::Home | Route::NotFound(_) => Gate::Public,
            Route::Login | Route::Register => Gate::GuestOnly,
            Route::Jobs | Route::JobDetails(_) | Route::MyApplications | Route::Profile => {
                Gate::Authenticated
            }
            Route::Apply(_) => Gate::NonEmployer,
            Route::PostJob | Route::MyJobs => Gate::EmployerOnly,
            Route::Admin => Gate::AdminOnly,
        }
    }

    /// Screens rendered without the header.
    pub fn hides_header(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
