//! Application root.

use jobzee_client::ApiClient;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::notice::{self, NoticeBoard};
use crate::routes::Route;
use crate::session::{ResolutionHandle, SessionStore};
use crate::shell::NavigationShell;
use crate::views::{
    self, AdminView, ApplicationsView, JobsView, LoginView, ProfileView, RegisterView, ViewContext,
};

/// Shared application state, built once at startup and handed to views.
#[derive(Clone)]
pub struct App {
    pub config: AppConfig,
    ctx: ViewContext,
}

impl App {
    /// Build the root and the board that receives its notices.
    pub fn new(config: AppConfig) -> AppResult<(Self, NoticeBoard)> {
        let client = ApiClient::new(config.client.clone())?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: AppConfig, client: ApiClient) -> (Self, NoticeBoard) {
        let (notifier, board) = notice::channel();
        let ctx = ViewContext::new(client, SessionStore::new(), notifier);
        info!(api = %ctx.client.base_url(), environment = %config.environment, "Application ready");
        (Self { config, ctx }, board)
    }

    pub fn session(&self) -> &SessionStore {
        &self.ctx.store
    }

    pub fn context(&self) -> &ViewContext {
        &self.ctx
    }

    /// Kick off the one startup resolution; the shell can render meanwhile.
    pub fn start(&self) -> ResolutionHandle {
        self.ctx.resolver.spawn()
    }

    pub fn shell(&self) -> NavigationShell {
        NavigationShell::new(self.ctx.store.clone())
    }

    pub fn login_view(&self) -> LoginView {
        LoginView::new(self.ctx.clone())
    }

    pub fn register_view(&self) -> RegisterView {
        RegisterView::new(self.ctx.clone())
    }

    pub fn jobs_view(&self) -> JobsView {
        JobsView::new(self.ctx.clone())
    }

    pub fn applications_view(&self) -> ApplicationsView {
        ApplicationsView::new(self.ctx.clone())
    }

    pub fn profile_view(&self) -> ProfileView {
        ProfileView::new(self.ctx.clone())
    }

    pub fn admin_view(&self) -> AdminView {
        AdminView::new(self.ctx.clone())
    }

    pub async fn logout(&self) -> Option<Route> {
        views::logout(&self.ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::session::ResolveOutcome;
    use crate::shell::{MenuEvent, MenuState};
    use crate::views::LoginForm;
    use jobzee_client::ClientConfig;
    use jobzee_models::Role;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(server: &MockServer) -> (App, NoticeBoard) {
        let config = AppConfig {
            client: ClientConfig::default().with_base_url(server.uri()),
            ..AppConfig::default()
        };
        App::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_returning_employer_is_held_then_sees_employer_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/getuser"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {
                    "_id": "u-1",
                    "name": "Ada",
                    "email": "ada@example.com",
                    "phone": "1",
                    "role": "Employer",
                    "profilePic": "https://cdn.example.com/ada.png"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (app, mut board) = app_for(&server);
        let mut shell = app.shell();

        let nav = shell.navigate("/job/me");
        assert!(nav.held, "must not bounce before the session resolves");

        assert_eq!(app.start().join().await, ResolveOutcome::Authenticated);
        let nav = shell.refresh();
        assert!(nav.rendered());
        assert_eq!(nav.route, Route::MyJobs);

        let labels = shell.header().unwrap().labels();
        assert!(labels.contains(&"Post New Job"));
        assert!(labels.contains(&"View Your Jobs"));
        assert!(!labels.contains(&"My Applications"));
        assert!(board.drain().is_empty(), "resolution never notifies");
    }

    #[tokio::test]
    async fn test_anonymous_visitor_is_sent_to_login_silently() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/getuser"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "User Not Authorized"
            })))
            .mount(&server)
            .await;

        let (app, mut board) = app_for(&server);
        app.start().join().await;

        let mut shell = app.shell();
        let nav = shell.navigate("/applications/me");
        assert_eq!(nav.route, Route::Login);
        assert!(shell.header().is_none());
        assert!(board.drain().is_empty());
    }

    #[tokio::test]
    async fn test_logout_then_navigation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/getuser"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": { "_id": "u-2", "name": "Bo", "email": "bo@example.com", "role": "Job Seeker" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Logged Out Successfully." })))
            .mount(&server)
            .await;

        let (app, _board) = app_for(&server);
        app.start().join().await;
        assert_eq!(app.session().get().role(), Some(Role::JobSeeker));

        let mut shell = app.shell();
        shell.navigate("/profile");
        shell.menu_event(MenuEvent::Toggle);

        let next = app.logout().await.unwrap();
        let nav = shell.navigate(&next.path());
        assert_eq!(nav.route, Route::Login);
        assert_eq!(shell.menu(), MenuState::Closed);
        assert!(!app.session().get().is_authenticated());
    }
    #[tokio::test]
    async fn test_login_while_startup_resolution_is_pending() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/getuser"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_delay(Duration::from_millis(300))
                    .set_body_json(json!({ "message": "User Not Authorized" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/getuser"))
            .and(header("cookie", "token=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": { "_id": "u-3", "name": "Cy", "email": "cy@example.com", "role": "Employer" }
            })))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "token=abc123; Path=/; HttpOnly")
                    .set_body_json(json!({ "message": "User Logged In!" })),
            )
            .mount(&server)
            .await;

        let (app, mut board) = app_for(&server);
        let startup = app.start();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let next = app
            .login_view()
            .submit(&LoginForm {
                email: "cy@example.com".to_string(),
                password: "secret".to_string(),
                role: Some(Role::Employer),
            })
            .await;
        assert_eq!(next, Some(Route::Home));
        assert_eq!(app.session().get().role(), Some(Role::Employer));

        assert_eq!(startup.join().await, ResolveOutcome::Discarded);
        assert_eq!(app.session().get().role(), Some(Role::Employer));

        let messages: Vec<String> = board.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["Login successful!".to_string()]);
    }
}
