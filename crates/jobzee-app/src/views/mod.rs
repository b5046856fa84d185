//! View controllers.
//!
//! Each view is a thin controller over the REST client. Failures are turned
//! into notices at the call site; public methods report success as `bool`
//! or `Option` and never return errors.

mod admin;
mod applications;
mod auth;
mod jobs;
mod profile;
mod register;

use std::sync::Arc;

use jobzee_client::{ApiClient, SessionApi};

use crate::notice::Notifier;
use crate::session::{SessionResolver, SessionStore};

pub use admin::AdminView;
pub use applications::ApplicationsView;
pub use auth::{logout, LoginForm, LoginView, PasswordReset, ResetStep};
pub use jobs::JobsView;
pub use profile::ProfileView;
pub use register::RegisterView;

/// Everything a view needs, injected from the application root.
#[derive(Clone)]
pub struct ViewContext {
    pub client: ApiClient,
    pub session_api: Arc<dyn SessionApi>,
    pub store: SessionStore,
    pub resolver: SessionResolver,
    pub notifier: Notifier,
}

impl ViewContext {
    pub fn new(client: ApiClient, store: SessionStore, notifier: Notifier) -> Self {
        let session_api: Arc<dyn SessionApi> = Arc::new(client.clone());
        let resolver = SessionResolver::new(Arc::clone(&session_api), store.clone());
        Self {
            client,
            session_api,
            store,
            resolver,
            notifier,
        }
    }
}

/// The backend's message when it sent one, `fallback` otherwise.
fn message_or(message: &str, fallback: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}
