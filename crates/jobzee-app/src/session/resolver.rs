//! Remote session resolution.
//!
//! One "who am I" call per resolution, never retried. Any failure means
//! "not logged in" and is only logged.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use jobzee_client::SessionApi;
use jobzee_models::Session;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::store::SessionStore;

/// What a resolution did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Authenticated,
    Unauthenticated,
    /// Abandoned, overtaken by a later resolution, or the store was written
    /// after the request went out.
    Discarded,
}

/// Bridges ambient credentials and the [`SessionStore`].
#[derive(Clone)]
pub struct SessionResolver {
    api: Arc<dyn SessionApi>,
    store: SessionStore,
}

impl SessionResolver {
    pub fn new(api: Arc<dyn SessionApi>, store: SessionStore) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Ask the backend who we are and record the answer.
    pub async fn resolve(&self) -> ResolveOutcome {
        self.run(None).await
    }

    /// Resolve in the background; rendering does not wait for it.
    pub fn spawn(&self) -> ResolutionHandle {
        let abandoned = Arc::new(AtomicBool::new(false));
        let resolver = self.clone();
        let flag = Arc::clone(&abandoned);
        let task = tokio::spawn(async move { resolver.run(Some(flag)).await });

        ResolutionHandle { abandoned, task }
    }

    async fn run(&self, abandoned: Option<Arc<AtomicBool>>) -> ResolveOutcome {
        let ticket = self.store.begin_resolution();

        let (session, outcome) = match self.api.current_user().await {
            Ok(user) => {
                info!(user_id = %user.id, role = %user.role, "Session resolved");
                (Session::authenticated(user), ResolveOutcome::Authenticated)
            }
            Err(e) => {
                debug!(error = %e, "No session");
                (Session::unauthenticated(), ResolveOutcome::Unauthenticated)
            }
        };

        let still_wanted = || {
            abandoned
                .as_ref()
                .map_or(true, |flag| !flag.load(Ordering::SeqCst))
        };

        if self.store.land_resolution(ticket, session, still_wanted) {
            outcome
        } else {
            debug!(ticket = ticket.number(), "Dropping late session resolution");
            ResolveOutcome::Discarded
        }
    }
}

/// Handle on a background resolution.
///
/// Dropping the handle does not cancel anything; call
/// [`abandon`](Self::abandon) when the result is no longer wanted.
#[derive(Debug)]
pub struct ResolutionHandle {
    abandoned: Arc<AtomicBool>,
    task: JoinHandle<ResolveOutcome>,
}

impl ResolutionHandle {
    /// The response, whenever it arrives, must not touch the store.
    pub fn abandon(&self) {
        self.abandoned.store(true, Ordering::SeqCst);
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the resolution to finish.
    pub async fn join(self) -> ResolveOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Session resolution task failed");
                ResolveOutcome::Discarded
            }
        }
    }
}
