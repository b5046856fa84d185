//! Client session state and its resolution against the backend.

mod resolver;
mod store;

pub use resolver::{ResolutionHandle, ResolveOutcome, SessionResolver};
pub use store::{SessionStore, SessionSubscription};
