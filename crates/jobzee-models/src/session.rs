//! Client-side session record.

use serde::Serialize;

use crate::user::{Role, User};

/// Whether someone is logged in on this client and who they are.
///
/// Fields are private: the three constructors are the only way to build a
/// session, so an authenticated session always carries its user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    authenticated: bool,
    user: Option<User>,
    loading: bool,
}

impl Session {
    /// Initial state at application start, before the backend has answered.
    pub fn loading() -> Self {
        Self {
            authenticated: false,
            user: None,
            loading: true,
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
            loading: false,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            user: None,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Role of the logged-in user, if any.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}
