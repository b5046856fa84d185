//! Role gates.
//!
//! A gate is checked against the current session snapshot before a screen
//! is entered and yields a routing decision; it never navigates itself.

use jobzee_models::{Role, Session};

use crate::routes::Route;

/// Predicate a session must satisfy to see a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Public,
    Authenticated,
    EmployerOnly,
    /// Authenticated, any role except Employer.
    NonEmployer,
    AdminOnly,
    /// Only when nobody is logged in (login, registration).
    GuestOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render,
    /// Session still resolving; show a neutral placeholder.
    Hold,
    Redirect(Route),
}

impl Gate {
    pub fn check(self, session: &Session) -> GateDecision {
        if self == Gate::Public {
            return GateDecision::Render;
        }
        // Deciding now would bounce a returning user before the backend answers.
        if session.is_loading() {
            return GateDecision::Hold;
        }

        let role = match (self, session.role()) {
            (Gate::GuestOnly, Some(_)) => return GateDecision::Redirect(Route::Home),
            (Gate::GuestOnly, None) => return GateDecision::Render,
            (_, None) => return GateDecision::Redirect(Route::Login),
            (_, Some(role)) => role,
        };

        if self.admits(role) {
            GateDecision::Render
        } else {
            GateDecision::Redirect(Route::Home)
        }
    }

    fn admits(self, role: Role) -> bool {
        match self {
            Gate::Public | Gate::Authenticated => true,
            Gate::EmployerOnly => role == Role::Employer,
            Gate::NonEmployer => role != Role::Employer,
            Gate::AdminOnly => role == Role::Admin,
            Gate::GuestOnly => false,
        }
    }
}
