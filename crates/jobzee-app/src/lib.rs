//! JobZee client application core.
//!
//! This crate provides:
//! - A process-wide session store and the remote session resolver
//! - Role gates and the route table
//! - The navigation shell (header, mobile menu)
//! - View controllers over the REST client, reporting through notices

pub mod config;
pub mod error;
pub mod gate;
pub mod notice;
pub mod routes;
pub mod session;
pub mod shell;
pub mod state;
pub mod views;

pub use config::{AppConfig, LogFormat};
pub use error::{AppError, AppResult};
pub use gate::{Gate, GateDecision};
pub use notice::{Notice, NoticeBoard, NoticeLevel, Notifier};
pub use routes::Route;
pub use session::{ResolutionHandle, ResolveOutcome, SessionResolver, SessionStore};
pub use shell::{Header, HeaderAction, MenuEvent, MenuState, NavLink, Navigation, NavigationShell};
pub use state::App;
