//! REST client for the JobZee job-board backend.
//!
//! This crate provides:
//! - A cookie-session HTTP client (the session cookie is replayed on every call)
//! - Typed methods for the user, job, application and admin endpoints
//! - A failure taxonomy that maps onto user-facing notifications
//! - An in-flight guard that collapses concurrent identical GETs
//! - Observability (tracing spans, metrics)

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod inflight;
pub mod metrics;
pub mod session_api;


pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use inflight::InFlight;
pub use session_api::SessionApi;
