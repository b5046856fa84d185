//! Typed endpoint methods, grouped by backend router.

pub mod admin;
pub mod applications;
pub mod jobs;
pub mod user;
