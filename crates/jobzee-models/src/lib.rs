//! Shared data models for the JobZee client.
//!
//! This crate provides Serde-serializable types for:
//! - Users and their roles
//! - Job postings and salary shapes
//! - Job applications and resumes
//! - The client-side session record
//! - Request/response payloads of the job-board REST API

pub mod admin;
pub mod application;
pub mod auth;
pub mod error;
pub mod job;
pub mod session;
pub mod user;

// Re-export common types
pub use admin::DashboardStats;
pub use application::{Application, ApplicationDraft, ApplicationId, ApplicationsEnvelope, Resume, ResumeFile};
pub use auth::{
    LoginRequest, LoginResponse, MessageResponse, OtpRequest, ProfilePicture, ProfilePictureResponse,
    ProfileResponse, ProfileUpdate, RegisterForm, UpdatePasswordRequest, UserEnvelope, VerifyOtpRequest,
};
pub use error::{ModelError, ModelResult};
pub use job::{Job, JobDraft, JobEnvelope, JobId, JobsEnvelope, MyJobsEnvelope, Salary};
pub use session::Session;
pub use user::{Role, User, UserId};
