//! Job applications.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::job::JobId;
use crate::user::string_or_number;

/// Resume formats accepted by the backend's upload handler.
pub const ALLOWED_RESUME_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// Backend identifier of an application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uploaded resume reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Resume {
    pub public_id: String,
    pub url: String,
}

/// A submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    #[serde(rename = "name")]
    pub applicant_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
    pub resume: Resume,
}

/// Resume file selected for upload.
///
/// Serializes as metadata only; the bytes travel as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFile {
    pub file_name: String,
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Form state of the "apply for job" view.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ApplicationDraft {
    pub job_id: JobId,
    #[validate(length(min = 3, max = 30, message = "Name must contain 3 to 30 characters"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please provide your phone number"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Please provide your address"))]
    pub address: String,
    #[validate(length(min = 1, message = "Please provide a cover letter"))]
    pub cover_letter: String,
    #[validate(custom(function = "validate_resume"))]
    pub resume: ResumeFile,
}

fn validate_resume(resume: &ResumeFile) -> Result<(), ValidationError> {
    if resume.bytes.is_empty() {
        return Err(ValidationError::new("resume").with_message("Resume file is required".into()));
    }
    if !ALLOWED_RESUME_MIME_TYPES.contains(&resume.mime_type.as_str()) {
        return Err(ValidationError::new("resume")
            .with_message("Invalid file type. Please upload a PNG, JPEG or WEBP file".into()));
    }
    Ok(())
}

/// Response of both application listing endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationsEnvelope {
    pub applications: Vec<Application>,
}
