//! User accounts and roles.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ModelError;

/// Backend identifier of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role.
///
/// The backend sends these as free-form strings; anything outside this set
/// is rejected at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Role {
    #[serde(rename = "Job Seeker")]
    JobSeeker,
    Employer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::JobSeeker => "Job Seeker",
            Role::Employer => "Employer",
            Role::Admin => "Admin",
        }
    }

    pub fn is_employer(&self) -> bool {
        matches!(self, Role::Employer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Job Seeker" => Ok(Role::JobSeeker),
            "Employer" => Ok(Role::Employer),
            "Admin" => Ok(Role::Admin),
            other => Err(ModelError::UnknownRole(other.to_string())),
        }
    }
}

/// A user record as returned by `GET /user/getuser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Stored as a number by the backend; kept as text on the client.
    #[serde(default, deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub phone: String,
    pub role: Role,
    #[serde(
        rename = "profilePic",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_picture: Option<String>,
}

impl User {
    pub fn is_employer(&self) -> bool {
        self.role.is_employer()
    }
}

/// Accept either a JSON string or a JSON number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
