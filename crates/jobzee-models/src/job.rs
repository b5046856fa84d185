//! Job postings.

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::{Validate, ValidationError};

use crate::error::{ModelError, ModelResult};
use crate::user::UserId;

/// Backend identifier of a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Salary offered for a job.
///
/// On the wire a job carries either `fixedSalary` or the pair
/// `salaryFrom`/`salaryTo`, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Salary {
    Fixed(u64),
    Range { from: u64, to: u64 },
}

impl Salary {
    /// Create a ranged salary, rejecting inverted bounds.
    pub fn range(from: u64, to: u64) -> ModelResult<Self> {
        if from > to {
            return Err(ModelError::InvalidSalary(format!(
                "salary range is inverted ({} > {})",
                from, to
            )));
        }
        Ok(Salary::Range { from, to })
    }

    /// Human-readable form used in listings.
    pub fn describe(&self) -> String {
        match self {
            Salary::Fixed(amount) => amount.to_string(),
            Salary::Range { from, to } => format!("{} - {}", from, to),
        }
    }
}

/// Flat wire representation of [`Salary`].
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SalaryFields {
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    fixed_salary: Option<u64>,
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    salary_from: Option<u64>,
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    salary_to: Option<u64>,
}

impl From<Salary> for SalaryFields {
    fn from(salary: Salary) -> Self {
        match salary {
            Salary::Fixed(amount) => Self {
                fixed_salary: Some(amount),
                ..Default::default()
            },
            Salary::Range { from, to } => Self {
                salary_from: Some(from),
                salary_to: Some(to),
                ..Default::default()
            },
        }
    }
}

impl TryFrom<SalaryFields> for Salary {
    type Error = ModelError;

    fn try_from(fields: SalaryFields) -> ModelResult<Self> {
        match (fields.fixed_salary, fields.salary_from, fields.salary_to) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ModelError::InvalidSalary(
                "cannot combine a fixed salary with a salary range".to_string(),
            )),
            (Some(amount), None, None) => Ok(Salary::Fixed(amount)),
            (None, Some(from), Some(to)) => Salary::range(from, to),
            _ => Err(ModelError::InvalidSalary(
                "either a fixed salary or a full salary range is required".to_string(),
            )),
        }
    }
}

impl Serialize for Salary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SalaryFields::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Salary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = SalaryFields::deserialize(deserializer)?;
        Salary::try_from(fields).map_err(D::Error::custom)
    }
}

/// Amounts arrive as numbers from the backend but as strings from form
/// submissions; an empty string means "not set".
fn opt_amount<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Float(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Float(f)) if f >= 0.0 && f.fract() == 0.0 => Ok(Some(f as u64)),
        Some(Raw::Float(f)) => Err(D::Error::custom(format!("invalid salary amount {}", f))),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid salary amount '{}'", s))),
    }
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub country: String,
    pub city: String,
    pub location: String,
    #[serde(flatten)]
    pub salary: Salary,
    #[serde(rename = "jobPostedOn")]
    pub posted_on: DateTime<Utc>,
    #[serde(rename = "postedBy")]
    pub owner_id: UserId,
    #[serde(default)]
    pub expired: bool,
}

impl Job {
    /// True if the given user posted this job.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    /// Editable fields of this job, for the update form.
    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            location: self.location.clone(),
            salary: self.salary,
            expired: Some(self.expired),
        }
    }
}

/// Body of `POST /job/post` and `PUT /job/update/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_salary"))]
pub struct JobDraft {
    #[validate(length(min = 3, max = 30, message = "Job title must contain 3 to 30 characters"))]
    pub title: String,
    #[validate(length(min = 30, max = 500, message = "Description must contain 30 to 500 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "Please provide a category"))]
    pub category: String,
    #[validate(length(min = 1, message = "Please provide a country"))]
    pub country: String,
    #[validate(length(min = 1, message = "Please provide a city"))]
    pub city: String,
    #[validate(length(min = 1, message = "Please provide a location"))]
    pub location: String,
    #[serde(flatten)]
    pub salary: Salary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

fn validate_salary(draft: &JobDraft) -> Result<(), ValidationError> {
    match draft.salary {
        Salary::Fixed(0) => {
            Err(ValidationError::new("salary").with_message("Fixed salary must be positive".into()))
        }
        Salary::Range { from, to } if from > to => Err(ValidationError::new("salary")
            .with_message("Salary range must start below its upper bound".into())),
        _ => Ok(()),
    }
}

/// Response of `GET /job/getall`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobsEnvelope {
    pub jobs: Vec<Job>,
}

/// Response of `GET /job/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobEnvelope {
    pub job: Job,
}

/// Response of `GET /job/getmyjobs`.
#[derive(Debug, Clone, Deserialize)]
pub struct MyJobsEnvelope {
    #[serde(rename = "myJobs")]
    pub my_jobs: Vec<Job>,
}
