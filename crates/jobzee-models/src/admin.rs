//! Admin dashboard figures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DashboardStats {
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub jobs: u64,
    #[serde(default)]
    pub applications: u64,
}
