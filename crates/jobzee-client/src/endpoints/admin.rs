//! Admin endpoints.

use jobzee_models::DashboardStats;

use crate::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    /// Aggregate counts for the admin dashboard.
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get_json("dashboard_stats", "/admin/dashboard").await
    }
}
