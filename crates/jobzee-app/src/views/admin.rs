//! Admin dashboard.

use jobzee_models::DashboardStats;

use super::ViewContext;

pub struct AdminView {
    ctx: ViewContext,
}

impl AdminView {
    pub fn new(ctx: ViewContext) -> Self {
        Self { ctx }
    }

    pub async fn stats(&self) -> Option<DashboardStats> {
        let result = self.ctx.client.dashboard_stats().await.map_err(Into::into);
        self.ctx
            .notifier
            .settle(result, "Failed to load dashboard stats")
    }
}
