//! Dashboard aggregate routes

use crate::client::Client;
use crate::error::Result;
use crate::gateway::ApiRequest;
use vreg_core::{AlertsSummary, DashboardStats, ExpiryAlert, MyVehicle};

impl Client {
    /// Counter cards for the dashboard header
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.gateway()
            .fetch(&ApiRequest::get("/dashboard/stats/"))
            .await
    }

    /// Per-vehicle expiry rows, worst status first as ordered by the backend
    pub async fn expiry_alerts(&self) -> Result<Vec<ExpiryAlert>> {
        self.gateway()
            .fetch(&ApiRequest::get("/dashboard/expiries/"))
            .await
    }

    pub async fn my_vehicles(&self) -> Result<Vec<MyVehicle>> {
        self.gateway()
            .fetch(&ApiRequest::get("/dashboard/my-vehicles/"))
            .await
    }

    /// Alerts bucketed by urgency (this week, this month, already expired)
    pub async fn alerts_summary(&self) -> Result<AlertsSummary> {
        self.gateway()
            .fetch(&ApiRequest::get("/dashboard/alerts-summary/"))
            .await
    }
}
