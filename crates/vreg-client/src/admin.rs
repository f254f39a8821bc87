//! Admin-only routes
//!
//! These require an admin session; a regular session gets a 403, which the
//! gateway surfaces as `ApiError::Forbidden` without attempting a refresh.

use crate::client::Client;
use crate::error::Result;
use crate::gateway::ApiRequest;
use vreg_core::{AdminReceipt, AdminStats, AdminVehicleList};

impl Client {
    pub async fn admin_stats(&self) -> Result<AdminStats> {
        self.gateway().fetch(&ApiRequest::get("/admin/stats/")).await
    }

    /// Every vehicle in the registry regardless of owner
    pub async fn admin_vehicles(&self) -> Result<AdminVehicleList> {
        self.gateway()
            .fetch(&ApiRequest::get("/admin/vehicles/"))
            .await
    }

    /// Mark a vehicle verified, activating its QR code
    pub async fn verify_vehicle(&self, id: i64) -> Result<AdminReceipt> {
        self.gateway()
            .fetch(&ApiRequest::patch(format!("/admin/vehicles/{}/verify/", id)))
            .await
    }

    /// Blacklist a vehicle, deactivating its QR code
    pub async fn blacklist_vehicle(&self, id: i64) -> Result<AdminReceipt> {
        self.gateway()
            .fetch(&ApiRequest::patch(format!(
                "/admin/vehicles/{}/blacklist/",
                id
            )))
            .await
    }

    /// Permanently delete a vehicle and its uploads
    pub async fn admin_delete_vehicle(&self, id: i64) -> Result<AdminReceipt> {
        self.gateway()
            .fetch(&ApiRequest::delete(format!(
                "/admin/vehicles/{}/delete/",
                id
            )))
            .await
    }
}
