//! Wire types for the vehicle registry API
//!
//! Field names and shapes follow the backend's JSON representations; photo
//! and QR fields are absolute URLs or null, expiry fields are plain dates.

use crate::expiry::{self, ExpiryStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fuel types accepted by the registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
    Cng,
}

impl FuelType {
    /// Get all accepted fuel types
    pub fn all() -> &'static [FuelType] {
        &[
            FuelType::Petrol,
            FuelType::Diesel,
            FuelType::Electric,
            FuelType::Hybrid,
            FuelType::Cng,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "petrol",
            FuelType::Diesel => "diesel",
            FuelType::Electric => "electric",
            FuelType::Hybrid => "hybrid",
            FuelType::Cng => "cng",
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown fuel type '{0}' (expected petrol, diesel, electric, hybrid or cng)")]
pub struct ParseFuelTypeError(String);

impl std::str::FromStr for FuelType {
    type Err = ParseFuelTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "petrol" => Ok(FuelType::Petrol),
            "diesel" => Ok(FuelType::Diesel),
            "electric" => Ok(FuelType::Electric),
            "hybrid" => Ok(FuelType::Hybrid),
            "cng" => Ok(FuelType::Cng),
            other => Err(ParseFuelTypeError(other.to_string())),
        }
    }
}

/// A registered vehicle as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    /// Stable lookup key encoded in the vehicle's QR code
    pub unique_id: Uuid,
    pub registration_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub fuel_type: FuelType,
    pub engine_number: String,
    pub chassis_number: String,
    /// Account that owns the record (read-only, set by the backend)
    pub owner_username: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub owner_email: String,
    #[serde(default)]
    pub owner_phone: String,
    #[serde(default)]
    pub owner_address: String,
    #[serde(default)]
    pub owner_photo: Option<String>,
    pub insurance_expiry: NaiveDate,
    pub pollution_certificate_expiry: NaiveDate,
    pub registration_date: NaiveDate,
    #[serde(default)]
    pub front_photo: Option<String>,
    #[serde(default)]
    pub back_photo: Option<String>,
    #[serde(default)]
    pub side_photo: Option<String>,
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn make_model(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// Insurance document status as of `on`
    pub fn insurance_status(&self, on: NaiveDate) -> ExpiryStatus {
        expiry::classify(self.insurance_expiry, on)
    }

    /// Pollution certificate status as of `on`
    pub fn pollution_status(&self, on: NaiveDate) -> ExpiryStatus {
        expiry::classify(self.pollution_certificate_expiry, on)
    }

    /// Worst of the two document statuses as of `on`
    pub fn overall_status(&self, on: NaiveDate) -> ExpiryStatus {
        self.insurance_status(on).worst(self.pollution_status(on))
    }
}

/// A vehicle owner contact record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============== Form payloads (multipart submissions) ===============

/// Fields for creating or updating a vehicle.
///
/// Photos travel separately as [`VehiclePhoto`] attachments; blank optional
/// fields are omitted from the submission entirely.
#[derive(Debug, Clone)]
pub struct VehicleForm {
    pub registration_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub fuel_type: FuelType,
    pub engine_number: String,
    pub chassis_number: String,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub owner_phone: Option<String>,
    pub owner_address: Option<String>,
    pub insurance_expiry: NaiveDate,
    pub pollution_certificate_expiry: NaiveDate,
    pub registration_date: NaiveDate,
}

/// An image file attached to a form submission
#[derive(Debug, Clone)]
pub struct PhotoFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Which photo field of a vehicle an upload fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehiclePhotoSlot {
    Front,
    Back,
    Side,
    Owner,
}

impl VehiclePhotoSlot {
    /// Multipart field name the backend expects for this slot
    pub fn field_name(&self) -> &'static str {
        match self {
            VehiclePhotoSlot::Front => "front_photo",
            VehiclePhotoSlot::Back => "back_photo",
            VehiclePhotoSlot::Side => "side_photo",
            VehiclePhotoSlot::Owner => "owner_photo",
        }
    }
}

#[derive(Debug, Clone)]
pub struct VehiclePhoto {
    pub slot: VehiclePhotoSlot,
    pub file: PhotoFile,
}

/// Fields for creating or updating an owner record
#[derive(Debug, Clone)]
pub struct OwnerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Fields for the account registration form
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

// =============== Account responses ===============

#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupReceipt {
    pub message: String,
    pub user: RegisteredUser,
}

/// Current account profile from `GET /profile/`
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub photo: Option<String>,
}

// =============== Dashboard responses ===============

/// Overview counters for the dashboard cards
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardStats {
    pub total_vehicles: i64,
    pub expiring_soon_count: i64,
    pub expired_count: i64,
    pub active_qr_count: i64,
}

/// One row of the expiry alerts table.
///
/// Statuses and day counts are computed by the backend with the same rules
/// as [`crate::expiry::classify`].
#[derive(Debug, Clone, Deserialize)]
pub struct ExpiryAlert {
    pub id: i64,
    pub vehicle_number: String,
    pub insurance_expiry: NaiveDate,
    pub pollution_certificate_expiry: NaiveDate,
    pub insurance_status: ExpiryStatus,
    pub pollution_status: ExpiryStatus,
    pub overall_status: ExpiryStatus,
    #[serde(default)]
    pub insurance_days_remaining: Option<i64>,
    #[serde(default)]
    pub pollution_days_remaining: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum QrStatus {
    Active,
    Inactive,
}

impl QrStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, QrStatus::Active)
    }
}

/// Compact vehicle entry for the "my vehicles" dashboard list
#[derive(Debug, Clone, Deserialize)]
pub struct MyVehicle {
    pub id: i64,
    pub vehicle_number: String,
    pub make_model: String,
    pub qr_status: QrStatus,
    #[serde(default)]
    pub qr_download_url: Option<String>,
    #[serde(default)]
    pub logo_download_url: Option<String>,
    #[serde(default)]
    pub public_page_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertCounts {
    pub this_week: i64,
    pub this_month: i64,
    pub expired: i64,
}

/// Urgency buckets from `GET /dashboard/alerts-summary/`
#[derive(Debug, Clone, Deserialize)]
pub struct AlertsSummary {
    pub expiring_this_week: Vec<ExpiryAlert>,
    pub expiring_this_month: Vec<ExpiryAlert>,
    pub already_expired: Vec<ExpiryAlert>,
    pub counts: AlertCounts,
}

// =============== Admin responses ===============

#[derive(Debug, Clone, Deserialize)]
pub struct AdminStats {
    pub total_vehicles: i64,
    pub total_users: i64,
    pub recent_vehicles: Vec<Vehicle>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminVehicleList {
    pub count: i64,
    pub vehicles: Vec<Vehicle>,
}

/// Acknowledgement body for admin verify/blacklist/delete actions
#[derive(Debug, Clone, Deserialize)]
pub struct AdminReceipt {
    pub message: String,
    #[serde(default)]
    pub vehicle_id: Option<i64>,
}

/// Body of `GET /vehicles/{id}/download-logo/`
#[derive(Debug, Clone, Deserialize)]
pub struct LogoDownload {
    pub logo_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle_json() -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "unique_id": "3f6c0a4e-0a6b-4c8e-9d8e-2b5f6a7c8d9e",
            "registration_number": "KA01AB1234",
            "make": "Toyota",
            "model": "Camry",
            "year": 2021,
            "color": "white",
            "fuel_type": "petrol",
            "engine_number": "EN123",
            "chassis_number": "CH456",
            "owner_username": "ravi",
            "owner_name": "",
            "owner_email": "",
            "owner_phone": "",
            "owner_address": "",
            "owner_photo": null,
            "insurance_expiry": "2026-10-01",
            "pollution_certificate_expiry": "2026-09-01",
            "registration_date": "2021-03-15",
            "front_photo": "https://cdn.example.com/front.jpg",
            "back_photo": null,
            "side_photo": null,
            "qr_code": "https://cdn.example.com/qr.png",
            "logo": null,
            "created_at": "2024-01-15T10:30:00.123456Z",
            "updated_at": "2024-01-16T08:00:00Z"
        })
    }

    #[test]
    fn test_vehicle_deserializes_from_api_shape() {
        let vehicle: Vehicle = serde_json::from_value(sample_vehicle_json()).unwrap();
        assert_eq!(vehicle.id, 7);
        assert_eq!(vehicle.fuel_type, FuelType::Petrol);
        assert_eq!(vehicle.make_model(), "Toyota Camry");
        assert_eq!(
            vehicle.insurance_expiry,
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
        );
        assert!(vehicle.back_photo.is_none());
        assert_eq!(vehicle.qr_code.as_deref(), Some("https://cdn.example.com/qr.png"));
    }

    #[test]
    fn test_vehicle_status_scenarios() {
        let mut vehicle: Vehicle = serde_json::from_value(sample_vehicle_json()).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        vehicle.insurance_expiry = today - chrono::Duration::days(1);
        assert_eq!(vehicle.insurance_status(today), ExpiryStatus::Red);

        vehicle.insurance_expiry = today + chrono::Duration::days(15);
        assert_eq!(vehicle.insurance_status(today), ExpiryStatus::Yellow);

        vehicle.insurance_expiry = today + chrono::Duration::days(45);
        assert_eq!(vehicle.insurance_status(today), ExpiryStatus::Green);

        // Overall takes the worse document
        vehicle.pollution_certificate_expiry = today;
        assert_eq!(vehicle.overall_status(today), ExpiryStatus::Red);
    }

    #[test]
    fn test_fuel_type_parse_and_display() {
        assert_eq!("CNG".parse::<FuelType>().unwrap(), FuelType::Cng);
        assert_eq!(FuelType::Diesel.to_string(), "diesel");
        assert!("steam".parse::<FuelType>().is_err());
        assert_eq!(FuelType::all().len(), 5);
    }

    #[test]
    fn test_photo_slot_field_names() {
        assert_eq!(VehiclePhotoSlot::Front.field_name(), "front_photo");
        assert_eq!(VehiclePhotoSlot::Back.field_name(), "back_photo");
        assert_eq!(VehiclePhotoSlot::Side.field_name(), "side_photo");
        assert_eq!(VehiclePhotoSlot::Owner.field_name(), "owner_photo");
    }

    #[test]
    fn test_my_vehicle_qr_status() {
        let entry: MyVehicle = serde_json::from_value(serde_json::json!({
            "id": 1,
            "vehicle_number": "KA01AB1234",
            "make_model": "Toyota Camry",
            "qr_status": "Active",
            "qr_download_url": "https://cdn.example.com/qr.png",
            "logo_download_url": null,
            "public_page_url": null
        }))
        .unwrap();
        assert!(entry.qr_status.is_active());
    }

    #[test]
    fn test_expiry_alert_statuses_parse() {
        let alert: ExpiryAlert = serde_json::from_value(serde_json::json!({
            "id": 3,
            "vehicle_number": "KA01AB1234",
            "insurance_expiry": "2025-01-01",
            "pollution_certificate_expiry": "2025-02-01",
            "insurance_status": "red",
            "pollution_status": "yellow",
            "overall_status": "red",
            "insurance_days_remaining": -4,
            "pollution_days_remaining": 27
        }))
        .unwrap();
        assert_eq!(alert.overall_status, ExpiryStatus::Red);
        assert_eq!(alert.pollution_days_remaining, Some(27));
    }
}
