//! Vehicle routes

use crate::client::Client;
use crate::error::Result;
use crate::gateway::ApiRequest;
use crate::multipart::FormSpec;
use vreg_core::{LogoDownload, Vehicle, VehicleForm, VehiclePhoto};

/// Multipart spec for a vehicle create or update
fn vehicle_form(form: &VehicleForm, photos: Vec<VehiclePhoto>) -> FormSpec {
    let mut spec = FormSpec::new()
        .text("registration_number", &form.registration_number)
        .text("make", &form.make)
        .text("model", &form.model)
        .text("year", form.year.to_string())
        .text("color", &form.color)
        .text("fuel_type", form.fuel_type.as_str())
        .text("engine_number", &form.engine_number)
        .text("chassis_number", &form.chassis_number)
        .maybe_text("owner_name", form.owner_name.as_deref())
        .maybe_text("owner_email", form.owner_email.as_deref())
        .maybe_text("owner_phone", form.owner_phone.as_deref())
        .maybe_text("owner_address", form.owner_address.as_deref())
        .text("insurance_expiry", form.insurance_expiry.to_string())
        .text(
            "pollution_certificate_expiry",
            form.pollution_certificate_expiry.to_string(),
        )
        .text("registration_date", form.registration_date.to_string());

    for photo in photos {
        spec = spec.file(photo.slot.field_name(), photo.file.file_name, photo.file.bytes);
    }
    spec
}

impl Client {
    /// Vehicles belonging to the signed-in account
    pub async fn vehicles(&self) -> Result<Vec<Vehicle>> {
        self.gateway().fetch(&ApiRequest::get("/vehicles/")).await
    }

    pub async fn vehicle(&self, id: i64) -> Result<Vehicle> {
        self.gateway()
            .fetch(&ApiRequest::get(format!("/vehicles/{}/", id)))
            .await
    }

    /// Register a vehicle; the backend generates its QR code
    pub async fn create_vehicle(
        &self,
        form: &VehicleForm,
        photos: Vec<VehiclePhoto>,
    ) -> Result<Vehicle> {
        let request = ApiRequest::post("/vehicles/").multipart(vehicle_form(form, photos));
        self.gateway().fetch(&request).await
    }

    pub async fn update_vehicle(
        &self,
        id: i64,
        form: &VehicleForm,
        photos: Vec<VehiclePhoto>,
    ) -> Result<Vehicle> {
        let request =
            ApiRequest::put(format!("/vehicles/{}/", id)).multipart(vehicle_form(form, photos));
        self.gateway().fetch(&request).await
    }

    pub async fn delete_vehicle(&self, id: i64) -> Result<()> {
        self.gateway()
            .execute(&ApiRequest::delete(format!("/vehicles/{}/", id)))
            .await?;
        Ok(())
    }

    /// Look up a vehicle by the unique id embedded in its QR code.
    ///
    /// The id is passed through as scanned; the backend decides whether it
    /// matches anything.
    pub async fn scan(&self, unique_id: &str) -> Result<Vehicle> {
        let request = ApiRequest::post("/vehicles/scan/")
            .json(serde_json::json!({ "unique_id": unique_id }));
        self.gateway().fetch(&request).await
    }

    /// Signed URL for a vehicle's logo image
    pub async fn vehicle_logo(&self, id: i64) -> Result<LogoDownload> {
        self.gateway()
            .fetch(&ApiRequest::get(format!("/vehicles/{}/download-logo/", id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use vreg_core::FuelType;

    #[test]
    fn test_vehicle_form_field_names() {
        let form = VehicleForm {
            registration_number: "KA01AB1234".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2021,
            color: "white".to_string(),
            fuel_type: FuelType::Petrol,
            engine_number: "EN1".to_string(),
            chassis_number: "CH1".to_string(),
            owner_name: Some("Ravi".to_string()),
            owner_email: None,
            owner_phone: Some(String::new()),
            owner_address: None,
            insurance_expiry: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            pollution_certificate_expiry: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            registration_date: NaiveDate::from_ymd_opt(2021, 3, 15).unwrap(),
        };

        let spec = vehicle_form(&form, vec![]);
        let names = spec.field_names();
        assert!(names.contains(&"registration_number"));
        assert!(names.contains(&"pollution_certificate_expiry"));
        assert!(names.contains(&"owner_name"));
        // Blank and missing owner fields are left out of the form
        assert!(!names.contains(&"owner_email"));
        assert!(!names.contains(&"owner_phone"));
    }
}
