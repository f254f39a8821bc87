//! Vehicle commands

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use vreg_core::{expiry, FuelType, Vehicle, VehicleForm, VehiclePhoto, VehiclePhotoSlot};

use super::auth::read_photo;

pub async fn list() -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Fetching vehicles...");
    let result = client.vehicles().await;
    pb.finish_and_clear();
    let vehicles = result?;

    println!("{}", "🚗 Your Vehicles".blue().bold());
    println!();

    if vehicles.is_empty() {
        println!("   (No vehicles registered)");
        println!();
        println!("   Add one with: {}", "vreg vehicle add".dimmed());
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    for vehicle in &vehicles {
        println!(
            "   [{}] {} - {} ({})",
            vehicle.id,
            vehicle.registration_number.cyan(),
            vehicle.make_model(),
            super::paint_status(vehicle.overall_status(today))
        );
    }
    println!();
    println!("   {} vehicle(s)", vehicles.len());

    Ok(())
}

pub async fn show(id: i64) -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Fetching vehicle...");
    let result = client.vehicle(id).await;
    pb.finish_and_clear();
    let vehicle = result?;

    print_vehicle(&vehicle);
    Ok(())
}

pub async fn add() -> Result<()> {
    println!("{}", "🚗 Register a new vehicle".blue().bold());
    println!();

    let form = prompt_vehicle_form(None)?;
    let photos = prompt_photos()?;

    println!();
    let client = super::client()?;
    let pb = super::spinner("Registering vehicle...");
    let result = client.create_vehicle(&form, photos).await;
    pb.finish_and_clear();
    let vehicle = result?;

    println!(
        "{}",
        format!("✅ Vehicle {} registered", vehicle.registration_number)
            .green()
            .bold()
    );
    println!();
    println!("   ID:        {}", vehicle.id);
    println!("   QR id:     {}", vehicle.unique_id.to_string().dimmed());
    println!(
        "   {}",
        "The QR code activates once an admin verifies the vehicle.".dimmed()
    );
    Ok(())
}

pub async fn update(id: i64) -> Result<()> {
    let client = super::client()?;
    let current = client.vehicle(id).await?;

    println!(
        "{}",
        format!("✏️  Update {} (enter keeps the current value)", current.registration_number)
            .blue()
            .bold()
    );
    println!();

    let form = prompt_vehicle_form(Some(&current))?;
    let photos = prompt_photos()?;

    println!();
    let pb = super::spinner("Saving...");
    let result = client.update_vehicle(id, &form, photos).await;
    pb.finish_and_clear();
    let vehicle = result?;

    println!(
        "{}",
        format!("✅ Vehicle {} updated", vehicle.registration_number).green()
    );
    Ok(())
}

pub async fn delete(id: i64) -> Result<()> {
    let client = super::client()?;
    let vehicle = client.vehicle(id).await?;

    let confirm: bool = dialoguer::Confirm::new()
        .with_prompt(format!(
            "Delete vehicle '{}'? This cannot be undone.",
            vehicle.registration_number
        ))
        .default(false)
        .interact()?;
    if !confirm {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    client.delete_vehicle(id).await?;
    println!(
        "{}",
        format!("✅ Vehicle '{}' deleted", vehicle.registration_number).green()
    );
    Ok(())
}

pub async fn scan(unique_id: &str) -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Looking up QR code...");
    let result = client.scan(unique_id).await;
    pb.finish_and_clear();
    let vehicle = result?;

    println!("{}", "📷 QR code matched".green().bold());
    println!();
    print_vehicle(&vehicle);
    Ok(())
}

pub async fn logo(id: i64) -> Result<()> {
    let client = super::client()?;
    let download = client.vehicle_logo(id).await?;
    println!("{} {}", "✓".green(), "Logo ready".bold());
    println!("   {}", download.logo_url.cyan());
    Ok(())
}

pub(crate) fn print_vehicle(vehicle: &Vehicle) {
    let today = chrono::Local::now().date_naive();

    println!(
        "{}",
        format!("🚗 {} - {}", vehicle.registration_number, vehicle.make_model())
            .blue()
            .bold()
    );
    println!();
    println!("   Year:       {}", vehicle.year);
    println!("   Color:      {}", vehicle.color);
    println!("   Fuel:       {}", vehicle.fuel_type);
    println!("   Engine no:  {}", vehicle.engine_number);
    println!("   Chassis no: {}", vehicle.chassis_number);
    println!("   Registered: {}", vehicle.registration_date);
    println!("   Account:    {}", vehicle.owner_username.cyan());
    if !vehicle.owner_name.is_empty() {
        println!("   Owner:      {}", vehicle.owner_name);
    }
    if !vehicle.owner_phone.is_empty() {
        println!("   Phone:      {}", vehicle.owner_phone);
    }
    println!();

    let insurance = vehicle.insurance_status(today);
    let pollution = vehicle.pollution_status(today);
    println!(
        "   Insurance: {} ({}, {})",
        super::paint_status(insurance),
        vehicle.insurance_expiry,
        expiry::format_days_remaining(expiry::days_remaining(vehicle.insurance_expiry, today))
    );
    println!(
        "   Pollution: {} ({}, {})",
        super::paint_status(pollution),
        vehicle.pollution_certificate_expiry,
        expiry::format_days_remaining(expiry::days_remaining(
            vehicle.pollution_certificate_expiry,
            today
        ))
    );
    println!(
        "   Overall:   {}",
        super::paint_status(vehicle.overall_status(today))
    );

    if let Some(ref qr) = vehicle.qr_code {
        println!();
        println!("   QR code: {}", qr.dimmed());
    }
}

/// Prompt every vehicle field, seeding defaults from `current` on update
fn prompt_vehicle_form(current: Option<&Vehicle>) -> Result<VehicleForm> {
    let registration_number: String = text_prompt(
        "Registration number",
        current.map(|v| v.registration_number.clone()),
    )?;
    let make: String = text_prompt("Make", current.map(|v| v.make.clone()))?;
    let model: String = text_prompt("Model", current.map(|v| v.model.clone()))?;

    let year: i32 = match current {
        Some(v) => dialoguer::Input::new()
            .with_prompt("Year")
            .default(v.year)
            .interact_text()?,
        None => dialoguer::Input::new().with_prompt("Year").interact_text()?,
    };

    let color: String = text_prompt("Color", current.map(|v| v.color.clone()))?;

    let fuel_types = FuelType::all();
    let initial = current
        .map(|v| fuel_types.iter().position(|f| *f == v.fuel_type).unwrap_or(0))
        .unwrap_or(0);
    let fuel_index = dialoguer::Select::new()
        .with_prompt("Fuel type")
        .items(fuel_types)
        .default(initial)
        .interact()?;
    let fuel_type = fuel_types[fuel_index];

    let engine_number: String =
        text_prompt("Engine number", current.map(|v| v.engine_number.clone()))?;
    let chassis_number: String =
        text_prompt("Chassis number", current.map(|v| v.chassis_number.clone()))?;

    let owner_name = optional_prompt("Owner name", current.map(|v| v.owner_name.clone()))?;
    let owner_email = optional_prompt("Owner email", current.map(|v| v.owner_email.clone()))?;
    let owner_phone = optional_prompt("Owner phone", current.map(|v| v.owner_phone.clone()))?;
    let owner_address =
        optional_prompt("Owner address", current.map(|v| v.owner_address.clone()))?;

    let insurance_expiry = date_prompt(
        "Insurance expiry (YYYY-MM-DD)",
        current.map(|v| v.insurance_expiry),
    )?;
    let pollution_certificate_expiry = date_prompt(
        "Pollution certificate expiry (YYYY-MM-DD)",
        current.map(|v| v.pollution_certificate_expiry),
    )?;
    let registration_date = date_prompt(
        "Registration date (YYYY-MM-DD)",
        current.map(|v| v.registration_date),
    )?;

    Ok(VehicleForm {
        registration_number,
        make,
        model,
        year,
        color,
        fuel_type,
        engine_number,
        chassis_number,
        owner_name,
        owner_email,
        owner_phone,
        owner_address,
        insurance_expiry,
        pollution_certificate_expiry,
        registration_date,
    })
}

/// Optional photo uploads, one prompt per slot
fn prompt_photos() -> Result<Vec<VehiclePhoto>> {
    let mut photos = Vec::new();
    for (slot, label) in [
        (VehiclePhotoSlot::Front, "Front photo path (optional)"),
        (VehiclePhotoSlot::Back, "Back photo path (optional)"),
        (VehiclePhotoSlot::Side, "Side photo path (optional)"),
        (VehiclePhotoSlot::Owner, "Owner photo path (optional)"),
    ] {
        let path: String = dialoguer::Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        if let Some(file) = read_photo(&path)? {
            photos.push(VehiclePhoto { slot, file });
        }
    }
    Ok(photos)
}

fn text_prompt(label: &str, default: Option<String>) -> Result<String> {
    let mut input = dialoguer::Input::new().with_prompt(label);
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}

fn optional_prompt(label: &str, default: Option<String>) -> Result<Option<String>> {
    let mut input = dialoguer::Input::new()
        .with_prompt(format!("{} (optional)", label))
        .allow_empty(true);
    if let Some(default) = default {
        input = input.default(default);
    }
    let value: String = input.interact_text()?;
    Ok(super::auth::none_if_empty(value))
}

fn date_prompt(label: &str, default: Option<NaiveDate>) -> Result<NaiveDate> {
    let mut input = dialoguer::Input::new().with_prompt(label);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    let value: String = input
        .validate_with(|text: &String| -> std::result::Result<(), String> {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "Enter a date as YYYY-MM-DD".to_string())
        })
        .interact_text()?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").context("Invalid date")
}
