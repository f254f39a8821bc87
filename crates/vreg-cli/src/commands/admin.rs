//! Admin console commands

use anyhow::Result;
use colored::Colorize;
use vreg_client::{ApiError, Client};
use vreg_core::SessionKind;

pub async fn login(username: Option<&str>, password: Option<&str>) -> Result<()> {
    println!("{}", "🔐 Admin sign in".blue().bold());
    println!();

    let username: String = match username {
        Some(u) => u.to_string(),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()?,
    };
    let password: String = match password {
        Some(p) => p.to_string(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?,
    };

    println!();
    println!("{}", "🔐 Authenticating...".dimmed());

    let client = super::client()?;
    let receipt = client.admin_login(&username, &password).await?;

    println!();
    println!("{}", "✅ Admin signed in!".green().bold());
    println!();
    println!("   Username: {}", receipt.username.cyan());
    println!("   Role:     {}", receipt.role);
    println!();
    println!(
        "   {}",
        "Admin sessions take precedence over user sessions.".dimmed()
    );
    Ok(())
}

pub async fn logout() -> Result<()> {
    let client = super::client()?;

    if client.store().get(SessionKind::Admin)?.is_none() {
        println!("{}", "⚠️  No admin session".yellow());
        return Ok(());
    }

    client.admin_logout()?;
    println!("{}", "✅ Admin signed out".green());
    Ok(())
}

pub async fn stats() -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Fetching registry stats...");
    let result = client.admin_stats().await;
    pb.finish_and_clear();
    let stats = guard(&client, result)?;

    println!("{}", "🛡️  Registry Overview".blue().bold());
    println!();
    println!(
        "   Vehicles: {}",
        stats.total_vehicles.to_string().cyan().bold()
    );
    println!("   Users:    {}", stats.total_users.to_string().cyan().bold());

    if !stats.recent_vehicles.is_empty() {
        println!();
        println!("{}", "Recently registered:".bold());
        for vehicle in &stats.recent_vehicles {
            println!(
                "   [{}] {} - {} ({})",
                vehicle.id,
                vehicle.registration_number.cyan(),
                vehicle.make_model(),
                vehicle.owner_username.dimmed()
            );
        }
    }
    Ok(())
}

pub async fn vehicles() -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Fetching all vehicles...");
    let result = client.admin_vehicles().await;
    pb.finish_and_clear();
    let listing = guard(&client, result)?;

    println!("{}", "🛡️  All Vehicles".blue().bold());
    println!();

    for vehicle in &listing.vehicles {
        let qr = if vehicle.qr_code.is_some() {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "   [{}] {} {} - {} ({})",
            vehicle.id,
            qr,
            vehicle.registration_number.cyan(),
            vehicle.make_model(),
            vehicle.owner_username.dimmed()
        );
    }
    println!();
    println!("   {} vehicle(s) total", listing.count);
    Ok(())
}

pub async fn verify(id: i64) -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Verifying...");
    let result = client.verify_vehicle(id).await;
    pb.finish_and_clear();
    let receipt = guard(&client, result)?;

    println!("{}", format!("✅ {}", receipt.message).green().bold());
    println!("   {}", "The vehicle's QR code is now active.".dimmed());
    Ok(())
}

pub async fn blacklist(id: i64) -> Result<()> {
    let confirm: bool = dialoguer::Confirm::new()
        .with_prompt(format!(
            "Blacklist vehicle {}? Its QR code stops working immediately.",
            id
        ))
        .default(false)
        .interact()?;
    if !confirm {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    let client = super::client()?;
    let result = client.blacklist_vehicle(id).await;
    let receipt = guard(&client, result)?;

    println!("{}", format!("⛔ {}", receipt.message).yellow().bold());
    Ok(())
}

pub async fn delete(id: i64) -> Result<()> {
    // Deletion is unrecoverable, ask twice like the web console does
    let first: bool = dialoguer::Confirm::new()
        .with_prompt(format!("Delete vehicle {}? This cannot be undone.", id))
        .default(false)
        .interact()?;
    if !first {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }
    let second: bool = dialoguer::Confirm::new()
        .with_prompt("Really delete? All photos and QR codes will be removed.")
        .default(false)
        .interact()?;
    if !second {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    let client = super::client()?;
    let pb = super::spinner("Deleting...");
    let result = client.admin_delete_vehicle(id).await;
    pb.finish_and_clear();
    let receipt = guard(&client, result)?;

    println!("{}", format!("🗑️  {}", receipt.message).green());
    Ok(())
}

/// Admin calls answered with 403 mean the admin session is no longer
/// honored; drop it so the next command starts clean.
fn guard<T>(client: &Client, result: vreg_client::Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(ApiError::Forbidden) => {
            let _ = client.admin_logout();
            anyhow::bail!("Admin access required. Sign in with 'vreg admin login'.");
        }
        Err(err) => Err(err.into()),
    }
}
