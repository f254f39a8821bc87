//! Owner record commands

use anyhow::Result;
use colored::Colorize;
use vreg_core::{Owner, OwnerForm};

use super::auth::read_photo;

pub async fn list() -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Fetching owners...");
    let result = client.owners().await;
    pb.finish_and_clear();
    let owners = result?;

    println!("{}", "👥 Owner Records".blue().bold());
    println!();

    if owners.is_empty() {
        println!("   (No owner records)");
        println!();
        println!("   Add one with: {}", "vreg owner add".dimmed());
        return Ok(());
    }

    for owner in &owners {
        println!(
            "   [{}] {} - {} ({})",
            owner.id,
            owner.name.cyan(),
            owner.phone,
            owner.email.dimmed()
        );
    }
    Ok(())
}

pub async fn show(id: i64) -> Result<()> {
    let client = super::client()?;
    let owner = client.owner(id).await?;
    print_owner(&owner);
    Ok(())
}

pub async fn add() -> Result<()> {
    println!("{}", "👥 Add an owner record".blue().bold());
    println!();

    let form = prompt_owner_form(None)?;
    let photo_path: String = dialoguer::Input::new()
        .with_prompt("Photo path (optional)")
        .allow_empty(true)
        .interact_text()?;
    let photo = read_photo(&photo_path)?;

    let client = super::client()?;
    let owner = client.create_owner(&form, photo).await?;

    println!();
    println!("{}", format!("✅ Owner '{}' added", owner.name).green().bold());
    Ok(())
}

pub async fn update(id: i64) -> Result<()> {
    let client = super::client()?;
    let current = client.owner(id).await?;

    println!(
        "{}",
        format!("✏️  Update '{}' (enter keeps the current value)", current.name)
            .blue()
            .bold()
    );
    println!();

    let form = prompt_owner_form(Some(&current))?;
    let photo_path: String = dialoguer::Input::new()
        .with_prompt("New photo path (optional)")
        .allow_empty(true)
        .interact_text()?;
    let photo = read_photo(&photo_path)?;

    let owner = client.update_owner(id, &form, photo).await?;
    println!();
    println!("{}", format!("✅ Owner '{}' updated", owner.name).green());
    Ok(())
}

pub async fn delete(id: i64) -> Result<()> {
    let client = super::client()?;
    let owner = client.owner(id).await?;

    let confirm: bool = dialoguer::Confirm::new()
        .with_prompt(format!("Delete owner record '{}'?", owner.name))
        .default(false)
        .interact()?;
    if !confirm {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    client.delete_owner(id).await?;
    println!("{}", format!("✅ Owner '{}' deleted", owner.name).green());
    Ok(())
}

fn print_owner(owner: &Owner) {
    println!("{}", format!("👤 {}", owner.name).blue().bold());
    println!();
    println!("   Email:   {}", owner.email.cyan());
    println!("   Phone:   {}", owner.phone);
    println!("   Address: {}", owner.address);
    if let Some(ref photo) = owner.photo {
        println!("   Photo:   {}", photo.dimmed());
    }
    println!(
        "   Since:   {}",
        owner.created_at.format("%Y-%m-%d").to_string().dimmed()
    );
}

fn prompt_owner_form(current: Option<&Owner>) -> Result<OwnerForm> {
    let name = prompt("Name", current.map(|o| o.name.clone()))?;
    let email = prompt("Email", current.map(|o| o.email.clone()))?;
    let phone = prompt("Phone", current.map(|o| o.phone.clone()))?;
    let address = prompt("Address", current.map(|o| o.address.clone()))?;
    Ok(OwnerForm {
        name,
        email,
        phone,
        address,
    })
}

fn prompt(label: &str, default: Option<String>) -> Result<String> {
    let mut input = dialoguer::Input::new().with_prompt(label);
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}
