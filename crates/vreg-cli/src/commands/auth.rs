//! Account commands

use anyhow::{Context, Result};
use colored::Colorize;
use vreg_core::{peek_claims, ActiveSession, PhotoFile, SessionKind, SignupForm};

pub async fn login(username: Option<&str>, password: Option<&str>) -> Result<()> {
    println!("{}", "🔹 Sign in to the vehicle registry".blue().bold());
    println!();

    let username: String = match username {
        Some(u) => u.to_string(),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .default(whoami::username())
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
    client.login(&username, &password).await?;

    println!();
    println!("{}", "✅ Signed in!".green().bold());

    // Greet with profile details when the endpoint cooperates
    if let Ok(profile) = client.profile().await {
        let display = if profile.first_name.is_empty() {
            profile.username.clone()
        } else {
            format!("{} {}", profile.first_name, profile.last_name)
                .trim_end()
                .to_string()
        };
        println!();
        println!("   Welcome, {}!", display.cyan());
    }

    Ok(())
}

pub async fn logout() -> Result<()> {
    let client = super::client()?;

    if client.store().get(SessionKind::User)?.is_none() {
        println!("{}", "⚠️  Not signed in".yellow());
        return Ok(());
    }

    client.logout()?;
    println!("{}", "✅ Signed out".green());
    Ok(())
}

pub async fn signup() -> Result<()> {
    println!("{}", "🔹 Register a new account".blue().bold());
    println!();

    let username: String = dialoguer::Input::new()
        .with_prompt("Username")
        .interact_text()?;
    let email: String = dialoguer::Input::new()
        .with_prompt("Email")
        .interact_text()?;
    let password: String = dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    let first_name: String = dialoguer::Input::new()
        .with_prompt("First name (optional)")
        .allow_empty(true)
        .interact_text()?;
    let last_name: String = dialoguer::Input::new()
        .with_prompt("Last name (optional)")
        .allow_empty(true)
        .interact_text()?;
    let photo_path: String = dialoguer::Input::new()
        .with_prompt("Profile photo path (optional)")
        .allow_empty(true)
        .interact_text()?;

    let photo = read_photo(&photo_path)?;

    let form = SignupForm {
        username,
        email,
        password: password.clone(),
        password2: password,
        first_name: none_if_empty(first_name),
        last_name: none_if_empty(last_name),
    };

    println!();
    let client = super::client()?;
    let pb = super::spinner("Registering...");
    let result = client.signup(&form, photo).await;
    pb.finish_and_clear();
    let receipt = result?;

    println!("{}", format!("✅ {}", receipt.message).green().bold());
    println!();
    println!(
        "   Sign in with: {}",
        format!("vreg auth login -u {}", receipt.user.username).dimmed()
    );
    Ok(())
}

pub async fn whoami() -> Result<()> {
    let client = super::client()?;

    match client.session()? {
        ActiveSession::None => {
            println!("{}", "⚠️  Not signed in".yellow());
        }
        ActiveSession::Admin { access } => {
            println!("{}", "👤 Admin Session".blue().bold());
            println!();
            if let Some(identity) = client.admin_identity()? {
                println!("   Username: {}", identity.username.cyan());
                println!("   Role:     {}", identity.role);
            } else if let Some(claims) = peek_claims(&access) {
                if let Some(username) = claims.username {
                    println!("   Username: {}", username.cyan());
                }
            }
            if client.store().get(SessionKind::User)?.is_some() {
                println!();
                println!(
                    "   {}",
                    "A user session is also stored; admin takes precedence.".dimmed()
                );
            }
        }
        ActiveSession::User { access } => {
            println!("{}", "👤 User Session".blue().bold());
            println!();
            // The token already carries the username for display
            if let Some(username) = peek_claims(&access).and_then(|c| c.username) {
                println!("   Username: {}", username.cyan());
            }
            match client.profile().await {
                Ok(profile) => {
                    println!("   Email:    {}", profile.email.cyan());
                    if !profile.first_name.is_empty() || !profile.last_name.is_empty() {
                        println!(
                            "   Name:     {} {}",
                            profile.first_name, profile.last_name
                        );
                    }
                }
                Err(e) => {
                    println!("{}", format!("⚠️  Failed to fetch profile: {}", e).yellow());
                }
            }
        }
    }

    Ok(())
}

pub(crate) fn none_if_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Read an optional photo from disk; empty path means no photo
pub(crate) fn read_photo(path: &str) -> Result<Option<PhotoFile>> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read photo from {}", path))?;
    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "photo.jpg".to_string());
    Ok(Some(PhotoFile { file_name, bytes }))
}
