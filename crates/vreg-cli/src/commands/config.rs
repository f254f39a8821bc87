//! Config command - manage CLI configuration

use crate::config::{CliConfig, ConfigManager, DEFAULT_API_URL};
use anyhow::{Context, Result};
use colored::Colorize;
use vreg_client::{FileStore, SessionStore};
use vreg_core::SessionKind;

/// Set the registry API base URL
pub async fn set_url(url: &str) -> Result<()> {
    let url = url.trim().trim_end_matches('/');
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!(
            "Invalid URL: {}. URL must start with http:// or https://",
            url
        );
    }

    let mut config = ConfigManager::load().context("Failed to load config")?;
    config.api_url = url.to_string();
    ConfigManager::save(&config).context("Failed to save config")?;

    println!("{} API URL set to: {}", "✓".green(), url.cyan());
    if std::env::var("VREG_API_URL").is_ok() {
        println!(
            "{}",
            "  Note: VREG_API_URL is set and overrides the config file."
                .yellow()
                .dimmed()
        );
    }
    Ok(())
}

/// Show current configuration
pub async fn show() -> Result<()> {
    let config = ConfigManager::load().context("Failed to load config")?;

    println!("{}", "VReg Configuration".bold().underline());
    println!();

    println!("{}", "Server:".cyan().bold());
    println!("  API URL: {}", ConfigManager::api_url()?);
    if std::env::var("VREG_API_URL").is_ok() {
        println!("  {}", "(from VREG_API_URL)".dimmed());
    } else {
        println!("  Config file value: {}", config.api_url.dimmed());
    }
    println!();

    println!("{}", "Sessions:".cyan().bold());
    let store = FileStore::open_default().context("Failed to open session store")?;
    match store.get(SessionKind::User) {
        Ok(Some(_)) => println!("  User:  {}", "signed in".green()),
        _ => println!("  User:  {}", "not signed in".dimmed()),
    }
    match store.admin_identity() {
        Ok(Some(identity)) => println!(
            "  Admin: {} ({})",
            "signed in".green(),
            identity.username.cyan()
        ),
        _ => println!("  Admin: {}", "not signed in".dimmed()),
    }
    println!();

    println!("{}", "Files:".cyan().bold());
    println!(
        "  Config:  {}",
        ConfigManager::config_path()?.display().to_string().dimmed()
    );
    println!("  Session: {}", store.path().display().to_string().dimmed());

    Ok(())
}

/// Reset configuration to defaults
pub async fn reset() -> Result<()> {
    let confirm: bool = dialoguer::Confirm::new()
        .with_prompt("Reset configuration to defaults?")
        .default(false)
        .interact()?;
    if !confirm {
        println!("{}", "Reset cancelled.".yellow());
        return Ok(());
    }

    ConfigManager::save(&CliConfig::default()).context("Failed to save default config")?;

    println!("{} Configuration reset to defaults.", "✓".green());
    println!("  API URL: {}", DEFAULT_API_URL.dimmed());
    println!(
        "{}",
        "  Session tokens were kept; use 'vreg auth logout' to drop them.".dimmed()
    );
    Ok(())
}
