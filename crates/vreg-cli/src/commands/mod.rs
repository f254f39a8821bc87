//! Command implementations

pub mod admin;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod owners;
pub mod vehicles;

use crate::config::ConfigManager;
use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use vreg_client::{Client, FileStore};
use vreg_core::ExpiryStatus;

/// API client backed by the on-disk session store
pub(crate) fn client() -> Result<Client> {
    let store = FileStore::open_default().context("Failed to open session store")?;
    let url = ConfigManager::api_url()?;
    Ok(Client::new(url, Arc::new(store)))
}

/// Spinner shown while a request is in flight
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Status label in its traffic-light color
pub(crate) fn paint_status(status: ExpiryStatus) -> ColoredString {
    match status {
        ExpiryStatus::Green => status.label().green(),
        ExpiryStatus::Yellow => status.label().yellow(),
        ExpiryStatus::Red => status.label().red().bold(),
    }
}
