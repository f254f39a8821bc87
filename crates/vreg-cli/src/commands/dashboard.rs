//! Dashboard commands

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use vreg_core::{expiry, ExpiryAlert, ExpiryStatus};

/// Overall-status filter for the expiry table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Red,
    Yellow,
    Green,
}

impl StatusFilter {
    fn status(self) -> ExpiryStatus {
        match self {
            StatusFilter::Red => ExpiryStatus::Red,
            StatusFilter::Yellow => ExpiryStatus::Yellow,
            StatusFilter::Green => ExpiryStatus::Green,
        }
    }
}

/// Stats, expiry alerts and vehicles fetched concurrently, the whole
/// dashboard in one screen
pub async fn overview() -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Loading dashboard...");
    let result = tokio::try_join!(
        client.dashboard_stats(),
        client.expiry_alerts(),
        client.my_vehicles()
    );
    pb.finish_and_clear();
    let (stats, alerts, vehicles) = result?;

    println!("{}", "📊 Dashboard".blue().bold());
    println!();
    print_stat_cards(&stats);

    let urgent: Vec<&ExpiryAlert> = alerts
        .iter()
        .filter(|a| a.overall_status != ExpiryStatus::Green)
        .collect();
    if !urgent.is_empty() {
        println!();
        println!("{}", "⚠️  Needs attention".yellow().bold());
        println!();
        for alert in urgent.iter().take(5) {
            print_alert_row(alert);
        }
        if urgent.len() > 5 {
            println!(
                "   {}",
                format!("...and {} more, see 'vreg dashboard expiries'", urgent.len() - 5)
                    .dimmed()
            );
        }
    }

    println!();
    println!("{}", "🚗 Vehicles".cyan().bold());
    println!();
    for vehicle in &vehicles {
        let qr = if vehicle.qr_status.is_active() {
            "QR active".green()
        } else {
            "QR inactive".red()
        };
        println!(
            "   [{}] {} - {} ({})",
            vehicle.id,
            vehicle.vehicle_number.cyan(),
            vehicle.make_model,
            qr
        );
    }

    Ok(())
}

pub async fn stats() -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Fetching stats...");
    let result = client.dashboard_stats().await;
    pb.finish_and_clear();
    let stats = result?;

    println!("{}", "📊 Registry Stats".blue().bold());
    println!();
    print_stat_cards(&stats);
    Ok(())
}

pub async fn expiries(filter: Option<StatusFilter>) -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Fetching expiry alerts...");
    let result = client.expiry_alerts().await;
    pb.finish_and_clear();
    let mut alerts = result?;

    if let Some(filter) = filter {
        let wanted = filter.status();
        alerts.retain(|a| a.overall_status == wanted);
    }

    println!("{}", "📅 Document Expiries".blue().bold());
    println!();

    if alerts.is_empty() {
        println!("   (Nothing to show)");
        return Ok(());
    }

    for alert in &alerts {
        print_alert_row(alert);
    }
    Ok(())
}

pub async fn my_vehicles() -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Fetching vehicles...");
    let result = client.my_vehicles().await;
    pb.finish_and_clear();
    let vehicles = result?;

    println!("{}", "🚗 My Vehicles".blue().bold());
    println!();

    if vehicles.is_empty() {
        println!("   (No vehicles registered)");
        return Ok(());
    }

    for vehicle in &vehicles {
        let qr = if vehicle.qr_status.is_active() {
            "Active".green()
        } else {
            "Inactive".red()
        };
        println!(
            "   [{}] {} - {} (QR: {})",
            vehicle.id,
            vehicle.vehicle_number.cyan(),
            vehicle.make_model,
            qr
        );
        if let Some(ref url) = vehicle.public_page_url {
            println!("       Public page: {}", url.dimmed());
        }
        if let Some(ref url) = vehicle.qr_download_url {
            println!("       QR code:     {}", url.dimmed());
        }
    }
    Ok(())
}

pub async fn alerts() -> Result<()> {
    let client = super::client()?;
    let pb = super::spinner("Fetching alerts...");
    let result = client.alerts_summary().await;
    pb.finish_and_clear();
    let summary = result?;

    println!("{}", "🔔 Expiry Alerts".blue().bold());
    println!();
    println!(
        "   {} expiring this week, {} this month, {} already expired",
        summary.counts.this_week.to_string().yellow().bold(),
        summary.counts.this_month.to_string().yellow(),
        summary.counts.expired.to_string().red().bold()
    );

    print_bucket("⏰ This week", &summary.expiring_this_week);
    print_bucket("📆 This month", &summary.expiring_this_month);
    print_bucket("❌ Already expired", &summary.already_expired);
    Ok(())
}

fn print_bucket(title: &str, alerts: &[ExpiryAlert]) {
    println!();
    println!("{}", title.bold());
    if alerts.is_empty() {
        println!("   (none)");
        return;
    }
    for alert in alerts {
        print_alert_row(alert);
    }
}

fn print_alert_row(alert: &ExpiryAlert) {
    println!(
        "   {} {}",
        super::paint_status(alert.overall_status),
        alert.vehicle_number.cyan()
    );
    println!(
        "       Insurance: {} ({})",
        alert.insurance_expiry,
        days_text(alert.insurance_days_remaining, alert.insurance_status)
    );
    println!(
        "       Pollution: {} ({})",
        alert.pollution_certificate_expiry,
        days_text(alert.pollution_days_remaining, alert.pollution_status)
    );
}

/// Prefer the day count the backend computed; fall back to the status label
fn days_text(days: Option<i64>, status: ExpiryStatus) -> String {
    match days {
        Some(days) => expiry::format_days_remaining(days),
        None => status.label().to_string(),
    }
}

fn print_stat_cards(stats: &vreg_core::DashboardStats) {
    println!(
        "   Vehicles:      {}",
        stats.total_vehicles.to_string().cyan().bold()
    );
    println!(
        "   Expiring soon: {}",
        stats.expiring_soon_count.to_string().yellow().bold()
    );
    println!(
        "   Expired:       {}",
        stats.expired_count.to_string().red().bold()
    );
    println!(
        "   Active QR:     {}",
        stats.active_qr_count.to_string().green().bold()
    );
}
