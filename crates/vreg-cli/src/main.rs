//! VReg CLI
//!
//! Command line front end for the vehicle registry: accounts, vehicles,
//! owners, expiry dashboard and the admin console.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::error;

#[derive(Parser)]
#[command(name = "vreg")]
#[command(author, version, about = "VReg - vehicle registry client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management
    #[command(name = "auth")]
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Vehicles
    #[command(name = "vehicle")]
    Vehicle {
        #[command(subcommand)]
        action: VehicleAction,
    },

    /// Owner contact records
    #[command(name = "owner")]
    Owner {
        #[command(subcommand)]
        action: OwnerAction,
    },

    /// Expiry dashboard
    #[command(name = "dashboard")]
    Dashboard {
        #[command(subcommand)]
        action: DashboardAction,
    },

    /// Admin console (requires an admin account)
    #[command(name = "admin")]
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in
    Login {
        /// Username (optional - will prompt if not provided)
        #[arg(short, long)]
        username: Option<String>,
        /// Password (optional - will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out (local, drops stored tokens)
    Logout,
    /// Register a new account
    Signup,
    /// Show who is signed in
    Whoami,
}

#[derive(Subcommand)]
enum VehicleAction {
    /// List your vehicles
    List,
    /// Show one vehicle in full
    Show {
        /// Vehicle id
        id: i64,
    },
    /// Register a new vehicle
    Add,
    /// Update a vehicle
    Update {
        /// Vehicle id
        id: i64,
    },
    /// Delete a vehicle
    Delete {
        /// Vehicle id
        id: i64,
    },
    /// Look up a vehicle by its QR code id
    Scan {
        /// The unique id embedded in the QR code
        unique_id: String,
    },
    /// Get the download URL for a vehicle's logo
    Logo {
        /// Vehicle id
        id: i64,
    },
}

#[derive(Subcommand)]
enum OwnerAction {
    /// List owner records
    List,
    /// Show one owner record
    Show {
        /// Owner id
        id: i64,
    },
    /// Add an owner record
    Add,
    /// Update an owner record
    Update {
        /// Owner id
        id: i64,
    },
    /// Delete an owner record
    Delete {
        /// Owner id
        id: i64,
    },
}

#[derive(Subcommand)]
enum DashboardAction {
    /// Stats, alerts and vehicles in one view
    Overview,
    /// Counter cards only
    Stats,
    /// Expiry table for all your vehicles
    Expiries {
        /// Only rows with this overall status
        #[arg(short, long, value_enum)]
        filter: Option<commands::dashboard::StatusFilter>,
    },
    /// Vehicles with their QR state and links
    #[command(name = "my-vehicles")]
    MyVehicles,
    /// Alerts bucketed by urgency
    Alerts,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Sign in to the admin console
    Login {
        /// Username (optional - will prompt if not provided)
        #[arg(short, long)]
        username: Option<String>,
        /// Password (optional - will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Drop the admin session
    Logout,
    /// Registry-wide statistics
    Stats,
    /// All vehicles in the registry
    Vehicles,
    /// Verify a vehicle, activating its QR code
    Verify {
        /// Vehicle id
        id: i64,
    },
    /// Blacklist a vehicle, deactivating its QR code
    Blacklist {
        /// Vehicle id
        id: i64,
    },
    /// Permanently delete a vehicle
    Delete {
        /// Vehicle id
        id: i64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set the registry API base URL
    SetUrl {
        /// Base URL (e.g., https://registry.example.com/api)
        url: String,
    },
    /// Show current configuration
    Show,
    /// Reset to default configuration
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "vreg_cli=debug,vreg_client=debug"
        } else {
            "vreg_cli=info"
        })
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let result = match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { username, password } => {
                commands::auth::login(username.as_deref(), password.as_deref()).await
            }
            AuthAction::Logout => commands::auth::logout().await,
            AuthAction::Signup => commands::auth::signup().await,
            AuthAction::Whoami => commands::auth::whoami().await,
        },
        Commands::Vehicle { action } => match action {
            VehicleAction::List => commands::vehicles::list().await,
            VehicleAction::Show { id } => commands::vehicles::show(id).await,
            VehicleAction::Add => commands::vehicles::add().await,
            VehicleAction::Update { id } => commands::vehicles::update(id).await,
            VehicleAction::Delete { id } => commands::vehicles::delete(id).await,
            VehicleAction::Scan { unique_id } => commands::vehicles::scan(&unique_id).await,
            VehicleAction::Logo { id } => commands::vehicles::logo(id).await,
        },
        Commands::Owner { action } => match action {
            OwnerAction::List => commands::owners::list().await,
            OwnerAction::Show { id } => commands::owners::show(id).await,
            OwnerAction::Add => commands::owners::add().await,
            OwnerAction::Update { id } => commands::owners::update(id).await,
            OwnerAction::Delete { id } => commands::owners::delete(id).await,
        },
        Commands::Dashboard { action } => match action {
            DashboardAction::Overview => commands::dashboard::overview().await,
            DashboardAction::Stats => commands::dashboard::stats().await,
            DashboardAction::Expiries { filter } => commands::dashboard::expiries(filter).await,
            DashboardAction::MyVehicles => commands::dashboard::my_vehicles().await,
            DashboardAction::Alerts => commands::dashboard::alerts().await,
        },
        Commands::Admin { action } => match action {
            AdminAction::Login { username, password } => {
                commands::admin::login(username.as_deref(), password.as_deref()).await
            }
            AdminAction::Logout => commands::admin::logout().await,
            AdminAction::Stats => commands::admin::stats().await,
            AdminAction::Vehicles => commands::admin::vehicles().await,
            AdminAction::Verify { id } => commands::admin::verify(id).await,
            AdminAction::Blacklist { id } => commands::admin::blacklist(id).await,
            AdminAction::Delete { id } => commands::admin::delete(id).await,
        },
        Commands::Config { action } => match action {
            ConfigAction::SetUrl { url } => commands::config::set_url(&url).await,
            ConfigAction::Show => commands::config::show().await,
            ConfigAction::Reset => commands::config::reset().await,
        },
    };

    if let Err(ref e) = result {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}
