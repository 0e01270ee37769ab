//! smart-ticket - Multi-tenant support ticketing backend
//!
//! This is the main entry point for the smart-ticket binary. It parses
//! command-line arguments, loads configuration, and either serves the
//! HTTP API or provisions an administrator account.

use clap::{Parser, Subcommand};
use smart_ticket::api::{self, AppState};
use smart_ticket::config::Config;
use smart_ticket::engine::TicketEngine;
use smart_ticket::error::SmartTicketError;
use smart_ticket::identity::{IdentityService, TokenSigner, validate_email};
use smart_ticket::storage::FileStorage;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "smart-ticket",
    version,
    about = "Multi-tenant support ticketing backend"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, env = "SMART_TICKET_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Override the configured listen host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Provision an administrator account
    ///
    /// Admin accounts cannot be created over the API; this is the only
    /// way to get one.
    CreateAdmin {
        /// Display name
        #[arg(long)]
        name: String,

        /// Login email, unique across all accounts
        #[arg(long)]
        email: String,

        /// Plaintext password, hashed before storage
        #[arg(long)]
        password: String,

        /// Company tag, one of the configured tenants
        #[arg(long)]
        company: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        },
        Commands::CreateAdmin {
            name,
            email,
            password,
            company,
        } => create_admin(&config, &name, &email, &password, &company).await,
    }
}

/// Run the HTTP API until interrupted
async fn serve(config: Config) -> anyhow::Result<()> {
    config.validate_for_serve()?;

    let storage = Arc::new(FileStorage::new(&config.storage.data_dir));
    storage.init().await?;

    let signer = TokenSigner::new(&config.auth.jwt_secret, config.auth.token_ttl_minutes);
    let identity = IdentityService::new(storage.clone(), signer);
    let engine = TicketEngine::new(storage);

    let addr = config.bind_addr();
    let app = api::router(AppState::new(identity, engine, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("smart-ticket API listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

/// Provision an admin account in the configured store
async fn create_admin(
    config: &Config,
    name: &str,
    email: &str,
    password: &str,
    company: &str,
) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        return Err(SmartTicketError::validation("name must not be empty").into());
    }
    validate_email(email)?;
    if password.is_empty() {
        return Err(SmartTicketError::validation("password must not be empty").into());
    }
    if !config.is_known_tenant(company) {
        return Err(SmartTicketError::validation(format!(
            "unknown company: {company} (configured tenants: {})",
            config.tenants.join(", ")
        ))
        .into());
    }

    let storage = Arc::new(FileStorage::new(&config.storage.data_dir));
    storage.init().await?;

    let signer = TokenSigner::new(&config.auth.jwt_secret, config.auth.token_ttl_minutes);
    let identity = IdentityService::new(storage, signer);

    let admin = identity.create_admin(name, email, password, company).await?;
    println!("Created admin account {} ({})", admin.email, admin.id);
    Ok(())
}

/// Resolves when the process receives Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        // if handlers cannot be installed the process cannot shut down cleanly
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("received Ctrl+C, shutting down");
        },
        () = terminate => {
            info!("received SIGTERM, shutting down");
        },
    }
}
