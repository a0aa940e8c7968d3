//! Account service: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/account-service/config.toml)
//! account-service
//!
//! # Custom config path
//! account-service --config /etc/account-service/config.toml
//!
//! # Override the listen port
//! account-service --port 9090
//!
//! # Validate config without starting
//! account-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use account_service::config::AppConfig;
use account_service::server::{init_tracing, ServerHandle, ServerOptions};

/// User account service with address validation against geoapi.es.
#[derive(Parser, Debug)]
#[command(
    name = "account-service",
    version,
    about = "User account REST service",
    long_about = "Registration, login and management of user accounts whose \
                  address is validated against the Spanish province/municipality \
                  catalogue.\n\n\
                  Default config: ~/.config/account-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ACCOUNT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(account_service::default_config_path);

    let loaded = AppConfig::load(&config_path);

    if cli.check {
        return match loaded {
            Ok(config) => {
                println!("Configuration is valid");
                println!("   Config file : {}", config_path.display());
                println!("   API address : {}", config.api_address());
                println!("   Database    : {}", config.database.url);
                println!("   Catalogue   : {}", config.address_api.base_url);
                println!("   Log level   : {}", config.logging.level);
                Ok(())
            }
            Err(e) => {
                eprintln!("Invalid configuration at {}: {}", config_path.display(), e);
                std::process::exit(1);
            }
        };
    }

    let mut config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            // Fallback tracing init
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
