//! Account service - CLI server
//!
//! Headless account API suitable for deployment as a systemd service,
//! Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/account-service/config.toml)
//! account-service-cli
//!
//! # Custom config path
//! account-service-cli --config /etc/account-service/config.toml
//!
//! # Override the port
//! account-service-cli --port 9090
//!
//! # Write a default config file and exit
//! account-service-cli --init-config
//!
//! # Validate config without starting
//! account-service-cli --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use account_service::config::{default_config_path, AppConfig, CONFIG_ENV};
use account_service::server::{init_tracing, ServerHandle, ServerOptions};

/// User account API server.
#[derive(Parser, Debug)]
#[command(
    name = "account-service-cli",
    version,
    about = "User account API: list, create, change password, delete",
    long_about = "Account service - REST API over /api/users backed by SQLite.\n\n\
                  Default config: ~/.config/account-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the HTTP listen port.
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

    /// Write a default configuration file to the config path and exit.
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    if cli.init_config {
        if config_path.exists() {
            eprintln!("Config already exists at {}", config_path.display());
            std::process::exit(1);
        }
        AppConfig::default().save(&config_path)?;
        println!("Wrote default configuration to {}", config_path.display());
        return Ok(());
    }

    // ── Load configuration ─────────────────────────────────────
    let (config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) if cli.check => {
            eprintln!("Configuration is invalid: {}", e);
            std::process::exit(1);
        }
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    let overrides = Overrides::from(&cli);
    let config = overrides.apply(config);

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   bcrypt cost : {}", config.security.effective_bcrypt_cost());
        return Ok(());
    }

    // Overrides are already applied, so `--log-level` reaches the subscriber
    init_tracing(&config, overrides.log_level.is_some());
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    start(config, !cli.no_migrate).await
}

/// Command line values that replace config file settings.
#[derive(Debug, Default)]
struct Overrides {
    port: Option<u16>,
    log_level: Option<String>,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            port: cli.port,
            log_level: cli.log_level.clone(),
        }
    }
}

impl Overrides {
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        config
    }
}

async fn start(config: AppConfig, auto_migrate: bool) -> Result<(), Box<dyn std::error::Error>> {
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_override_applies_to_fallback_defaults() {
        let cli = Cli::parse_from(["account-service-cli", "--log-level", "debug", "--port", "9191"]);
        let config = Overrides::from(&cli).apply(AppConfig::default());

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.port, 9191);
    }

    #[test]
    fn no_flags_leave_config_untouched() {
        let cli = Cli::parse_from(["account-service-cli"]);
        let mut loaded = AppConfig::default();
        loaded.logging.level = "warn".to_string();
        loaded.server.port = 7000;

        let config = Overrides::from(&cli).apply(loaded);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.server.port, 7000);
    }
}
