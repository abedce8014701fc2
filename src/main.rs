//! Account service binary.
//!
//! Reads configuration from `ACCOUNT_SERVICE_CONFIG` or the default path
//! (`~/.config/account-service/config.toml`) and serves until SIGINT/SIGTERM.
//! The `account-service-cli` binary offers the same with command line
//! overrides.

use tracing::{error, info};

use account_service::config::{config_path_from_env, AppConfig};
use account_service::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path_from_env();

    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg, false);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg, false);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: true,
    })
    .await?;
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
