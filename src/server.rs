//! Reusable account service runtime.
//!
//! [`ServerHandle`] owns the server lifecycle: metrics recorder, database
//! connection and migrations, the HTTP listener and graceful shutdown.
//! The CLI binary and the plain `account-service` binary both start the
//! service through it.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::AccountService;
use crate::config::AppConfig;
use crate::domain::AccountRepository;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, SeaOrmAccountRepository};
use crate::interfaces::http::create_api_router;
use crate::interfaces::http::modules::metrics::describe_metrics;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the account service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running account service.
///
/// # Examples
///
/// ```rust,no_run
/// use account_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Account operations backed by the configured database.
    pub accounts: AccountService,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the HTTP listener is bound to.
    pub local_addr: std::net::SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the account service with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder (once per process)
    /// 2. Connect to the database and run migrations
    /// 3. Bind the HTTP listener and serve the API
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting account service...");

        let prometheus_handle = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database_config()).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repo: Arc<dyn AccountRepository> = Arc::new(SeaOrmAccountRepository::new(db.clone()));
        let bcrypt_cost = app_cfg.security.effective_bcrypt_cost();
        if bcrypt_cost != app_cfg.security.bcrypt_cost {
            warn!(
                configured = app_cfg.security.bcrypt_cost,
                effective = bcrypt_cost,
                "bcrypt cost out of range, clamped"
            );
        }
        let accounts = AccountService::new(repo, bcrypt_cost);

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(accounts.clone(), db.clone(), prometheus_handle);

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            accounts,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered, then
    /// close the database. Requests still running after the drain timeout
    /// are aborted.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests to complete...");

        let mut api_task = self.api_task;
        let drained = self
            .shutdown
            .drain(async {
                if let Err(e) = (&mut api_task).await {
                    error!("REST API server task panicked: {}", e);
                }
            })
            .await;
        if !drained {
            api_task.abort();
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Account service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down account service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global metrics recorder can only be installed once per process, so
/// a restart within the same process reuses the first handle.
pub(crate) fn prometheus_handle() -> PrometheusHandle {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_ok() {
                describe_metrics();
                info!("Prometheus metrics recorder installed");
            } else {
                warn!("A global metrics recorder is already installed; /metrics will stay empty");
            }
            handle
        })
        .clone()
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level` unless the level was set
/// explicitly on the command line (`level_is_explicit`).
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig, level_is_explicit: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let rust_log = std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(&config.logging.level, rust_log.as_deref(), level_is_explicit);
    let env_filter = tracing_subscriber::EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

fn filter_directive(level: &str, rust_log: Option<&str>, level_is_explicit: bool) -> String {
    match rust_log {
        Some(env) if !level_is_explicit && !env.trim().is_empty() => env.to_string(),
        _ => level.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;
        config.security.bcrypt_cost = 4;
        config
    }

    #[tokio::test]
    async fn starts_serves_health_and_shuts_down() {
        let handle = ServerHandle::start(ServerOptions {
            config: test_config(),
            auto_migrate: true,
        })
        .await
        .unwrap();
        assert!(handle.is_running());

        let mut stream = tokio::net::TcpStream::connect(handle.local_addr).await.unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");

        handle.shutdown().await;
    }

    #[test]
    fn rust_log_wins_unless_the_level_is_explicit() {
        assert_eq!(filter_directive("info", Some("debug"), false), "debug");
        assert_eq!(filter_directive("warn", Some("debug"), true), "warn");
        assert_eq!(filter_directive("info", None, false), "info");
        assert_eq!(filter_directive("info", Some("  "), false), "info");
    }

    #[tokio::test]
    async fn prometheus_handle_is_reused() {
        let _first = prometheus_handle();
        metrics::counter!("test_reuse_total").increment(1);
        let second = prometheus_handle();
        assert!(second.render().contains("test_reuse_total"));
    }
}
