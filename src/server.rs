//! Reusable account service runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database connection and
//! migrations, collaborator wiring, the REST API listener and graceful
//! shutdown. The CLI binary is a thin wrapper around it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::identity::{
    AddressResolver, RegistrationValidator, RepositoryAuthenticator, UserService,
};
use crate::config::AppConfig;
use crate::domain::{AddressProvider, PasswordHasher, TokenIssuer, UserRepositoryInterface};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{
    init_database, BcryptPasswordHasher, GeoApiClient, JwtTokenIssuer, SeaOrmUserRepository,
};
use crate::interfaces::http::create_api_router;
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

// ── Wiring ─────────────────────────────────────────────────────────

/// Build the [`UserService`] over a connected database, with bcrypt hashing,
/// the geoapi.es catalogue and JWT issuance as configured.
pub fn build_user_service(
    config: &AppConfig,
    db: DatabaseConnection,
) -> Result<Arc<UserService>, reqwest::Error> {
    let repo: Arc<dyn UserRepositoryInterface> = Arc::new(SeaOrmUserRepository::new(db));
    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(BcryptPasswordHasher::new(config.security.bcrypt_cost));
    let catalogue: Arc<dyn AddressProvider> = Arc::new(GeoApiClient::new(
        &config.address_api.base_url,
        &config.address_api.api_key,
        Duration::from_secs(config.address_api.timeout_secs),
    )?);
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(config.jwt_config()));

    let resolver = AddressResolver::new(catalogue, config.address_api.on_unavailable);
    let validator = RegistrationValidator::new(repo.clone(), hasher.clone(), resolver);
    let authenticator = Arc::new(RepositoryAuthenticator::new(repo.clone(), hasher));

    Ok(Arc::new(UserService::new(
        repo,
        validator,
        authenticator,
        tokens,
    )))
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
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the account service with the given options.
    ///
    /// This will:
    /// 1. Connect to the database and run migrations (if enabled)
    /// 2. Wire the user service collaborators
    /// 3. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting account service...");

        if app_cfg.uses_default_secret() {
            warn!("security.jwt_secret is the built-in default; set a real secret in production");
        }

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Services ───────────────────────────────────────────
        let user_service = build_user_service(&app_cfg, db.clone())?;
        info!(
            catalogue = %app_cfg.address_api.base_url,
            timeout_secs = app_cfg.address_api.timeout_secs,
            on_unavailable = ?app_cfg.address_api.on_unavailable,
            "Address catalogue configured"
        );
        info!(
            "JWT configured with {}h token expiration",
            app_cfg.security.jwt_expiration_hours
        );

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(user_service, app_cfg.jwt_config());

        let listener = tokio::net::TcpListener::bind(app_cfg.api_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
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

    /// Wait for the server to fully stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to drain.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        let api_task = self.api_task;
        let drained = self
            .shutdown
            .cleanup_with_timeout(async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !drained {
            warn!("Abandoning in-flight requests");
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

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

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
