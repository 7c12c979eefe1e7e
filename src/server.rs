//! Reusable gateway server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, bootstrap admin, REST API and graceful
//! shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{
    AccountService, GenerationService, GenerationSettings, LedgerService, NotifierConfig,
    StreamNotifier,
};
use crate::config::AppConfig;
use crate::infrastructure::crypto::{JwtConfig, PasswordHasher};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::{LanguageModelRepository, UserRepository};
use crate::infrastructure::upstream::{HttpCompletionProvider, UpstreamSettings};
use crate::infrastructure::{init_database, DatabaseConfig};
use crate::interfaces::http::middleware::AuthState;
use crate::interfaces::http::{create_api_router, GatewayState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the gateway.
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

/// Handle to a running gateway.
///
/// # Examples
///
/// ```rust,no_run
/// use textgen_gateway::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
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
    /// Start the gateway with the given options.
    ///
    /// This will:
    /// 1. Validate the configuration
    /// 2. Connect to the database and run migrations
    /// 3. Create the bootstrap admin (if configured)
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting text generation gateway...");

        // ── Database ───────────────────────────────────────────
        let db = init_database(&DatabaseConfig {
            url: app_cfg.database.url.clone(),
            max_connections: app_cfg.database.max_connections,
        })
        .await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Services ───────────────────────────────────────────
        let users = Arc::new(UserRepository::new(db.clone()));
        let models = Arc::new(LanguageModelRepository::new(db.clone()));

        let jwt_config = JwtConfig::new(
            app_cfg.security.jwt_secret.clone(),
            app_cfg.security.token_ttl_days,
        );
        let accounts = Arc::new(AccountService::new(
            users.clone(),
            jwt_config.clone(),
            PasswordHasher::new(app_cfg.security.bcrypt_cost),
        ));

        if let Some(admin) = &app_cfg.admin {
            accounts
                .ensure_admin(
                    &admin.email,
                    &admin.password,
                    &admin.first_name,
                    &admin.last_name,
                )
                .await?;
        }

        if app_cfg.upstream.api_key.is_empty() {
            warn!("upstream.api_key is empty; /generate-text calls will likely be rejected");
        }
        let provider = Arc::new(HttpCompletionProvider::new(UpstreamSettings {
            url: app_cfg.upstream.url.clone(),
            api_key: app_cfg.upstream.api_key.clone(),
            timeout: Duration::from_secs(app_cfg.upstream.timeout_secs),
        })?);

        let ledger = Arc::new(LedgerService::new(users.clone()));
        let generation = Arc::new(GenerationService::new(
            users,
            models,
            ledger.clone(),
            provider,
            GenerationSettings {
                default_model: app_cfg.upstream.default_model.clone(),
                max_tokens: app_cfg.upstream.max_tokens,
                flat_cost: app_cfg.upstream.flat_cost,
            },
        ));
        let notifier = StreamNotifier::new(NotifierConfig {
            interval: Duration::from_millis(app_cfg.stream.interval_ms),
            message: app_cfg.stream.message.clone(),
        });

        let api_router = create_api_router(GatewayState {
            accounts,
            ledger,
            generation,
            notifier,
            auth: AuthState { jwt_config },
        });

        // ── REST API ───────────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/api-docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router.into_make_service())
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
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
    /// Open event streams never end on their own, so draining is bounded by
    /// `server.shutdown_timeout`.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!(
                timeout_secs = timeout.as_secs(),
                "Connections still open after shutdown timeout, abandoning them"
            ),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Gateway shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down gateway...");
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
/// `RUST_LOG` takes precedence over `logging.level`.
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
