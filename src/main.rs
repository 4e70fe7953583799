//! Staff Service
//!
//! REST API for employees, departments and user accounts.
//! Reads configuration from a TOML file (~/.config/staff-service/config.toml).
//! Pass `--memory` to run on in-memory repositories without a database.

use std::path::PathBuf;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use staff_api::application::RegisterUser;
use staff_api::config::{AppConfig, ConfigError, LoggingConfig};
use staff_api::infrastructure::database::migrator::Migrator;
use staff_api::interfaces::http::AppState;
use staff_api::{create_api_router, default_config_path, init_database, shutdown_signal, RepositoryProvider};

fn init_logging(cfg: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if cfg.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("STAFF_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let (app_cfg, missing_file) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, false),
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            (AppConfig::from_env()?, true)
        }
        Err(e) => {
            eprintln!("Failed to load config {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    init_logging(&app_cfg.logging);
    if missing_file {
        warn!("No config file at {}, using defaults", config_path.display());
    } else {
        info!("Configuration loaded from {}", config_path.display());
    }
    info!("Starting Staff Service...");

    let jwt_config = app_cfg.jwt_config();
    info!(
        issuer = %jwt_config.issuer,
        audience = %jwt_config.audience,
        "JWT configured with {}m token expiration",
        jwt_config.expiration_minutes
    );
    if jwt_config.secret == staff_api::infrastructure::crypto::JwtConfig::default().secret {
        warn!("JWT secret is the built-in default; set JWT_SECRET in production");
    }

    // ── Persistence ────────────────────────────────────────────
    let in_memory = std::env::args().any(|arg| arg == "--memory");
    let (repos, db) = if in_memory {
        warn!("Running on in-memory repositories; data is lost on exit");
        (RepositoryProvider::in_memory(), None)
    } else {
        let db = match init_database(&app_cfg.database_config()).await {
            Ok(db) => db,
            Err(e) => {
                error!("Failed to connect to database: {}", e);
                return Err(e.into());
            }
        };

        info!("Running database migrations...");
        if let Err(e) = Migrator::up(&db, None).await {
            error!("Failed to run migrations: {}", e);
            return Err(e.into());
        }
        info!("Migrations completed");

        (RepositoryProvider::sea_orm(db.clone()), Some(db))
    };

    let state = AppState::new(repos, jwt_config, db);

    // Create default admin user if the user table is empty
    let admin = &app_cfg.admin;
    state
        .users
        .seed_admin(RegisterUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password: admin.password.clone(),
            full_name: admin.full_name.clone(),
            role: None,
        })
        .await?;

    // ── HTTP server ────────────────────────────────────────────
    let api_router = create_api_router(state);
    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .await?;

    info!("Staff Service stopped");
    Ok(())
}
