use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hrsadmin_api::auth::password::hash_password;
use hrsadmin_api::config::ServerConfig;
use hrsadmin_api::router::build_app_router;
use hrsadmin_api::state::AppState;
use hrsadmin_api::ws;

use hrsadmin_core::roles::ROLE_OWNER;
use hrsadmin_db::models::user::CreateUser;
use hrsadmin_db::repositories::{RoleRepo, UserRepo};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hrsadmin_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = hrsadmin_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    hrsadmin_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    hrsadmin_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Owner bootstrap ---
    bootstrap_owner(&pool).await.expect("Owner bootstrap failed");

    // --- Presence registry ---
    let presence = Arc::new(ws::PresenceRegistry::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&presence));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        presence: Arc::clone(&presence),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let ws_count = presence.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    presence.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Create the owner account on first run if `ADMIN_EMAIL` and
/// `ADMIN_PASSWORD` are set and no owner exists yet.
///
/// Without these variables the instance relies on `POST /auth/setup-admin`
/// for its first owner.
async fn bootstrap_owner(pool: &hrsadmin_db::DbPool) -> Result<(), sqlx::Error> {
    let (email, password) = match (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        (Ok(e), Ok(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => {
            tracing::info!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping owner bootstrap");
            return Ok(());
        }
    };

    let owner_role = RoleRepo::find_by_name(pool, ROLE_OWNER)
        .await?
        .expect("Owner role must be seeded by migrations");

    if UserRepo::any_with_role(pool, owner_role.id).await? {
        tracing::debug!("Owner account already exists, skipping bootstrap");
        return Ok(());
    }

    let hashed = hash_password(&password).expect("Failed to hash bootstrap password");
    let create_dto = CreateUser {
        email: email.clone(),
        password_hash: hashed,
        role_id: owner_role.id,
        first_name: "Admin".to_string(),
        last_name: String::new(),
    };
    UserRepo::create(pool, &create_dto).await?;
    tracing::info!(%email, "Bootstrapped owner account");

    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
