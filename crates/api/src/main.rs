use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use spasibka_engine::roster::RosterSyncScheduler;
use spasibka_engine::Engine;
use spasibka_events::{BitrixClient, EventBus, NotificationDispatcher, Notifier, RosterProvider};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spasibka_api::app::build_app;
use spasibka_api::config::ServerConfig;
use spasibka_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid configuration");

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "spasibka_api=debug,spasibka_engine=debug,tower_http=debug".into()
            }),
        )
        .with(config.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.log_json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = spasibka_db::create_pool(&config.database_url, config.pool_settings())
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    spasibka_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    spasibka_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus + engine ---
    let event_bus = Arc::new(EventBus::default());
    let engine = Engine::new(pool, config.reward_policy(), Arc::clone(&event_bus));
    tracing::info!(
        coins_per_like = config.reward_coins,
        grace_secs = config.game_end_grace_secs,
        "Engine ready"
    );

    // --- Bitrix24 integration ---
    let bitrix = match config.bitrix_webhook_url.as_deref().map(BitrixClient::new) {
        Some(Ok(client)) => Some(Arc::new(client)),
        Some(Err(e)) => {
            tracing::error!(error = %e, "Failed to build Bitrix24 client, integration disabled");
            None
        }
        None => {
            tracing::warn!("BITRIX_WEBHOOK_URL not set, notifications and roster sync disabled");
            None
        }
    };

    let dispatcher_handle = bitrix.as_ref().map(|client| {
        let notifier: Arc<dyn Notifier> = Arc::clone(client) as Arc<dyn Notifier>;
        let dispatcher = NotificationDispatcher::new(notifier);
        let receiver = event_bus.subscribe();
        tokio::spawn(async move { dispatcher.run(receiver).await })
    });

    let roster_provider: Option<Arc<dyn RosterProvider>> =
        bitrix.map(|client| client as Arc<dyn RosterProvider>);

    let scheduler_cancel = CancellationToken::new();
    let scheduler_handle = match (&roster_provider, config.roster_sync_interval_secs) {
        (Some(provider), secs) if secs > 0 => {
            let scheduler = RosterSyncScheduler::new(
                engine.clone(),
                Arc::clone(provider),
                Duration::from_secs(secs),
            );
            let cancel = scheduler_cancel.clone();
            Some(tokio::spawn(async move { scheduler.run(cancel).await }))
        }
        _ => None,
    };

    // --- App state ---
    let state = AppState {
        engine,
        config: Arc::new(config.clone()),
        roster_provider,
    };
    let app = build_app(state);

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

    scheduler_cancel.cancel();
    if let Some(handle) = scheduler_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Roster sync scheduler stopped");
    }

    // The dispatcher exits once the last bus handle is gone.
    drop(event_bus);
    if let Some(handle) = dispatcher_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Notification dispatcher stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
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
