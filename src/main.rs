use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use petstore_api::auth::{HmacTokenAuthority, TokenAuthority};
use petstore_api::{app, config, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "petstore_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::config();

    let pool = database::connect(&config.database_url).await?;
    database::migrate(&pool).await?;

    let tokens: Arc<dyn TokenAuthority> = Arc::new(HmacTokenAuthority::new(
        &config.jwt_secret,
        config.jwt_expiry_hours,
    ));
    let state = AppState::new(pool, tokens);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("petstore listening on {}", listener.local_addr()?);

    // The signal future both triggers axum's graceful shutdown and tells the
    // main task to start the drain clock.
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app(state))
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = shutdown_tx.send(());
            })
            .await
    });

    // Errors here mean the server exited on its own; fall through and collect
    // its result either way.
    let _ = shutdown_rx.await;
    tracing::info!("shutdown signal received, draining in-flight requests");

    let grace = Duration::from_secs(config.shutdown_grace_secs);
    match tokio::time::timeout(grace, server).await {
        Ok(joined) => joined??,
        Err(_) => {
            tracing::warn!("shutdown window elapsed, abandoning in-flight requests");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install ctrl-c handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("failed to install sigterm handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
