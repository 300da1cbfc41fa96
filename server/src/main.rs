//! HBnB API server.
//!
//! Run from repo root: `cargo run -p hbnb-server`
//! Storage, address and limits come from `HBNB_*` environment variables or a `.env` file.

use axum::{extract::Request, ServiceExt};
use hbnb_api::{build_app, store, AppState, Settings};
use tokio::net::TcpListener;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hbnb_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let storage = store::open(&settings.storage).await?;
    let state = AppState::new(storage.clone())?;
    let app = build_app(state, settings.body_limit);

    let listener = TcpListener::bind(settings.address()).await?;
    tracing::info!("HBnB API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.close().await?;
    tracing::info!("storage closed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
