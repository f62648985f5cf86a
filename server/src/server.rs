//! Router assembly and the serve loop.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use murmur_synth::WeightSpec;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::artifacts::ArtifactStore;
use crate::config::Config;
use crate::error::Result;
use crate::state::AppContext;
use crate::{handlers, loader};

/// Builds the HTTP router over the shared context.
pub fn router(ctx: Arc<AppContext>, config: &Config) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/tts", post(handlers::tts))
        .with_state(ctx);

    match config.allow_origin.parse::<HeaderValue>() {
        Ok(origin) => {
            let cors = CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true);
            app = app.layer(cors);
        }
        Err(err) => warn!(
            "invalid allow-origin {:?}, CORS disabled: {}",
            config.allow_origin, err
        ),
    }

    app
}

/// Runs the daemon: spawns the model loader, serves until interrupted,
/// then flushes remaining temp artifacts.
///
/// The listener accepts connections immediately; requests arriving before
/// the loader finishes are rejected by the readiness gate, not queued.
pub async fn serve(config: Config) -> Result<()> {
    let ctx = AppContext::new(ArtifactStore::new(config.artifact_dir.clone()));

    let mut spec = WeightSpec::new(config.model_repo.clone(), config.model_file.clone());
    spec.revision = config.model_revision.clone();
    let loader = tokio::spawn(loader::run(ctx.clone(), loader::fetch_and_load(spec)));

    let app = router(ctx.clone(), &config);
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The loader is cancellable at shutdown; only the readiness phase is
    // observable afterwards.
    loader.abort();

    let pending = ctx.artifacts().live_count();
    if pending > 0 {
        info!("flushing {} pending temp artifact(s)", pending);
    }
    ctx.artifacts().flush();
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            // Without a signal handler the server can only be killed hard;
            // never treat the failure itself as a shutdown request.
            warn!("failed to install ctrl-c handler: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
