//! # forecast-server
//!
//! REST API that trains a fresh LSTM on every posted series and answers with
//! a recursive multi-step forecast.
//!
//! ```text
//! POST /forecast   {"series": [..], "steps": 3}  ->  {"forecast": [..]}
//! GET  /health     liveness
//! GET  /health/live
//! GET  /health/ready
//! ```

use std::sync::Arc;

use algorithm_facade::{ForecastConfig, Forecaster};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod error;
pub mod routes;

pub use config::{ConfigError, ServerConfig, DEFAULT_PORT};
pub use error::{ApiError, ErrorResponse};
pub use routes::{ForecastRequest, ForecastResponse};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    forecaster: Arc<Forecaster>,
}

impl AppState {
    pub fn new(config: ForecastConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            forecaster: Arc::new(Forecaster::new(config)?),
        })
    }

    pub fn config(&self) -> &ForecastConfig {
        self.forecaster.config()
    }
}

/// Liveness probe - is the server running?
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - can the model stack train and predict?
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let window = state.config().window;
    let check = tokio::task::spawn_blocking(move || -> algorithm_facade::Result<_> {
        let probe = ForecastConfig::new()
            .with_window(window)
            .with_units(2, 2)
            .with_epochs(1)
            .with_seed(0);
        let series: Vec<f64> = (0..=window).map(|i| i as f64).collect();
        Forecaster::new(probe)?.forecast(&series, Some(1))
    })
    .await;

    let (status, message) = match check {
        Ok(Ok(_)) => (StatusCode::OK, None),
        Ok(Err(err)) => (StatusCode::SERVICE_UNAVAILABLE, Some(err.to_string())),
        Err(err) => (StatusCode::SERVICE_UNAVAILABLE, Some(err.to_string())),
    };
    let ready = status == StatusCode::OK;

    let body = serde_json::json!({
        "status": if ready { "ready" } else { "unavailable" },
        "version": env!("CARGO_PKG_VERSION"),
        "checks": [
            { "name": "server", "status": "healthy", "message": null },
            {
                "name": "algorithms",
                "status": if ready { "healthy" } else { "unhealthy" },
                "message": message
            }
        ]
    });
    (status, Json(body))
}

/// Build the router with its middleware stack
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/health", get(liveness))
        .route("/forecast", post(routes::forecast))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Install the global tracing subscriber, honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "forecast_server=info,algorithm_facade=info,tower_http=info".into()
            }),
        )
        .try_init();
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;
    let state = AppState::new(config.forecast)?;

    tracing::info!(
        "forecast-server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
