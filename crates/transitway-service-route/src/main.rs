//! Transitway route planning HTTP microservice.
//!
//! This service provides a REST API for computing routes between stops in
//! the transit network, supporting multiple algorithms and queue backends.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - Compute a route between two stops
//! - `GET /api/v1/stops` - List all stops, ordered by name
//! - `GET /api/v1/stops/{id}` - Fetch a single stop
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Configuration
//!
//! - `TRANSITWAY_DATA_PATH` - Path to the transit sqlite database (required)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: text (default) or json
//! - `SERVICE_PORT` - HTTP port (default: 8080)

mod problem;
mod state;

use std::env;
use std::net::SocketAddr;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transitway_lib::{plan_route, Node, QueueBackend, RouteAlgorithm, RoutePlan, RouteRequest};

use crate::problem::ProblemDetails;
use crate::state::AppState;

const SERVICE_NAME: &str = "transitway-route";

/// Request body for `POST /api/v1/route`.
#[derive(Debug, Deserialize)]
struct ApiRouteRequest {
    from: String,
    to: String,
    #[serde(default)]
    algorithm: RouteAlgorithm,
    #[serde(default)]
    queue: QueueBackend,
}

/// Health status response for liveness and readiness probes.
#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stops_loaded: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edges_loaded: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let data_path =
        env::var("TRANSITWAY_DATA_PATH").unwrap_or_else(|_| "/data/transit.db".to_string());
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(data_path = %data_path, port, "starting route service");

    let state = AppState::load(data_path.as_ref()).map_err(|e| {
        error!(error = %e, path = %data_path, "failed to load transit network");
        e
    })?;

    info!(
        stops = state.network().stops.len(),
        edges = state.network().records.len(),
        "transit network loaded"
    );

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing from `RUST_LOG` and `LOG_FORMAT`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT")
        .map(|value| value.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/api/v1/stops", get(stops_handler))
        .route("/api/v1/stops/{id}", get(stop_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle `POST /api/v1/route` requests.
async fn route_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiRouteRequest>,
) -> Result<Json<RoutePlan>, ProblemDetails> {
    info!(
        from = %request.from,
        to = %request.to,
        algorithm = %request.algorithm,
        queue = %request.queue,
        "handling route request"
    );

    let lib_request = RouteRequest {
        from: request.from,
        to: request.to,
        algorithm: request.algorithm,
        queue: request.queue,
    };

    match plan_route(state.network(), &lib_request) {
        Ok(plan) => {
            info!(
                legs = plan.leg_count(),
                total_distance_km = plan.total_distance_km,
                transfers = plan.transfers,
                "route computed"
            );
            Ok(Json(plan))
        }
        Err(e) => {
            error!(error = %e, "route planning failed");
            Err(ProblemDetails::from_lib_error(&e))
        }
    }
}

/// Handle `GET /api/v1/stops` requests.
async fn stops_handler(State(state): State<AppState>) -> Json<Vec<Node>> {
    let stops = state
        .network()
        .stops_by_name()
        .into_iter()
        .cloned()
        .collect();
    Json(stops)
}

/// Handle `GET /api/v1/stops/{id}` requests.
async fn stop_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Node>, ProblemDetails> {
    state
        .network()
        .stop_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            ProblemDetails::unknown_stop(&id, &state.network().fuzzy_stop_matches(&id, 3))
        })
}

async fn health_live() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        stops_loaded: None,
        edges_loaded: None,
    })
}

async fn health_ready(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        stops_loaded: Some(state.network().stops.len()),
        edges_loaded: Some(state.network().records.len()),
    })
}
