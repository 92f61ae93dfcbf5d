use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use dataset::CategoryRegistry;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct AppState {
    seed_path: PathBuf,
    registry: CategoryRegistry,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed_path = env::var("SEED_POINTS_PATH")
        .unwrap_or_else(|_| "crates/apps/points_server/assets/seed-points.json".to_string());
    let addr: SocketAddr = env::var("POINTS_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:9400".to_string())
        .parse()
        .expect("invalid POINTS_ADDR");

    let state = AppState {
        seed_path: PathBuf::from(seed_path),
        registry: CategoryRegistry::builtin(),
    };

    match tokio::fs::read(&state.seed_path).await {
        Ok(bytes) => match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(v) => info!(
                "seed asset {:?}: {} records",
                state.seed_path,
                v.as_array().map(|a| a.len()).unwrap_or(0)
            ),
            Err(err) => warn!("seed asset is not valid JSON: {err}"),
        },
        Err(err) => warn!("seed asset unreadable: {:?} -> {err}", state.seed_path),
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/seed-points.json", get(get_seed_points))
        .route("/categories.json", get(get_categories))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("points server listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_seed_points(State(state): State<AppState>) -> Response {
    serve_seed_file(&state.seed_path).await
}

async fn get_categories(State(state): State<AppState>) -> Response {
    Json(state.registry.categories()).into_response()
}

// The seed asset is served with no-store so every session observes the
// current file, never a cached copy.
async fn serve_seed_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(data) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            headers.insert(
                http::header::CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            );
            (StatusCode::OK, headers, Body::from(data)).into_response()
        }
        Err(err) => {
            error!("seed read failed: {path:?} -> {err}");
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}
