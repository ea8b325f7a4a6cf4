pub mod cli;
mod validation;

use axum::{
    Router,
    extract::{Json, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::core::{AnalysisRequest, AnalysisResult, RothAnalyzer};
use crate::error::Result;

pub use validation::validate_request;

const SERVICE_NAME: &str = "Roth IRA Conversion Analyzer";

/// Browser origins of the local frontend dev servers.
const ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:3000",
    "http://localhost",
];

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Validates the request and runs the analysis.
pub fn analyze_request(analyzer: &RothAnalyzer, request: &AnalysisRequest) -> Result<AnalysisResult> {
    validate_request(request)?;
    Ok(analyzer.analyze(request))
}

pub fn router(analyzer: Arc<RothAnalyzer>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .fallback(not_found_handler)
        .layer(cors_layer())
        .with_state(analyzer)
}

// Credentialed CORS cannot use wildcards, so methods and headers mirror the
// preflight request instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

pub async fn run_http_server(port: u16, analyzer: RothAnalyzer) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(Arc::new(analyzer));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "{SERVICE_NAME} listening");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/health");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "healthy",
            service: SERVICE_NAME,
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn analyze_handler(
    State(analyzer): State<Arc<RothAnalyzer>>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    match analyze_request(&analyzer, &request) {
        Ok(result) => {
            tracing::info!(
                recommendation = ?result.recommendation,
                breakeven_years = result.breakeven_years,
                "analysis complete"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) if err.is_validation() => {
            tracing::warn!(error = %err, "rejected analysis request");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(err) => {
            tracing::error!(error = %err, "analysis failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
