//! HTTP front for a candidate provider

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{CandType, CandidateInfo, QueryData, RetrievalError, SharedDispatcher};

/// Body of `POST /candidates`
#[derive(Debug, Deserialize)]
pub struct CandidatesRequest {
    #[serde(default)]
    pub query_num: usize,
    pub query_data: QueryData,
    pub max_qty: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub provider: String,
    pub thread_safe: bool,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub selectors: Vec<CandType>,
    pub description: String,
}

fn status_for(err: &RetrievalError) -> StatusCode {
    match err {
        RetrievalError::InvalidMaxQty(_) | RetrievalError::MalformedQuery { .. } => StatusCode::BAD_REQUEST,
        RetrievalError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn candidates_handler(
    State(dispatcher): State<SharedDispatcher>,
    payload: Result<Json<CandidatesRequest>, JsonRejection>,
) -> Result<Json<CandidateInfo>, (StatusCode, Json<ErrorResponse>)> {
    let Json(req) = payload.map_err(|rejection| {
        error!("Rejected candidates request: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorResponse {
                error: "Invalid request body".to_string(),
                details: Some(rejection.body_text()),
            }),
        )
    })?;
    info!("Received candidates request: query #{}, max_qty={}", req.query_num, req.max_qty);

    match dispatcher
        .get_candidates(req.query_num, &req.query_data, req.max_qty)
        .await
    {
        Ok(info) => Ok(Json(info)),
        Err(e) => {
            error!("Query #{} failed: {}", req.query_num, e);
            Err((
                status_for(&e),
                Json(ErrorResponse {
                    error: "Candidate retrieval failed".to_string(),
                    details: Some(e.to_string()),
                }),
            ))
        }
    }
}

async fn health_handler(State(dispatcher): State<SharedDispatcher>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "candprov".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: dispatcher.provider_name().to_string(),
        thread_safe: dispatcher.is_thread_safe(),
    })
}

async fn providers_handler() -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        selectors: CandType::ALL.to_vec(),
        description: CandType::description(),
    })
}

pub fn create_router(dispatcher: SharedDispatcher) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/providers", get(providers_handler))
        .route("/candidates", post(candidates_handler))
        .with_state(dispatcher)
}

pub async fn run_server(dispatcher: SharedDispatcher, addr: &str) -> anyhow::Result<()> {
    info!("Starting candidate server on {}", addr);

    let app = create_router(dispatcher);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
