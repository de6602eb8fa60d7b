//! HTTP surface for the correction pipeline.
//!
//! Endpoints:
//!   POST   /api/correct  — full pipeline (merge, classify, score, cache)
//!   POST   /api/check    — provider findings only
//!   GET    /api/history
//!   DELETE /api/history
//!   GET    /api/health

use crate::checker::{score, Corrector};
use crate::history::HistoryStore;
use crate::{Config, CorrectError, CorrectionResult};
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub struct AppContext {
    pub corrector: Corrector,
    pub history: HistoryStore,
    pub started_at: Instant,
}

impl AppContext {
    pub fn new(config: &Config) -> Self {
        let history_path = config
            .history_path
            .clone()
            .or_else(Config::default_history_path)
            .unwrap_or_else(|| "orthoflow-history.json".into());

        Self {
            corrector: Corrector::new(config),
            history: HistoryStore::new(history_path, config.history_limit),
            started_at: Instant::now(),
        }
    }
}

pub async fn start_server(config: &Config) -> Result<()> {
    let addr: SocketAddr = config.bind.parse()?;
    let ctx = Arc::new(AppContext::new(config));
    let router = build_router(ctx);

    info!("correction API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/correct", post(correct))
        .route("/api/check", post(check))
        .route("/api/history", get(list_history).delete(clear_history))
        .with_state(ctx)
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(err: CorrectError) -> ApiError {
    let status = match err {
        CorrectError::InvalidInput => StatusCode::BAD_REQUEST,
        CorrectError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

#[derive(Deserialize)]
pub struct CorrectRequest {
    #[serde(default)]
    pub text: String,
}

async fn correct(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<CorrectRequest>,
) -> Result<Json<CorrectionResult>, ApiError> {
    let result = ctx.corrector.correct(&body.text).await.map_err(api_error)?;

    // History is best-effort; a write failure never fails the request.
    let readability = score::readability(&result.text);
    if let Err(e) = ctx
        .history
        .save(&result.text, &result.corrections, readability)
    {
        warn!("failed to record history entry: {e:#}");
    }

    Ok(Json(result))
}

async fn check(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<CorrectRequest>,
) -> Result<Json<Value>, ApiError> {
    let findings = ctx
        .corrector
        .check_remote(&body.text)
        .await
        .map_err(api_error)?;
    Ok(Json(json!({ "matches": findings })))
}

async fn list_history(State(ctx): State<Arc<AppContext>>) -> Result<Json<Value>, ApiError> {
    match ctx.history.list() {
        Ok(entries) => Ok(Json(json!({ "entries": entries }))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

async fn clear_history(State(ctx): State<Arc<AppContext>>) -> Result<Json<Value>, ApiError> {
    match ctx.history.clear() {
        Ok(()) => Ok(Json(json!({ "cleared": true }))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

async fn health(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let uptime = ctx.started_at.elapsed().as_secs();
    Json(json!({
        "status": "ok",
        "uptime_secs": uptime,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
