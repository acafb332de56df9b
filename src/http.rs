//! Thin HTTP surface over the bundle cache. Field naming here is
//! presentation only; all correctness lives in the pipeline.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::error;

use crate::cache::BundleCache;
use crate::error::SourceUnavailable;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<BundleCache>,
}

pub fn router(cache: Arc<BundleCache>) -> Router {
    Router::new()
        .route("/api/records", get(records))
        .route("/api/metrics/global", get(global_metrics))
        .route("/api/metrics/programs", get(program_performance))
        .route("/api/metrics/axes", get(axis_performance))
        .route("/api/financial/summary", get(financial_summary))
        .route("/api/reload", post(reload))
        .route("/health", get(health))
        .with_state(AppState { cache })
}

async fn records(State(state): State<AppState>) -> Response {
    match state.cache.get().await {
        Ok(bundle) => Json(json!({
            "success": true,
            "data": bundle.records,
            "metadata": bundle.metadata,
        }))
        .into_response(),
        Err(e) => fail(&e),
    }
}

async fn global_metrics(State(state): State<AppState>) -> Response {
    match state.cache.get().await {
        Ok(bundle) => ok(&bundle.global_metrics),
        Err(e) => fail(&e),
    }
}

async fn program_performance(State(state): State<AppState>) -> Response {
    match state.cache.get().await {
        Ok(bundle) => ok(&bundle.program_performance),
        Err(e) => fail(&e),
    }
}

async fn axis_performance(State(state): State<AppState>) -> Response {
    match state.cache.get().await {
        Ok(bundle) => ok(&bundle.axis_performance),
        Err(e) => fail(&e),
    }
}

async fn financial_summary(State(state): State<AppState>) -> Response {
    match state.cache.get().await {
        Ok(bundle) => ok(&bundle.financial_summary),
        Err(e) => fail(&e),
    }
}

async fn reload(State(state): State<AppState>) -> Response {
    match state.cache.reload().await {
        Ok(bundle) => Json(json!({
            "success": true,
            "message": "data reloaded",
            "metadata": bundle.metadata,
        }))
        .into_response(),
        Err(e) => fail(&e),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK" }))
}

fn ok(data: &impl serde::Serialize) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

fn fail(e: &SourceUnavailable) -> Response {
    error!(source = %e.source_id, cause = %e.cause, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "error": e.to_string() })),
    )
        .into_response()
}
