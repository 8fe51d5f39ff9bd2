//! HTTP API exposing the manual service.
//!
//! Every success response carries the `{"success": true, ...}` envelope the
//! client application expects; failures are emitted by
//! [`ServerError::into_response`] as `{"success": false, "message": ...}`.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use lectio_core::{ManualDraft, ManualPatch, ManualService};
use lectio_store::{Manual, Month};

use crate::config::ServerConfig;
use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    /// The store connection is synchronous, so requests serialize on this
    /// mutex; acceptable for a low-volume content API.
    pub service: Arc<tokio::sync::Mutex<ManualService>>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/manuals/recommended", get(recommended))
        .route("/manuals/month/{month}", get(manuals_by_month))
        .route("/manuals/all", get(all_manuals))
        .route("/manuals/manual/{id}", get(manual_by_id))
        .route("/manuals/create", post(create_manual))
        .route("/manuals/update/{id}", put(update_manual))
        .route("/manuals/delete/{id}", delete(delete_manual))
        .route("/manuals/delete/month/{month}", delete(delete_month))
        .route("/manuals/clear/all", delete(clear_all))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    name: String,
    version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendedResponse {
    success: bool,
    data: Vec<Manual>,
    current_month: Month,
    next_month: Month,
    current_date: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
struct MonthResponse {
    success: bool,
    month: Month,
    count: usize,
    data: Vec<Manual>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AllManualsResponse {
    success: bool,
    data: BTreeMap<Month, Vec<Manual>>,
    total_manuals: usize,
}

#[derive(Serialize, Debug)]
struct ManualResponse {
    success: bool,
    data: Manual,
}

#[derive(Serialize)]
struct MutationResponse {
    success: bool,
    message: &'static str,
    data: Manual,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: state.config.instance_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn recommended(
    State(state): State<AppState>,
) -> Result<Json<RecommendedResponse>, ServerError> {
    let service = state.service.lock().await;
    let rec = service.recommended()?;

    Ok(Json(RecommendedResponse {
        success: true,
        data: rec.manuals,
        current_month: rec.current_month,
        next_month: rec.next_month,
        current_date: rec.resolved_at,
    }))
}

async fn manuals_by_month(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<MonthResponse>, ServerError> {
    let service = state.service.lock().await;
    let (month, manuals) = service.by_month(&month)?;

    Ok(Json(MonthResponse {
        success: true,
        month,
        count: manuals.len(),
        data: manuals,
    }))
}

async fn all_manuals(
    State(state): State<AppState>,
) -> Result<Json<AllManualsResponse>, ServerError> {
    let service = state.service.lock().await;
    let grouped = service.all_grouped()?;

    Ok(Json(AllManualsResponse {
        success: true,
        data: grouped.months,
        total_manuals: grouped.total,
    }))
}

async fn manual_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ManualResponse>, ServerError> {
    let service = state.service.lock().await;
    let manual = service.by_id(id)?;

    Ok(Json(ManualResponse {
        success: true,
        data: manual,
    }))
}

async fn create_manual(
    State(state): State<AppState>,
    Json(draft): Json<ManualDraft>,
) -> Result<(StatusCode, Json<MutationResponse>), ServerError> {
    let service = state.service.lock().await;
    let manual = service.create(draft)?;

    info!(id = %manual.id, month = %manual.month, "manual created via API");

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            success: true,
            message: "Manual created successfully",
            data: manual,
        }),
    ))
}

async fn update_manual(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ManualPatch>,
) -> Result<Json<MutationResponse>, ServerError> {
    let service = state.service.lock().await;
    let manual = service.update(id, patch)?;

    Ok(Json(MutationResponse {
        success: true,
        message: "Manual updated successfully",
        data: manual,
    }))
}

async fn delete_manual(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MutationResponse>, ServerError> {
    let service = state.service.lock().await;
    let manual = service.delete(id)?;

    Ok(Json(MutationResponse {
        success: true,
        message: "Manual deleted successfully",
        data: manual,
    }))
}

async fn delete_month(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let service = state.service.lock().await;
    let (month, deleted) = service.delete_by_month(&month)?;

    info!(month = %month, deleted, "month cleared via API");

    Ok(Json(serde_json::json!({
        "success": true,
        "month": month,
        "deleted": deleted,
    })))
}

async fn clear_all(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let service = state.service.lock().await;
    let deleted = service.delete_all()?;

    info!(deleted, "all manuals cleared via API");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("Deleted {deleted} manuals"),
    })))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
