//! HTTP routes for the document vault

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::core::model::{DeleteResponse, DocsResponse, ErrorResponse, UploadRequest, UploadResponse};
use crate::core::paths::{self, routes, LIVENESS_TEXT, SERVICE_NAME};
use crate::error::VaultError;
use crate::vault::Vault;

#[derive(Clone)]
pub struct AppState { pub vault: Arc<Vault>, pub app_name: String }

impl AppState {
    pub fn new(vault: Arc<Vault>, app_name: impl Into<String>) -> Self {
        Self { vault, app_name: app_name.into() }
    }
}

/// JSON `{"error": ...}` with a status code.
#[derive(Debug)]
pub struct ApiError { status: StatusCode, message: String }

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<VaultError> for ApiError {
    fn from(err: VaultError) -> Self {
        let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.public_message())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        warn!(status = status.as_u16(), reason = %rejection.body_text(), "rejected upload body");
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::new(status, "Payload too large");
        }
        Self::from(VaultError::InvalidRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

pub fn create_router(vault: Arc<Vault>) -> Router {
    create_router_with_limit(vault, paths::DEFAULT_BODY_LIMIT)
}

pub fn create_router_with_limit(vault: Arc<Vault>, body_limit: usize) -> Router {
    Router::new()
        .route(routes::ROOT, get(root))
        .route(routes::HEALTH, get(health))
        .route(routes::UPLOAD, post(upload))
        .route(routes::DOCS, get(list_docs))
        .route(routes::DOC, delete(delete_doc))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(vault, SERVICE_NAME))
}

async fn root() -> &'static str {
    LIVENESS_TEXT
}

async fn health(State(s): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok", "service": s.app_name}))
}

async fn upload(
    State(s): State<AppState>,
    body: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let Json(request) = body?;
    let ipfs_hash = s.vault.upload(request).await?;
    Ok(Json(UploadResponse { ipfs_hash }))
}

async fn list_docs(State(s): State<AppState>, Path(wallet_address): Path<String>) -> Result<Json<DocsResponse>, ApiError> {
    let docs = s.vault.list(&wallet_address).await?;
    Ok(Json(DocsResponse { docs }))
}

async fn delete_doc(
    State(s): State<AppState>,
    Path((wallet_address, ipfs_hash)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>, ApiError> {
    s.vault.delete(&wallet_address, &ipfs_hash).await?;
    Ok(Json(DeleteResponse { success: true }))
}
