//! 应用注册 API
//!
//! 包含 GET/POST /applications 端点

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::warn;

use crate::domain::ApplicationConfig;
use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::state::AppState;

/// 创建应用注册路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/applications", get(list_applications).post(create_application))
}

/// 按注册顺序列出所有应用
///
/// GET /applications
#[utoipa::path(
    get,
    path = "/applications",
    tag = "applications",
    responses((status = 200, description = "All registered applications", body = [ApplicationConfig]))
)]
pub async fn list_applications(State(state): State<Arc<AppState>>) -> Json<Vec<ApplicationConfig>> {
    Json(state.registry.list().await)
}

/// 注册新应用
///
/// POST /applications
///
/// 请求体不看 Content-Type，直接按 JSON 解析
#[utoipa::path(
    post,
    path = "/applications",
    tag = "applications",
    request_body(
        content = ApplicationConfig,
        content_type = "application/json",
        description = "Application to register. `source.type` is optional on input: when omitted the variant is inferred from the fields present (`repo` + `branch` for github, `zip_file` for zip). Responses always include it."
    ),
    responses(
        (status = 201, description = "Application registered", body = ApplicationConfig),
        (status = 400, description = "Body is not a valid application", body = ErrorResponse),
        (status = 409, description = "Name already registered (unique names enabled)", body = ErrorResponse)
    )
)]
pub async fn create_application(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let application: ApplicationConfig = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Rejected application body");
        ApiError::invalid_body(e.to_string())
    })?;

    if state.validates_on_create() {
        application.validate().map_err(|e| {
            warn!(name = %application.name, error = %e, "Application failed validation");
            ApiError::from(e)
        })?;
    }

    let stored = if state.config.unique_names {
        state
            .registry
            .append_unique(application)
            .await
            .map_err(|rejected| {
                warn!(name = %rejected.name, "Application name already registered");
                ApiError::duplicate_name(rejected.name)
            })?
    } else {
        state.registry.append(application).await
    };

    tracing::info!(
        name = %stored.name,
        platform = %stored.platform,
        source = %stored.source.source_kind(),
        "Registered application"
    );

    Ok((StatusCode::CREATED, Json(stored)))
}
