//! 健康检查 API
//!
//! GET / 端点

use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

/// 健康检查响应
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// 固定为 "Server is up and running"
    pub data: String,
}

/// 创建健康检查路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(health_check))
}

/// 健康检查，与注册表状态无关
///
/// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        data: "Server is up and running".to_string(),
    })
}
