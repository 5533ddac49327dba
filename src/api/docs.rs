//! OpenAPI 文档
//!
//! GET /swagger/doc.json 返回机器可读的 API 描述

use axum::{routing::get, Json, Router};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::domain::{ApplicationConfig, CodeSource, CodeSourceInfo};
use crate::error::ErrorResponse;
use crate::state::AppState;

use super::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Swagger - CloudAppHive API",
        version = "1.0",
        description = "This is a sample CloudAppHive server.",
        terms_of_service = "http://swagger.io/terms/",
        contact(
            name = "CP0 Support",
            url = "http://www.cp0.io/support",
            email = "support.cp0@gmail.com"
        ),
        license(name = "Apache 2.0", url = "http://www.apache.org/licenses/LICENSE-2.0.html")
    ),
    servers((url = "http://localhost:8080")),
    paths(
        super::health::health_check,
        super::applications::list_applications,
        super::applications::create_application,
    ),
    components(schemas(
        ApplicationConfig,
        CodeSourceInfo,
        CodeSource,
        ErrorResponse,
        HealthResponse
    )),
    tags(
        (name = "root", description = "Service status"),
        (name = "applications", description = "Cloud application registry")
    )
)]
pub struct ApiDoc;

/// 创建文档路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/swagger/doc.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
