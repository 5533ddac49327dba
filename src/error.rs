//! 统一错误处理
//!
//! 提供 `ApiError` 枚举实现 `IntoResponse`，所有错误响应统一为 `{name, message, error}` 结构

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ValidationError;

/// API 错误响应结构
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// 机器可读的错误名 (e.g., "invalid_body")
    pub name: String,
    /// 面向用户的说明
    pub message: String,
    /// 原始错误详情
    pub error: String,
}

impl ErrorResponse {
    pub fn new(name: impl Into<String>, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            error: error.into(),
        }
    }
}

/// 统一 API 错误类型
#[derive(Debug)]
pub enum ApiError {
    /// 400 - 请求体无法解析为 ApplicationConfig（JSON 格式错误或 source 形状未知）
    InvalidBody(String),
    /// 400 - 严格模式下必填字段校验失败
    InvalidApplication(ValidationError),
    /// 409 - 启用唯一名称时名称已被占用
    DuplicateName(String),
}

impl ApiError {
    /// 创建请求体无效错误
    pub fn invalid_body(detail: impl Into<String>) -> Self {
        Self::InvalidBody(detail.into())
    }

    /// 创建重名错误
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    /// 错误名
    pub fn name(&self) -> &'static str {
        match self {
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::InvalidApplication(_) => "invalid_application",
            ApiError::DuplicateName(_) => "duplicate_name",
        }
    }

    /// HTTP 状态码
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::InvalidApplication(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateName(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidApplication(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let name = self.name();
        let body = match self {
            ApiError::InvalidBody(detail) => {
                ErrorResponse::new(name, "Cannot parse body as JSON", detail)
            }
            ApiError::InvalidApplication(err) => {
                ErrorResponse::new(name, "Application failed validation", err.to_string())
            }
            ApiError::DuplicateName(app_name) => ErrorResponse::new(
                name,
                "Application name already registered",
                format!("an application named '{}' already exists", app_name),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InvalidBody(d) => write!(f, "Invalid body: {}", d),
            ApiError::InvalidApplication(e) => write!(f, "Invalid application: {}", e),
            ApiError::DuplicateName(n) => write!(f, "Duplicate application name: {}", n),
        }
    }
}

impl std::error::Error for ApiError {}

/// 便捷类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldViolation;

    #[test]
    fn test_error_response_new() {
        let resp = ErrorResponse::new("invalid_body", "Cannot parse body as JSON", "EOF");
        assert_eq!(resp.name, "invalid_body");
        assert_eq!(resp.message, "Cannot parse body as JSON");
        assert_eq!(resp.error, "EOF");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::invalid_body("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::duplicate_name("x").status(), StatusCode::CONFLICT);

        let err: ApiError =
            ValidationError::new(vec![FieldViolation::new("name", "is required")]).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.name(), "invalid_application");
    }
}
