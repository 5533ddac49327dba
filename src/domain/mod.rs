//! 领域模型模块
//!
//! 纯数据结构，不依赖 axum/tokio

pub mod application;
pub mod error;

// Re-exports for convenience
pub use application::{seed_applications, ApplicationConfig, CodeSource, CodeSourceInfo};
pub use error::{FieldViolation, ModelError, ValidationError};
