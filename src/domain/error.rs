//! 领域错误

use std::fmt;
use thiserror::Error;

/// 模型构造错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// `source` 既不是 GitHub 形状也不是 Zip 形状
    #[error("invalid source format: expected {{\"repo\", \"branch\"}} or {{\"zip_file\"}}")]
    InvalidSourceFormat,
}

/// 单个字段的校验失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// 应用配置校验错误，包含所有缺失或无效的字段
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", format_violations(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
