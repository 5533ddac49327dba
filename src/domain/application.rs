//! 应用配置领域模型
//!
//! `CodeSourceInfo` 序列化时带显式的 `type` 判别字段；
//! 反序列化时兼容旧客户端，未携带 `type` 时按字段形状推断

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::error::{FieldViolation, ModelError, ValidationError};

/// 代码来源类型
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CodeSource {
    Github,
    Zip,
}

impl CodeSource {
    /// 转换为字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeSource::Github => "github",
            CodeSource::Zip => "zip",
        }
    }
}

impl fmt::Display for CodeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 代码来源信息
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case", try_from = "RawCodeSource")]
pub enum CodeSourceInfo {
    /// GitHub 仓库 (e.g., repo = "github.com/username/my-app", branch = "main")
    Github { repo: String, branch: String },
    /// Zip 压缩包 URL (e.g., "https://example.com/my-app.zip")
    Zip { zip_file: String },
}

impl CodeSourceInfo {
    pub fn github(repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self::Github {
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    pub fn zip(zip_file: impl Into<String>) -> Self {
        Self::Zip {
            zip_file: zip_file.into(),
        }
    }

    /// 获取代码来源类型
    pub fn source_kind(&self) -> CodeSource {
        match self {
            CodeSourceInfo::Github { .. } => CodeSource::Github,
            CodeSourceInfo::Zip { .. } => CodeSource::Zip,
        }
    }

    fn violations(&self) -> Vec<FieldViolation> {
        let mut out = Vec::new();
        match self {
            CodeSourceInfo::Github { repo, branch } => {
                require_text(&mut out, "source.repo", repo);
                require_text(&mut out, "source.branch", branch);
            }
            CodeSourceInfo::Zip { zip_file } => {
                require_text(&mut out, "source.zip_file", zip_file);
            }
        }
        out
    }
}

/// 线上原始形状，仅用于反序列化
#[derive(Debug, Deserialize)]
struct RawCodeSource {
    #[serde(rename = "type")]
    kind: Option<CodeSource>,
    repo: Option<String>,
    branch: Option<String>,
    zip_file: Option<String>,
}

impl TryFrom<RawCodeSource> for CodeSourceInfo {
    type Error = ModelError;

    fn try_from(raw: RawCodeSource) -> Result<Self, Self::Error> {
        let github = match (raw.repo, raw.branch) {
            (Some(repo), Some(branch)) => Some(CodeSourceInfo::Github { repo, branch }),
            (None, None) => None,
            _ => return Err(ModelError::InvalidSourceFormat),
        };
        let zip = raw.zip_file.map(|zip_file| CodeSourceInfo::Zip { zip_file });

        match (raw.kind, github, zip) {
            (Some(CodeSource::Github), Some(source), None)
            | (Some(CodeSource::Zip), None, Some(source))
            | (None, Some(source), None)
            | (None, None, Some(source)) => Ok(source),
            _ => Err(ModelError::InvalidSourceFormat),
        }
    }
}

/// 用户云应用配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ApplicationConfig {
    /// e.g. "my-app"
    #[serde(default)]
    pub name: String,
    /// e.g. "My awesome app"
    #[serde(default)]
    pub description: String,
    /// e.g. "example.com"
    #[serde(default)]
    pub domain: String,
    /// e.g. 8080, 80
    #[serde(default)]
    pub port: i64,
    /// e.g. "NodeJS", "Go", "Python"
    #[serde(default)]
    pub platform: String,
    /// e.g. "16.x", "1.x", "3.x"
    #[serde(default)]
    pub version: String,
    pub source: CodeSourceInfo,
}

impl ApplicationConfig {
    /// 检查必填字段
    ///
    /// 只检查字段是否存在且非空，不做网络或语义校验
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        require_text(&mut violations, "name", &self.name);
        require_text(&mut violations, "description", &self.description);
        require_text(&mut violations, "domain", &self.domain);
        if !(1..=65535).contains(&self.port) {
            violations.push(FieldViolation::new(
                "port",
                format!("must be between 1 and 65535, got {}", self.port),
            ));
        }
        require_text(&mut violations, "platform", &self.platform);
        require_text(&mut violations, "version", &self.version);
        violations.extend(self.source.violations());

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

fn require_text(out: &mut Vec<FieldViolation>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        out.push(FieldViolation::new(field, "is required"));
    }
}

/// 启动时预置的两个示例应用
pub fn seed_applications() -> Vec<ApplicationConfig> {
    vec![
        ApplicationConfig {
            name: "my-back-end-app".to_string(),
            description: "My nodejs back-end app".to_string(),
            domain: "example.com".to_string(),
            port: 8080,
            platform: "NodeJS".to_string(),
            version: "16.x".to_string(),
            source: CodeSourceInfo::github("github.com/username/my-back-end-app", "main"),
        },
        ApplicationConfig {
            name: "my-front-end-app".to_string(),
            description: "My react front-end app".to_string(),
            domain: "example.com".to_string(),
            port: 80,
            platform: "React".to_string(),
            version: "17.x".to_string(),
            source: CodeSourceInfo::zip("https://example.com/my-front-end-app.zip"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_source(value: serde_json::Value) -> Result<CodeSourceInfo, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_source_inferred_from_shape() {
        let github = parse_source(json!({ "repo": "x", "branch": "y" })).unwrap();
        assert_eq!(github.source_kind(), CodeSource::Github);
        assert_eq!(github, CodeSourceInfo::github("x", "y"));

        let zip = parse_source(json!({ "zip_file": "z" })).unwrap();
        assert_eq!(zip.source_kind(), CodeSource::Zip);
    }

    #[test]
    fn test_source_with_explicit_type() {
        let github = parse_source(json!({ "type": "github", "repo": "x", "branch": "y" })).unwrap();
        assert_eq!(github.source_kind(), CodeSource::Github);

        let zip = parse_source(json!({ "type": "zip", "zip_file": "z" })).unwrap();
        assert_eq!(zip.source_kind(), CodeSource::Zip);
    }

    #[test]
    fn test_source_rejects_unknown_shapes() {
        assert!(parse_source(json!({})).is_err());
        assert!(parse_source(json!({ "url": "https://example.com" })).is_err());
        // 只有 repo 没有 branch
        assert!(parse_source(json!({ "repo": "x" })).is_err());
        // 两种形状同时出现
        assert!(parse_source(json!({ "repo": "x", "branch": "y", "zip_file": "z" })).is_err());
        // 判别字段与字段形状矛盾
        assert!(parse_source(json!({ "type": "zip", "repo": "x", "branch": "y" })).is_err());
        assert!(parse_source(json!({ "type": "ftp", "zip_file": "z" })).is_err());
    }

    #[test]
    fn test_source_error_mentions_format() {
        let err = parse_source(json!({ "url": "x" })).unwrap_err();
        assert!(err.to_string().contains("invalid source format"));
    }

    #[test]
    fn test_source_serializes_discriminant() {
        let value = serde_json::to_value(CodeSourceInfo::github("x", "y")).unwrap();
        assert_eq!(value, json!({ "type": "github", "repo": "x", "branch": "y" }));

        let value = serde_json::to_value(CodeSourceInfo::zip("z")).unwrap();
        assert_eq!(value, json!({ "type": "zip", "zip_file": "z" }));
    }

    #[test]
    fn test_missing_fields_still_parse() {
        let app: ApplicationConfig =
            serde_json::from_value(json!({ "name": "a", "source": { "zip_file": "z" } })).unwrap();
        assert_eq!(app.name, "a");
        assert_eq!(app.port, 0);
        assert!(app.description.is_empty());
    }

    #[test]
    fn test_missing_source_is_rejected() {
        let result: Result<ApplicationConfig, _> = serde_json::from_value(json!({ "name": "a" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_seed_applications_are_valid() {
        let seeds = seed_applications();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].name, "my-back-end-app");
        assert_eq!(seeds[0].source.source_kind(), CodeSource::Github);
        assert_eq!(seeds[1].name, "my-front-end-app");
        assert_eq!(seeds[1].source.source_kind(), CodeSource::Zip);
        for app in &seeds {
            assert!(app.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let app = ApplicationConfig {
            name: "a".to_string(),
            description: String::new(),
            domain: "  ".to_string(),
            port: 0,
            platform: "Go".to_string(),
            version: "1.x".to_string(),
            source: CodeSourceInfo::github("", "main"),
        };

        let err = app.validate().unwrap_err();
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["description", "domain", "port", "source.repo"]);
    }

    #[test]
    fn test_validate_port_range() {
        let mut app = seed_applications().remove(0);
        app.port = 65536;
        assert!(app.validate().is_err());
        app.port = -1;
        assert!(app.validate().is_err());
        app.port = 65535;
        assert!(app.validate().is_ok());
    }
}
