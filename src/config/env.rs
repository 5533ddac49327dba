//! 环境变量配置加载

use std::net::IpAddr;
use tracing::warn;

/// POST /applications 的校验策略
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// 只要能解析就接受（缺失字段以默认值入库）
    #[default]
    Lenient,
    /// 入库前调用 `ApplicationConfig::validate`
    Strict,
}

impl ValidationMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Lenient => "lenient",
            ValidationMode::Strict => "strict",
        }
    }
}

/// 日志输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }

    /// 只读取 LOG_FORMAT，无效值静默回退
    ///
    /// 在 tracing 初始化之前调用，完整配置在初始化之后再加载
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        lookup("LOG_FORMAT")
            .and_then(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// 环境配置
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// 监听地址
    pub host: IpAddr,
    /// 服务监听端口
    pub port: u16,
    /// 校验策略
    pub validation: ValidationMode,
    /// 是否拒绝重名应用
    pub unique_names: bool,
    /// 启动时是否写入示例应用
    pub seed: bool,
    /// 日志格式
    pub log_format: LogFormat,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: constants::DEFAULT_PORT,
            validation: ValidationMode::default(),
            unique_names: false,
            seed: true,
            log_format: LogFormat::default(),
        }
    }
}

impl EnvConfig {
    /// 从查找函数加载配置，生产环境传入 `std::env::var`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(v) => v.parse().unwrap_or_else(|_| {
                warn!(value = %v, "Invalid HOST, falling back to default");
                defaults.host
            }),
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(v) => v.parse().unwrap_or_else(|_| {
                warn!(value = %v, "Invalid PORT, falling back to default");
                defaults.port
            }),
            None => defaults.port,
        };

        let validation = match lookup("HIVE_VALIDATION") {
            Some(v) => ValidationMode::parse(&v).unwrap_or_else(|| {
                warn!(value = %v, "Unknown HIVE_VALIDATION, expected lenient or strict");
                defaults.validation
            }),
            None => defaults.validation,
        };

        let unique_names = match lookup("HIVE_UNIQUE_NAMES") {
            Some(v) => parse_bool(&v).unwrap_or_else(|| {
                warn!(value = %v, "Invalid HIVE_UNIQUE_NAMES, expected true or false");
                defaults.unique_names
            }),
            None => defaults.unique_names,
        };

        let seed = match lookup("HIVE_SEED") {
            Some(v) => parse_bool(&v).unwrap_or_else(|| {
                warn!(value = %v, "Invalid HIVE_SEED, expected true or false");
                defaults.seed
            }),
            None => defaults.seed,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(v) => LogFormat::parse(&v).unwrap_or_else(|| {
                warn!(value = %v, "Unknown LOG_FORMAT, expected json or pretty");
                defaults.log_format
            }),
            None => defaults.log_format,
        };

        Self {
            host,
            port,
            validation,
            unique_names,
            seed,
            log_format,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if value == "0" || value.eq_ignore_ascii_case("false") || value.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// 常量
pub mod constants {
    /// 默认监听端口
    pub const DEFAULT_PORT: u16 = 8080;

    /// 服务名
    pub const SERVICE_NAME: &str = "cloud-app-hive";

    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tracing_test::traced_test;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvConfig::from_lookup(|_| None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.validation, ValidationMode::Lenient);
        assert!(!config.unique_names);
        assert!(config.seed);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_overrides() {
        let config = EnvConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("HIVE_VALIDATION", "STRICT"),
            ("HIVE_UNIQUE_NAMES", "true"),
            ("HIVE_SEED", "0"),
            ("LOG_FORMAT", "pretty"),
        ]));
        assert_eq!(config.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.validation, ValidationMode::Strict);
        assert!(config.unique_names);
        assert!(!config.seed);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    #[traced_test]
    fn test_invalid_values_fall_back_with_warning() {
        let config = EnvConfig::from_lookup(lookup_from(&[
            ("HOST", "localhost:80"),
            ("PORT", "not-a-port"),
            ("HIVE_VALIDATION", "paranoid"),
            ("HIVE_UNIQUE_NAMES", "sometimes"),
            ("HIVE_SEED", "maybe"),
            ("LOG_FORMAT", "xml"),
        ]));
        assert_eq!(config.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.validation, ValidationMode::Lenient);
        assert!(!config.unique_names);
        assert!(config.seed);
        assert_eq!(config.log_format, LogFormat::Json);

        assert!(logs_contain("Invalid HOST"));
        assert!(logs_contain("Invalid PORT"));
        assert!(logs_contain("Unknown HIVE_VALIDATION"));
        assert!(logs_contain("Invalid HIVE_UNIQUE_NAMES"));
        assert!(logs_contain("Invalid HIVE_SEED"));
        assert!(logs_contain("Unknown LOG_FORMAT"));
    }

    #[test]
    #[traced_test]
    fn test_valid_values_do_not_warn() {
        EnvConfig::from_lookup(lookup_from(&[("PORT", "9000"), ("HIVE_SEED", "false")]));
        assert!(!logs_contain("falling back"));
        assert!(!logs_contain("expected true or false"));
    }

    #[test]
    fn test_log_format_from_lookup() {
        assert_eq!(LogFormat::from_lookup(|_| None), LogFormat::Json);
        assert_eq!(
            LogFormat::from_lookup(lookup_from(&[("LOG_FORMAT", "Pretty")])),
            LogFormat::Pretty
        );
        assert_eq!(
            LogFormat::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")])),
            LogFormat::Json
        );
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("off?"), None);
    }
}
