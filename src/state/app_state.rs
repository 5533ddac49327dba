//! 应用状态

use tokio_util::sync::CancellationToken;

use crate::config::{EnvConfig, ValidationMode};
use crate::domain::seed_applications;

use super::registry::ApplicationRegistry;

/// 全局 shutdown token，用于优雅关闭 HTTP 服务
static GLOBAL_SHUTDOWN: std::sync::OnceLock<CancellationToken> = std::sync::OnceLock::new();

/// 获取全局 shutdown token
pub fn get_shutdown_token() -> CancellationToken {
    GLOBAL_SHUTDOWN
        .get_or_init(CancellationToken::new)
        .clone()
}

/// 触发全局 shutdown
pub fn trigger_shutdown() {
    if let Some(token) = GLOBAL_SHUTDOWN.get() {
        token.cancel();
    }
}

/// 应用状态
///
/// 通过 `State<Arc<AppState>>` 注入到 handlers
pub struct AppState {
    /// 环境配置
    pub config: EnvConfig,
    /// 应用注册表
    pub registry: ApplicationRegistry,
}

impl AppState {
    /// 根据配置创建应用状态
    pub fn new(config: EnvConfig) -> Self {
        let registry = if config.seed {
            let seeds = seed_applications();
            for app in &seeds {
                tracing::info!(
                    name = %app.name,
                    platform = %app.platform,
                    source = %app.source.source_kind(),
                    "Seeded application"
                );
            }
            ApplicationRegistry::with_entries(seeds)
        } else {
            ApplicationRegistry::new()
        };

        tracing::info!(
            port = config.port,
            validation = config.validation.as_str(),
            unique_names = config.unique_names,
            seed = config.seed,
            "Loaded configuration"
        );

        Self { config, registry }
    }

    /// 是否在入库前执行校验
    pub fn validates_on_create(&self) -> bool {
        self.config.validation == ValidationMode::Strict
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EnvConfig::default())
    }
}
