//! CloudAppHive - 云应用配置注册服务
//!
//! 内存中的应用注册表，通过 JSON-over-HTTP 提供列表和注册接口

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{EnvConfig, LogFormat, ValidationMode};
use crate::state::{get_shutdown_token, trigger_shutdown, AppState};

/// 命令行覆盖项
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    /// 覆盖 PORT
    pub port_override: Option<u16>,
    /// 强制严格校验
    pub strict: bool,
}

impl RuntimeConfig {
    /// 将命令行覆盖项应用到环境配置上
    pub fn apply(&self, mut config: EnvConfig) -> EnvConfig {
        if let Some(port) = self.port_override {
            config.port = port;
        }
        if self.strict {
            config.validation = ValidationMode::Strict;
        }
        config
    }
}

/// 初始化 tracing
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("info,{}=debug", env!("CARGO_CRATE_NAME")).into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// 先按 LOG_FORMAT 初始化日志，再加载完整配置
///
/// 配置解析中的 `warn!` 必须在 subscriber 安装之后发出
pub fn load_config(
    runtime: &RuntimeConfig,
    lookup: impl Fn(&str) -> Option<String>,
    init_logging: impl FnOnce(LogFormat),
) -> EnvConfig {
    init_logging(LogFormat::from_lookup(&lookup));
    runtime.apply(EnvConfig::from_lookup(lookup))
}

/// 初始化日志、加载配置并运行服务，直到收到关闭信号
pub async fn init_and_run_with_config(runtime: RuntimeConfig) -> std::io::Result<()> {
    let config = load_config(&runtime, |key| std::env::var(key).ok(), init_tracing);
    serve(config).await
}

/// 绑定端口并运行 HTTP 服务
pub async fn serve(config: EnvConfig) -> std::io::Result<()> {
    let addr = SocketAddr::new(config.host, config.port);
    let state = Arc::new(AppState::new(config));
    let app = api::router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %addr,
        version = crate::config::env::constants::VERSION,
        "{} listening",
        crate::config::env::constants::SERVICE_NAME
    );

    tokio::spawn(wait_for_signal());

    let shutdown = get_shutdown_token();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// 等待 Ctrl-C / SIGTERM 后触发全局 shutdown
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
    trigger_shutdown();
}
