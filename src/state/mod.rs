//! 运行时状态模块
//!
//! 管理应用状态和应用注册表

pub mod app_state;
pub mod registry;

pub use app_state::{get_shutdown_token, trigger_shutdown, AppState};
pub use registry::ApplicationRegistry;
