//! 应用注册表
//!
//! 进程内的有序应用列表，只支持追加，进程退出即丢弃

use tokio::sync::RwLock;

use crate::domain::ApplicationConfig;

/// 应用注册表
///
/// 读快照与追加都在同一把读写锁下完成，保证并发追加不丢失
pub struct ApplicationRegistry {
    applications: RwLock<Vec<ApplicationConfig>>,
}

impl ApplicationRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    /// 使用初始数据创建
    pub fn with_entries(entries: Vec<ApplicationConfig>) -> Self {
        Self {
            applications: RwLock::new(entries),
        }
    }

    /// 按插入顺序返回所有应用的快照
    pub async fn list(&self) -> Vec<ApplicationConfig> {
        let applications = self.applications.read().await;
        applications.clone()
    }

    /// 追加到末尾，返回存储的条目
    pub async fn append(&self, entry: ApplicationConfig) -> ApplicationConfig {
        let mut applications = self.applications.write().await;
        applications.push(entry.clone());
        entry
    }

    /// 名称未被占用时追加，否则原样返回 `Err(entry)`
    ///
    /// 检查与追加在同一次写锁内完成
    pub async fn append_unique(
        &self,
        entry: ApplicationConfig,
    ) -> Result<ApplicationConfig, ApplicationConfig> {
        let mut applications = self.applications.write().await;
        if applications.iter().any(|app| app.name == entry.name) {
            return Err(entry);
        }
        applications.push(entry.clone());
        Ok(entry)
    }

    /// 当前应用数量
    pub async fn len(&self) -> usize {
        let applications = self.applications.read().await;
        applications.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ApplicationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
