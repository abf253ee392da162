//! SQLite storage backend
//!
//! This module provides durable storage on a single SQLite file using SeaORM.
//! The `urls` table is created by the `migration` crate on open.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use sea_orm::DatabaseConnection;

use crate::config::StoreConfig;
use crate::errors::{Result, SnaplinkError};

pub use connection::{connect_sqlite, run_migrations};
pub use converters::{model_to_record, record_to_active_model};

/// SQLite 连接与重试参数
#[derive(Clone, Copy, Debug)]
pub struct SqliteOptions {
    pub max_connections: u32,
    pub busy_timeout: Duration,
    pub retry: retry::RetryConfig,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
            retry: retry::RetryConfig::default(),
        }
    }
}

impl SqliteOptions {
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            max_connections: config.pool_size.max(1),
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            retry: retry::RetryConfig {
                max_retries: config.retry_count,
                base_delay_ms: config.retry_base_delay_ms,
                max_delay_ms: config.retry_max_delay_ms,
            },
        }
    }
}

/// 基于 SQLite 文件的持久化存储
///
/// 连接保存在 `ArcSwapOption` 中：`close` 之后取出为 `None`，
/// 之后的任何操作（包括再次 `close`）都返回 `StorageUnavailable`。
pub struct SqliteStore {
    db: ArcSwapOption<DatabaseConnection>,
    retry_config: retry::RetryConfig,
}

impl SqliteStore {
    /// 打开（不存在则创建）数据库文件并确保表结构存在
    pub async fn open(path: &str) -> Result<Self> {
        Self::open_with(path, SqliteOptions::default()).await
    }

    pub async fn open_with(path: &str, options: SqliteOptions) -> Result<Self> {
        if path.is_empty() {
            return Err(SnaplinkError::storage_unavailable(
                "SQLite database path is empty",
            ));
        }

        let db = connect_sqlite(path, &options).await?;
        if let Err(e) = run_migrations(&db).await {
            let _ = db.close().await;
            return Err(e);
        }

        Ok(Self {
            db: ArcSwapOption::from_pointee(db),
            retry_config: options.retry,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.db.load().is_none()
    }

    /// 获取当前连接；已关闭时返回 `StorageUnavailable`
    fn connection(&self) -> Result<Arc<DatabaseConnection>> {
        self.db
            .load_full()
            .ok_or_else(|| SnaplinkError::storage_unavailable("store is closed"))
    }

    pub async fn close(&self) -> Result<()> {
        let db = self
            .db
            .swap(None)
            .ok_or_else(|| SnaplinkError::storage_unavailable("store is closed"))?;

        // 仍在执行中的操作持有同一个连接池的克隆，关闭后它们会以 StorageUnavailable 失败
        Arc::unwrap_or_clone(db).close().await.map_err(|e| {
            SnaplinkError::storage_unavailable(format!("关闭数据库连接失败: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl super::Store for SqliteStore {
    async fn create(&self, original: &str) -> Result<super::UrlRecord> {
        self.create_with(original, crate::utils::generate_id).await
    }

    async fn get(&self, id: &str) -> Result<super::UrlRecord> {
        self.resolve(id).await
    }

    async fn get_stats(&self) -> Result<Vec<super::UrlRecord>> {
        self.load_all().await
    }

    async fn get_total_count(&self) -> Result<u64> {
        self.count().await
    }

    async fn get_total_hits(&self) -> Result<u64> {
        self.total_hits().await
    }

    async fn close(&self) -> Result<()> {
        SqliteStore::close(self).await
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
