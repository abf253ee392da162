//! 短链接存储
//!
//! [`Store`] 是 HTTP 层唯一依赖的存储能力接口，有两个实现：
//! - [`MemoryStore`]：进程内 HashMap + 读写锁
//! - [`SqliteStore`]：SQLite 文件，通过事务保证“读取 + 计数”原子性
//!
//! 具体后端只在启动时由 [`StoreFactory`] 选择一次，之后以 `Arc<dyn Store>` 注入。
//! 存储层不打日志，所有失败都以 [`SnaplinkError`](crate::errors::SnaplinkError) 返回。

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::SqliteStore;
pub use memory::MemoryStore;
pub use models::{StoreBackend, UrlRecord};

#[async_trait]
pub trait Store: Send + Sync {
    /// 校验并创建一条新记录，`hits` 从 0 开始
    async fn create(&self, original: &str) -> Result<UrlRecord>;

    /// 解析 ID 并原子地将其点击数加 1，返回加 1 之后的记录
    async fn get(&self, id: &str) -> Result<UrlRecord>;

    /// 所有记录的快照，顺序不保证
    async fn get_stats(&self) -> Result<Vec<UrlRecord>>;

    async fn get_total_count(&self) -> Result<u64>;

    async fn get_total_hits(&self) -> Result<u64>;

    /// 释放底层资源
    async fn close(&self) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

pub struct StoreFactory;

impl StoreFactory {
    pub async fn create(config: &StoreConfig) -> Result<Arc<dyn Store>> {
        let store: Arc<dyn Store> = match config.backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::Sqlite => {
                let options = backend::SqliteOptions::from_config(config);
                Arc::new(SqliteStore::open_with(&config.database_path, options).await?)
            }
        };
        Ok(store)
    }
}
