//! 进程内存储
//!
//! 整张表由一把 `RwLock` 保护：写操作（create / get）持独占锁，
//! 统计类只读操作持共享锁。锁从不跨越 `.await`。

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Store, UrlRecord};
use crate::errors::{Result, SnaplinkError};
use crate::utils::generate_id;
use crate::utils::url_validator::validate_url;

/// ID 冲突时的最大尝试次数（首次 + 1 次重试）
const MAX_ID_ATTEMPTS: usize = 2;

#[derive(Default)]
pub struct MemoryStore {
    urls: RwLock<HashMap<String, UrlRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用给定的 ID 生成器创建记录（测试中用于模拟冲突与熵源故障）
    pub(crate) fn create_with<F>(&self, original: &str, mut next_id: F) -> Result<UrlRecord>
    where
        F: FnMut() -> Result<String>,
    {
        validate_url(original)?;

        for _ in 0..MAX_ID_ATTEMPTS {
            let record = UrlRecord::new(next_id()?, original.to_string());

            let mut urls = self.urls.write();
            if let Entry::Vacant(slot) = urls.entry(record.id.clone()) {
                slot.insert(record.clone());
                return Ok(record);
            }
        }

        Err(SnaplinkError::generation(format!(
            "could not allocate a unique id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create(&self, original: &str) -> Result<UrlRecord> {
        self.create_with(original, generate_id)
    }

    async fn get(&self, id: &str) -> Result<UrlRecord> {
        // 查找与自增必须在同一次加锁内完成，否则并发解析会丢失计数
        let mut urls = self.urls.write();
        match urls.get_mut(id) {
            Some(record) => {
                record.hits += 1;
                Ok(record.clone())
            }
            None => Err(SnaplinkError::not_found(format!("url not found: {}", id))),
        }
    }

    async fn get_stats(&self) -> Result<Vec<UrlRecord>> {
        Ok(self.urls.read().values().cloned().collect())
    }

    async fn get_total_count(&self) -> Result<u64> {
        Ok(self.urls.read().len() as u64)
    }

    async fn get_total_hits(&self) -> Result<u64> {
        Ok(self.urls.read().values().map(|r| r.hits).sum())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
