//! Write operations for SqliteStore
//!
//! `create` inserts a fresh row; `resolve` is the transactional
//! increment-and-read behind `Store::get`.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ExprTrait, QueryFilter, TransactionTrait,
};

use super::SqliteStore;
use super::converters::{model_to_record, record_to_active_model};
use super::retry;
use crate::errors::{Result, SnaplinkError};
use crate::storage::UrlRecord;
use crate::utils::url_validator::validate_url;

use migration::entities::url;

/// ID 冲突时的最大尝试次数（首次 + 1 次重试）
const MAX_ID_ATTEMPTS: usize = 2;

/// 插入新行；主键冲突以 `DbErr` 原样返回，绝不覆盖已有记录
async fn insert(db: &DatabaseConnection, record: &UrlRecord) -> std::result::Result<(), DbErr> {
    url::Entity::insert(record_to_active_model(record))
        .exec(db)
        .await
        .map(|_| ())
}

/// 在单个事务内将 hits 加 1 并读回加 1 之后的行
///
/// 先 UPDATE 再 SELECT：第一条语句即取得写锁，避免两个读事务同时升级为写事务。
/// 未命中时回滚并返回 `None`；任一步失败时事务在 drop 时回滚，计数不变。
async fn increment_hits(
    db: &DatabaseConnection,
    id: &str,
) -> std::result::Result<Option<url::Model>, DbErr> {
    let txn = db.begin().await?;

    let updated = url::Entity::update_many()
        .col_expr(url::Column::Hits, Expr::col(url::Column::Hits).add(Expr::val(1)))
        .filter(url::Column::Id.eq(id))
        .exec(&txn)
        .await?;

    if updated.rows_affected == 0 {
        txn.rollback().await?;
        return Ok(None);
    }

    let model = url::Entity::find_by_id(id).one(&txn).await?;
    txn.commit().await?;
    Ok(model)
}

impl SqliteStore {
    /// 使用给定的 ID 生成器创建记录（测试中用于模拟冲突与熵源故障）
    pub(crate) async fn create_with<F>(&self, original: &str, mut next_id: F) -> Result<UrlRecord>
    where
        F: FnMut() -> Result<String> + Send,
    {
        validate_url(original)?;
        let db = self.connection()?;

        for _ in 0..MAX_ID_ATTEMPTS {
            let record = UrlRecord::new(next_id()?, original.to_string());

            let result =
                retry::with_retry(self.retry_config, || async { insert(&db, &record).await })
                    .await;

            match result {
                Ok(()) => return Ok(record),
                Err(e) if retry::classify(&e) == retry::ErrorClass::UniqueViolation => continue,
                Err(e) => {
                    return Err(SnaplinkError::storage_unavailable(format!(
                        "插入短链接 '{}' 失败: {}",
                        record.id, e
                    )));
                }
            }
        }

        Err(SnaplinkError::generation(format!(
            "could not allocate a unique id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    pub(crate) async fn resolve(&self, id: &str) -> Result<UrlRecord> {
        let db = self.connection()?;

        let model =
            retry::with_retry(self.retry_config, || async { increment_hits(&db, id).await })
                .await
                .map_err(|e| {
                    SnaplinkError::storage_unavailable(format!("更新点击数失败: {}", e))
                })?;

        model
            .map(model_to_record)
            .ok_or_else(|| SnaplinkError::not_found(format!("url not found: {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Store;
    use tempfile::TempDir;

    async fn open_temp() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mutations.db");
        let store = SqliteStore::open(path.to_str().unwrap()).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_collision_retries_with_fresh_id() {
        let (store, _dir) = open_temp().await;
        store
            .create_with("https://example.com/a", || Ok("dup000".to_string()))
            .await
            .unwrap();

        let mut ids = vec!["fresh1".to_string(), "dup000".to_string()];
        let record = store
            .create_with("https://example.com/b", move || Ok(ids.pop().unwrap()))
            .await
            .unwrap();
        assert_eq!(record.id, "fresh1");
        assert_eq!(store.get_total_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_collision_twice_never_overwrites() {
        let (store, _dir) = open_temp().await;
        store
            .create_with("https://example.com/a", || Ok("dup000".to_string()))
            .await
            .unwrap();

        let err = store
            .create_with("https://example.com/b", || Ok("dup000".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, SnaplinkError::Generation(_)));

        let record = store.get("dup000").await.unwrap();
        assert_eq!(record.original, "https://example.com/a");
        assert_eq!(record.hits, 1);
    }

    #[tokio::test]
    async fn test_entropy_failure_is_generation_error() {
        let (store, _dir) = open_temp().await;
        let err = store
            .create_with("https://example.com", || {
                Err(SnaplinkError::generation("entropy source unavailable"))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SnaplinkError::Generation(_)));
        assert_eq!(store.get_total_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_not_found_leaves_table_untouched() {
        let (store, _dir) = open_temp().await;
        store.create("https://example.com").await.unwrap();

        let err = store.resolve("zzzzzz").await.unwrap_err();
        assert!(matches!(err, SnaplinkError::NotFound(_)));
        assert_eq!(store.get_total_hits().await.unwrap(), 0);
    }
}
