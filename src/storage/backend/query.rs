//! Query operations for SqliteStore
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QuerySelect};

use super::converters::model_to_record;
use super::{SqliteStore, retry};
use crate::errors::{Result, SnaplinkError};
use crate::storage::UrlRecord;

use migration::entities::url;

/// SUM(hits) 的查询结果；空表时 SUM 为 NULL
#[derive(Debug, FromQueryResult)]
struct HitsResult {
    total_hits: Option<i64>,
}

impl SqliteStore {
    pub(crate) async fn load_all(&self) -> Result<Vec<UrlRecord>> {
        let db = self.connection()?;

        let models = retry::with_retry(self.retry_config, || async {
            url::Entity::find().all(&*db).await
        })
        .await
        .map_err(|e| SnaplinkError::storage_unavailable(format!("加载所有短链接失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_record).collect())
    }

    pub(crate) async fn count(&self) -> Result<u64> {
        let db = self.connection()?;

        retry::with_retry(self.retry_config, || async {
            url::Entity::find().count(&*db).await
        })
        .await
        .map_err(|e| SnaplinkError::storage_unavailable(format!("统计链接数失败: {}", e)))
    }

    pub(crate) async fn total_hits(&self) -> Result<u64> {
        let db = self.connection()?;

        let result = retry::with_retry(self.retry_config, || async {
            url::Entity::find()
                .select_only()
                .column_as(url::Column::Hits.sum(), "total_hits")
                .into_model::<HitsResult>()
                .one(&*db)
                .await
        })
        .await
        .map_err(|e| SnaplinkError::storage_unavailable(format!("统计点击数失败: {}", e)))?;

        Ok(result
            .and_then(|r| r.total_hits)
            .unwrap_or(0)
            .max(0) as u64)
    }
}
