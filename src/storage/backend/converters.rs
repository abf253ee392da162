use crate::storage::UrlRecord;
use migration::entities::url;

/// 将 Sea-ORM Model 转换为 UrlRecord
pub fn model_to_record(model: url::Model) -> UrlRecord {
    UrlRecord {
        id: model.id,
        original: model.original,
        created_at: model.created_at,
        hits: model.hits.max(0) as u64,
    }
}

/// 将新记录转换为 ActiveModel（仅用于插入）
pub fn record_to_active_model(record: &UrlRecord) -> url::ActiveModel {
    use sea_orm::ActiveValue::Set;

    url::ActiveModel {
        id: Set(record.id.clone()),
        original: Set(record.original.clone()),
        created_at: Set(record.created_at),
        hits: Set(record.hits as i64),
    }
}
