use sea_orm::DatabaseConnection;

use super::SqliteOptions;
use crate::errors::{Result, SnaplinkError};
use migration::{Migrator, MigratorTrait};

/// 连接 SQLite 数据库文件（不存在时自动创建）
pub async fn connect_sqlite(path: &str, options: &SqliteOptions) -> Result<DatabaseConnection> {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
    };

    let opt = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(options.busy_timeout)
        .pragma("temp_store", "memory");

    let pool = SqlitePoolOptions::new()
        .max_connections(options.max_connections)
        .connect_with(opt)
        .await
        .map_err(|e| {
            SnaplinkError::storage_unavailable(format!("无法打开 SQLite 数据库 '{}': {}", path, e))
        })?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 运行数据库迁移（创建 urls 表）
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .map_err(|e| SnaplinkError::storage_unavailable(format!("迁移失败: {}", e)))
}
