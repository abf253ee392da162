use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 列类型与外部工具直接读取的表结构保持一致：
        // (id TEXT PRIMARY KEY, original TEXT NOT NULL, created_at TIMESTAMP NOT NULL, hits INTEGER NOT NULL DEFAULT 0)
        manager
            .create_table(
                Table::create()
                    .table(Url::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Url::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Url::Original).text().not_null())
                    .col(
                        ColumnDef::new(Url::CreatedAt)
                            .custom(Alias::new("TIMESTAMP"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Url::Hits)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Url::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Url {
    #[sea_orm(iden = "urls")]
    Table,
    Id,
    Original,
    CreatedAt,
    Hits,
}
