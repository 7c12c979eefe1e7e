//! Create models table and seed the default catalogue

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (name, credits per 100 tokens)
const DEFAULT_MODELS: [(&str, i64); 3] = [("gpt-3.5-turbo", 1), ("gpt-4", 2), ("gpt-4o", 3)];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Models::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Models::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Models::Name).string().not_null())
                    .col(
                        ColumnDef::new(Models::TokenRate)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Models::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_models_name")
                    .table(Models::Table)
                    .col(Models::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert()
            .into_table(Models::Table)
            .columns([Models::Name, Models::TokenRate, Models::CreatedAt])
            .to_owned();
        for (name, rate) in DEFAULT_MODELS {
            insert.values_panic([
                name.into(),
                rate.into(),
                chrono::Utc::now().to_rfc3339().into(),
            ]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Models::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Models {
    Table,
    Id,
    Name,
    TokenRate,
    CreatedAt,
}
