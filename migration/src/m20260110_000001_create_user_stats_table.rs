use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserStats::Table)
                    .if_not_exists()
                    .col(string(UserStats::UserId).primary_key())
                    .col(big_integer(UserStats::Messages).default(0))
                    .col(big_integer(UserStats::Points).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserStats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserStats {
    Table,
    UserId,
    Messages,
    Points,
}
