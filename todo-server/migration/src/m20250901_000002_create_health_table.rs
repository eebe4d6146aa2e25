use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Health::Table)
                    .if_not_exists()
                    .col(pk_auto(Health::Id))
                    .col(string(Health::Status))
                    .col(timestamp_with_time_zone(Health::Timestamp))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Health::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Health {
    Table,
    Id,
    Status,
    Timestamp,
}
