//! Create `client` table.
//!
//! Contact records; company and the two links are optional.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Client::Table)
                    .if_not_exists()
                    .col(pk_auto(Client::Id))
                    .col(string_len(Client::Name, 255).not_null())
                    .col(string_len(Client::Email, 255).not_null())
                    .col(string_len(Client::Phone, 64).not_null())
                    .col(string_len_null(Client::Company, 255))
                    .col(string_len_null(Client::RepoLink, 512))
                    .col(string_len_null(Client::DriveLink, 512))
                    .col(timestamp_with_time_zone(Client::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Client::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Client::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Client {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Company,
    RepoLink,
    DriveLink,
    CreatedAt,
    UpdatedAt,
}
