//! Create `service` table.
//!
//! Hosting and domain subscriptions with purchase/renewal pricing and dates.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(pk_auto(Service::Id))
                    .col(string_len(Service::Type, 16).not_null())
                    .col(string_len(Service::Name, 255).not_null())
                    .col(decimal_len(Service::PurchasePrice, 12, 2).not_null())
                    .col(decimal_len(Service::RenewalPrice, 12, 2).not_null())
                    .col(date(Service::PurchaseDate).not_null())
                    .col(date(Service::RenewalDate).not_null())
                    .col(date_null(Service::NextRenewal))
                    .col(string_len(Service::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Service {
    Table,
    Id,
    Type,
    Name,
    PurchasePrice,
    RenewalPrice,
    PurchaseDate,
    RenewalDate,
    NextRenewal,
    Status,
    CreatedAt,
    UpdatedAt,
}
