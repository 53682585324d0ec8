//! Uniqueness constraints backing the API's conflict errors.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_service::Service;
use crate::m20240101_000002_create_client::Client;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One record per (type, name): the same domain cannot be tracked twice.
        manager
            .create_index(
                Index::create()
                    .name("idx_service_type_name_unique")
                    .table(Service::Table)
                    .col(Service::Type)
                    .col(Service::Name)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_client_email_unique")
                    .table(Client::Table)
                    .col(Client::Email)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_renewal_date")
                    .table(Service::Table)
                    .col(Service::RenewalDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_renewal_date").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_client_email_unique").table(Client::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_type_name_unique").table(Service::Table).to_owned())
            .await
    }
}
