//! Server-side overview over the full service and client tables.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use common::overview::Overview;
use common::types::{ClientRecord, ServiceRecord};

use crate::db::{clients_service, services_service};
use crate::errors::ServiceError;
use crate::listing::EmptyListPolicy;

pub async fn load_overview(db: &DatabaseConnection, today: NaiveDate) -> Result<Overview, ServiceError> {
    let services: Vec<ServiceRecord> = services_service::list_services(db, EmptyListPolicy::ReturnEmpty)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let clients: Vec<ClientRecord> = clients_service::list_clients(db, EmptyListPolicy::ReturnEmpty)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Overview::compute(&services, &clients, today))
}
