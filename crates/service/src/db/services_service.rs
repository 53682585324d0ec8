use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};
use tracing::info;

use common::types::ServiceInput;
use models::service;

use crate::{errors::ServiceError, listing::EmptyListPolicy};

/// List all services in insertion order.
pub async fn list_services(db: &DatabaseConnection, policy: EmptyListPolicy) -> Result<Vec<service::Model>, ServiceError> {
    let rows = service::Entity::find()
        .order_by_asc(service::Column::Id)
        .all(db)
        .await?;
    info!(count = rows.len(), "services listed");
    policy.apply("services", rows)
}

/// Create a service.
pub async fn create_service(db: &DatabaseConnection, input: &ServiceInput) -> Result<service::Model, ServiceError> {
    let created = service::create(db, input).await?;
    info!(id = created.id, event = "service.created", "service created");
    Ok(created)
}

/// Get service by id.
pub async fn get_service(db: &DatabaseConnection, id: i32) -> Result<Option<service::Model>, ServiceError> {
    Ok(service::Entity::find_by_id(id).one(db).await?)
}

/// Apply the present fields of `input` to an existing service.
pub async fn update_service(db: &DatabaseConnection, id: i32, input: &ServiceInput) -> Result<service::Model, ServiceError> {
    let mut am: service::ActiveModel = service::Entity::find_by_id(id)
        .one(db).await?
        .ok_or_else(|| ServiceError::not_found("service"))?
        .into();
    service::apply_input(&mut am, input)?;
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(id, event = "service.updated", "service updated");
    Ok(updated)
}

/// Delete a service and hand back the removed row.
pub async fn delete_service(db: &DatabaseConnection, id: i32) -> Result<service::Model, ServiceError> {
    let existing = service::Entity::find_by_id(id)
        .one(db).await?
        .ok_or_else(|| ServiceError::not_found("service"))?;
    existing.clone().delete(db).await?;
    info!(id, event = "service.deleted", "service deleted");
    Ok(existing)
}
