use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};
use tracing::info;

use common::types::ClientInput;
use models::client;

use crate::{errors::ServiceError, listing::EmptyListPolicy};

/// List all clients in insertion order.
pub async fn list_clients(db: &DatabaseConnection, policy: EmptyListPolicy) -> Result<Vec<client::Model>, ServiceError> {
    let rows = client::Entity::find()
        .order_by_asc(client::Column::Id)
        .all(db)
        .await?;
    info!(count = rows.len(), "clients listed");
    policy.apply("clients", rows)
}

pub async fn create_client(db: &DatabaseConnection, input: &ClientInput) -> Result<client::Model, ServiceError> {
    let created = client::create(db, input).await?;
    info!(id = created.id, event = "client.created", "client created");
    Ok(created)
}

pub async fn get_client(db: &DatabaseConnection, id: i32) -> Result<Option<client::Model>, ServiceError> {
    Ok(client::Entity::find_by_id(id).one(db).await?)
}

pub async fn update_client(db: &DatabaseConnection, id: i32, input: &ClientInput) -> Result<client::Model, ServiceError> {
    let mut am: client::ActiveModel = client::Entity::find_by_id(id)
        .one(db).await?
        .ok_or_else(|| ServiceError::not_found("client"))?
        .into();
    client::apply_input(&mut am, input)?;
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(id, event = "client.updated", "client updated");
    Ok(updated)
}

/// Delete a client and hand back the removed row.
pub async fn delete_client(db: &DatabaseConnection, id: i32) -> Result<client::Model, ServiceError> {
    let existing = client::Entity::find_by_id(id)
        .one(db).await?
        .ok_or_else(|| ServiceError::not_found("client"))?;
    existing.clone().delete(db).await?;
    info!(id, event = "client.deleted", "client deleted");
    Ok(existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_row, get_db};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    #[tokio::test]
    async fn empty_table_lists_as_not_found_when_configured() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<client::Model>::new()])
            .into_connection();
        let err = list_clients(&db, EmptyListPolicy::NotFound).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(m) if m == "No clients found"));
    }

    #[tokio::test]
    async fn create_rejects_empty_payload() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = create_client(&db, &ClientInput::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_changes_email() -> Result<(), anyhow::Error> {
        let before = client_row(2, "ada@example.com");
        let after = client_row(2, "ada@new.example.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![before]])
            .append_query_results([vec![after]])
            .into_connection();
        let input = ClientInput { email: Some("ada@new.example.com".into()), ..Default::default() };
        let updated = update_client(&db, 2, &input).await?;
        assert_eq!(updated.email, "ada@new.example.com");
        Ok(())
    }

    #[tokio::test]
    async fn delete_returns_removed_row() -> Result<(), anyhow::Error> {
        let row = client_row(4, "bob@example.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .into_connection();
        assert_eq!(delete_client(&db, 4).await?, row);
        Ok(())
    }

    #[tokio::test]
    async fn client_crud_against_postgres() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        let input = ClientInput {
            name: Some("Ada".into()),
            email: Some(format!("ada_{}@example.com", Uuid::new_v4())),
            phone: Some("555-0100".into()),
            company: Some("Analytical Engines".into()),
            ..Default::default()
        };
        let created = create_client(&db, &input).await?;
        assert!(matches!(create_client(&db, &input).await, Err(ServiceError::Conflict(_))));

        let patch = ClientInput { company: Some("".into()), ..Default::default() };
        let updated = update_client(&db, created.id, &patch).await?;
        assert!(updated.company.is_none());

        delete_client(&db, created.id).await?;
        assert!(matches!(delete_client(&db, created.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
