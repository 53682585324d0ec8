use crate::db::connect;
use crate::{client, service};
use anyhow::Result;
use common::types::{ClientInput, ServiceInput, ServiceKind};
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::errors::ModelError;

async fn setup_test_db() -> Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}

#[tokio::test]
async fn test_service_crud() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let name = format!("svc_{}", Uuid::new_v4());
    let input = ServiceInput {
        kind: Some(ServiceKind::Domain),
        name: Some(name.clone()),
        purchase_price: Some(Decimal::new(1250, 2)),
        renewal_price: Some(Decimal::new(1500, 2)),
        ..Default::default()
    };
    let created = service::create(&db, &input).await?;
    assert_eq!(created.name, name);
    assert_eq!(created.status, "active");
    assert_eq!(created.purchase_price, Decimal::new(1250, 2));

    // (type, name) is unique
    let dup = service::create(&db, &input).await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));

    service::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(service::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_client_email_unique() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let input = ClientInput {
        name: Some("Ada".into()),
        email: Some(format!("ada_{}@example.com", Uuid::new_v4())),
        phone: Some("555-0100".into()),
        ..Default::default()
    };
    let created = client::create(&db, &input).await?;
    assert!(created.company.is_none());

    let dup = client::create(&db, &input).await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));

    client::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}
