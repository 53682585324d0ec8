use chrono::{NaiveDate, Utc};
use common::types::{ClientInput, ServiceInput, ServiceKind, ServiceStatus};
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, MockDatabase};

use crate::{client, errors::ModelError, service};

fn service_row(id: i32, name: &str) -> service::Model {
    let now = Utc::now().into();
    let d = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    service::Model {
        id,
        kind: "hosting".into(),
        name: name.into(),
        purchase_price: Decimal::new(10000, 2),
        renewal_price: Decimal::new(9000, 2),
        purchase_date: d,
        renewal_date: d,
        next_renewal: None,
        status: "active".into(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn create_service_inserts_with_defaults() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![service_row(1, "vps-1")]])
        .into_connection();

    let input = ServiceInput {
        kind: Some(ServiceKind::Hosting),
        name: Some("vps-1".into()),
        purchase_price: Some(Decimal::new(10000, 2)),
        renewal_price: Some(Decimal::new(9000, 2)),
        ..Default::default()
    };
    let created = service::create(&db, &input).await.unwrap();
    assert_eq!(created.id, 1);

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("INSERT INTO"));
    assert!(sql.contains("active"));
}

#[tokio::test]
async fn create_service_rejects_missing_fields_without_touching_db() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = service::create(&db, &ServiceInput::default()).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));

    let input = ServiceInput {
        kind: Some(ServiceKind::Domain),
        name: Some("example.com".into()),
        purchase_price: Some(Decimal::new(1200, 2)),
        status: Some(ServiceStatus::Active),
        ..Default::default()
    };
    let err = service::create(&db, &input).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(ref m) if m.contains("renewalPrice")));
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn create_client_requires_valid_email() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let input = ClientInput {
        name: Some("Ada".into()),
        email: Some("not-an-email".into()),
        phone: Some("555-0100".into()),
        ..Default::default()
    };
    let err = client::create(&db, &input).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
}

#[tokio::test]
async fn create_client_inserts_row() {
    let now = Utc::now().into();
    let row = client::Model {
        id: 9,
        name: "Ada".into(),
        email: "ada@example.com".into(),
        phone: "555-0100".into(),
        company: None,
        repo_link: None,
        drive_link: None,
        created_at: now,
        updated_at: now,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .into_connection();
    let input = ClientInput {
        name: Some("Ada".into()),
        email: Some("ada@example.com".into()),
        phone: Some("555-0100".into()),
        company: Some("".into()),
        ..Default::default()
    };
    let created = client::create(&db, &input).await.unwrap();
    assert_eq!(created, row);
}
