#![cfg(test)]
use chrono::{NaiveDate, Utc};
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use configs::DatabaseConfig;
use models::{client, db::connect_with_config, service};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_db_config() -> Option<DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(DatabaseConfig { url, min_connections: 1, acquire_timeout_secs: 10, ..Default::default() })
}

/// A migrated Postgres connection, or `None` when no database is configured for tests.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    let Some(cfg) = test_db_config() else { return Ok(None) };

    let migrated = *MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&cfg).await {
                Ok(db) => migration::Migrator::up(&db, None).await.is_ok(),
                Err(_) => false,
            }
        })
        .await;
    if !migrated {
        anyhow::bail!("test database unavailable or migration failed");
    }

    Ok(Some(connect_with_config(&cfg).await?))
}

pub fn service_row(id: i32, name: &str) -> service::Model {
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

pub fn client_row(id: i32, email: &str) -> client::Model {
    let now = Utc::now().into();
    client::Model {
        id,
        name: format!("client-{id}"),
        email: email.into(),
        phone: "555-0100".into(),
        company: None,
        repo_link: None,
        drive_link: None,
        created_at: now,
        updated_at: now,
    }
}
