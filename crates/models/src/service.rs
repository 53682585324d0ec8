use sea_orm::{entity::prelude::*, ActiveModelTrait, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use common::types::{ServiceInput, ServiceKind, ServiceRecord, ServiceStatus};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub purchase_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub renewal_price: Decimal,
    pub purchase_date: Date,
    pub renewal_date: Date,
    pub next_renewal: Option<Date>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ServiceRecord {
    fn from(m: Model) -> Self {
        ServiceRecord {
            id: m.id,
            kind: m.kind.parse().unwrap_or_default(),
            status: ServiceStatus::parse_lenient(&m.status),
            name: m.name,
            purchase_price: m.purchase_price,
            renewal_price: m.renewal_price,
            purchase_date: Some(m.purchase_date),
            renewal_date: Some(m.renewal_date),
            next_renewal: m.next_renewal,
        }
    }
}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if trimmed.chars().count() > 255 {
        return Err(errors::ModelError::Validation("name too long (<=255)".into()));
    }
    Ok(trimmed.to_string())
}

pub fn validate_price(field: &str, price: Decimal) -> Result<Decimal, errors::ModelError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(errors::ModelError::Validation(format!("{field} must not be negative")));
    }
    // numeric(12,2)
    if price.round_dp(2) != price || price.trunc() >= Decimal::from(10_000_000_000i64) {
        return Err(errors::ModelError::Validation(format!("{field} must fit 12 digits with 2 decimals")));
    }
    Ok(price)
}

/// Apply the present fields of `input` onto an active model, validating each.
pub fn apply_input(am: &mut ActiveModel, input: &ServiceInput) -> Result<(), errors::ModelError> {
    if let Some(kind) = input.kind { am.kind = Set(kind.as_str().to_string()); }
    if let Some(name) = &input.name { am.name = Set(validate_name(name)?); }
    if let Some(p) = input.purchase_price { am.purchase_price = Set(validate_price("purchasePrice", p)?); }
    if let Some(p) = input.renewal_price { am.renewal_price = Set(validate_price("renewalPrice", p)?); }
    if let Some(d) = input.purchase_date { am.purchase_date = Set(d); }
    if let Some(d) = input.renewal_date { am.renewal_date = Set(d); }
    if let Some(d) = input.next_renewal { am.next_renewal = Set(d); }
    if let Some(s) = input.status { am.status = Set(s.as_str().to_string()); }
    Ok(())
}

/// Insert a new service. `type`, `name` and both prices are required; dates default to
/// today and status to `active`.
pub async fn create<C: ConnectionTrait>(db: &C, input: &ServiceInput) -> Result<Model, errors::ModelError> {
    if input.is_empty() {
        return Err(errors::ModelError::Validation("Invalid service data".into()));
    }
    let kind: ServiceKind = input
        .kind
        .ok_or_else(|| errors::ModelError::Validation("type required".into()))?;
    let name = validate_name(input.name.as_deref().unwrap_or_default())?;
    let purchase_price = validate_price(
        "purchasePrice",
        input.purchase_price.ok_or_else(|| errors::ModelError::Validation("purchasePrice required".into()))?,
    )?;
    let renewal_price = validate_price(
        "renewalPrice",
        input.renewal_price.ok_or_else(|| errors::ModelError::Validation("renewalPrice required".into()))?,
    )?;

    let now = Utc::now();
    let today = now.date_naive();
    let am = ActiveModel {
        kind: Set(kind.as_str().to_string()),
        name: Set(name),
        purchase_price: Set(purchase_price),
        renewal_price: Set(renewal_price),
        purchase_date: Set(input.purchase_date.unwrap_or(today)),
        renewal_date: Set(input.renewal_date.unwrap_or(today)),
        next_renewal: Set(input.next_renewal.flatten()),
        status: Set(input.status.unwrap_or(ServiceStatus::Active).as_str().to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_validation() {
        assert!(validate_price("p", Decimal::new(1999, 2)).is_ok());
        assert!(validate_price("p", Decimal::ZERO).is_ok());
        assert!(validate_price("p", Decimal::new(-1, 0)).is_err());
        assert!(validate_price("p", Decimal::new(1, 3)).is_err());
    }

    #[test]
    fn name_is_trimmed_and_required() {
        assert_eq!(validate_name("  example.com ").unwrap(), "example.com");
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn apply_input_only_touches_present_fields() {
        let mut am = ActiveModel { ..Default::default() };
        let input = ServiceInput {
            name: Some("  renamed ".into()),
            status: Some(ServiceStatus::Inactive),
            ..Default::default()
        };
        apply_input(&mut am, &input).unwrap();
        assert_eq!(am.name, Set("renamed".to_string()));
        assert_eq!(am.status, Set("inactive".to_string()));
        assert!(am.kind.is_not_set());
        assert!(am.purchase_price.is_not_set());
    }

    #[test]
    fn null_next_renewal_clears_the_override() {
        let stored = Date::from_ymd_opt(2025, 7, 1).unwrap();
        let mut am = ActiveModel { next_renewal: sea_orm::ActiveValue::Unchanged(Some(stored)), ..Default::default() };
        apply_input(&mut am, &ServiceInput { next_renewal: Some(None), ..Default::default() }).unwrap();
        assert_eq!(am.next_renewal, Set(None));

        let mut am = ActiveModel { next_renewal: sea_orm::ActiveValue::Unchanged(Some(stored)), ..Default::default() };
        apply_input(&mut am, &ServiceInput { name: Some("kept".into()), ..Default::default() }).unwrap();
        assert_eq!(am.next_renewal, sea_orm::ActiveValue::Unchanged(Some(stored)));
    }

    #[test]
    fn model_converts_to_record() {
        let d = Date::from_ymd_opt(2025, 5, 1).unwrap();
        let now = Utc::now().into();
        let m = Model {
            id: 4,
            kind: "domain".into(),
            name: "example.org".into(),
            purchase_price: Decimal::new(1200, 2),
            renewal_price: Decimal::new(1500, 2),
            purchase_date: d,
            renewal_date: d,
            next_renewal: None,
            status: "active".into(),
            created_at: now,
            updated_at: now,
        };
        let rec = ServiceRecord::from(m);
        assert_eq!(rec.kind, ServiceKind::Domain);
        assert!(rec.is_active());
        assert_eq!(rec.effective_renewal(), Some(d));
    }
}
