use sea_orm::{entity::prelude::*, ActiveModelTrait, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use common::types::{ClientInput, ClientRecord};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub repo_link: Option<String>,
    pub drive_link: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ClientRecord {
    fn from(m: Model) -> Self {
        ClientRecord {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            company: m.company.unwrap_or_default(),
            repo_link: m.repo_link.unwrap_or_default(),
            drive_link: m.drive_link.unwrap_or_default(),
        }
    }
}

fn required(field: &str, value: &str) -> Result<String, errors::ModelError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} required")));
    }
    if v.chars().count() > 255 {
        return Err(errors::ModelError::Validation(format!("{field} too long (<=255)")));
    }
    Ok(v.to_string())
}

pub fn validate_email(email: &str) -> Result<String, errors::ModelError> {
    let e = required("email", email)?;
    match e.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(e),
        _ => Err(errors::ModelError::Validation("invalid email".into())),
    }
}

/// Blank optional text is stored as NULL.
fn optional(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}

pub fn apply_input(am: &mut ActiveModel, input: &ClientInput) -> Result<(), errors::ModelError> {
    if let Some(v) = &input.name { am.name = Set(required("name", v)?); }
    if let Some(v) = &input.email { am.email = Set(validate_email(v)?); }
    if let Some(v) = &input.phone { am.phone = Set(required("phone", v)?); }
    if let Some(v) = &input.company { am.company = Set(optional(v)); }
    if let Some(v) = &input.repo_link { am.repo_link = Set(optional(v)); }
    if let Some(v) = &input.drive_link { am.drive_link = Set(optional(v)); }
    Ok(())
}

/// Insert a new client. `name`, `email` and `phone` are required.
pub async fn create<C: ConnectionTrait>(db: &C, input: &ClientInput) -> Result<Model, errors::ModelError> {
    if input.is_empty() {
        return Err(errors::ModelError::Validation("Invalid client data".into()));
    }
    let now = Utc::now();
    let am = ActiveModel {
        name: Set(required("name", input.name.as_deref().unwrap_or_default())?),
        email: Set(validate_email(input.email.as_deref().unwrap_or_default())?),
        phone: Set(required("phone", input.phone.as_deref().unwrap_or_default())?),
        company: Set(input.company.as_deref().and_then(optional)),
        repo_link: Set(input.repo_link.as_deref().and_then(optional)),
        drive_link: Set(input.drive_link.as_deref().and_then(optional)),
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
    fn email_needs_local_and_domain_parts() {
        assert_eq!(validate_email(" ada@example.com ").unwrap(), "ada@example.com");
        assert!(validate_email("ada").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@").is_err());
    }

    #[test]
    fn blank_optional_fields_become_null() {
        let mut am = ActiveModel { ..Default::default() };
        let input = ClientInput {
            company: Some("  ".into()),
            repo_link: Some("https://git.example.com/ada".into()),
            ..Default::default()
        };
        apply_input(&mut am, &input).unwrap();
        assert_eq!(am.company, Set(None));
        assert_eq!(am.repo_link, Set(Some("https://git.example.com/ada".to_string())));
        assert!(am.name.is_not_set());
    }

    #[test]
    fn model_converts_nulls_to_empty_strings() {
        let now = Utc::now().into();
        let rec = ClientRecord::from(Model {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            company: None,
            repo_link: Some("https://git.example.com/ada".into()),
            drive_link: None,
            created_at: now,
            updated_at: now,
        });
        assert_eq!(rec.company, "");
        assert_eq!(rec.repo_link, "https://git.example.com/ada");
    }
}
