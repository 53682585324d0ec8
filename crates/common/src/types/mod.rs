//! Wire types shared by the HTTP server and the data gateway.
//!
//! Field names are camelCase on the wire; the service kind travels under `type`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{dates, CoreError};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// What kind of subscription a service record is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    #[default]
    Hosting,
    Domain,
}

impl ServiceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::Hosting => "hosting",
            ServiceKind::Domain => "domain",
        }
    }
}

impl FromStr for ServiceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hosting" => Ok(ServiceKind::Hosting),
            "domain" => Ok(ServiceKind::Domain),
            _ => Err(CoreError::InvalidKind(s.to_string())),
        }
    }
}

/// Lifecycle state. `running` is accepted as an alias of `active` and never emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ServiceStatus {
    Active,
    #[default]
    Inactive,
}

impl ServiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceStatus::Active => "active",
            ServiceStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(self) -> bool {
        self == ServiceStatus::Active
    }

    /// Anything that is not recognisably active counts as inactive.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(ServiceStatus::Inactive)
    }
}

impl FromStr for ServiceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" | "running" => Ok(ServiceStatus::Active),
            "inactive" => Ok(ServiceStatus::Inactive),
            _ => Err(CoreError::InvalidStatus(s.to_string())),
        }
    }
}

macro_rules! str_enum_serde {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(d)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum_serde!(ServiceKind);
str_enum_serde!(ServiceStatus);

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn lenient_kind<'de, D: Deserializer<'de>>(d: D) -> Result<ServiceKind, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
}

fn lenient_status<'de, D: Deserializer<'de>>(d: D) -> Result<ServiceStatus, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().map(ServiceStatus::parse_lenient).unwrap_or_default())
}

fn lenient_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    Ok(Option::<Decimal>::deserialize(d)?.unwrap_or_default())
}

/// A service as the dashboard sees it. Decoding never fails on missing or odd fields
/// other than `id`; they fall back to defaults instead. `id` has no fallback: it keys
/// update, delete and in-place replacement, and a shared default would alias records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: i32,
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: ServiceKind,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub purchase_price: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub renewal_price: Decimal,
    #[serde(default, with = "dates::lenient")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, with = "dates::lenient")]
    pub renewal_date: Option<NaiveDate>,
    #[serde(default, with = "dates::lenient")]
    pub next_renewal: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: ServiceStatus,
}

impl ServiceRecord {
    /// `nextRenewal` wins over `renewalDate`; `None` when neither is known.
    pub fn effective_renewal(&self) -> Option<NaiveDate> {
        self.next_renewal.or(self.renewal_date)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// A client contact as the dashboard sees it. Missing or null text fields become `""`;
/// `id` is required, as for [`ServiceRecord`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub repo_link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub drive_link: String,
}

/// Create/update payload for a service. On create the server requires `type`, `name`
/// and both prices; on update only the present fields are applied.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ServiceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_price: Option<Decimal>,
    #[serde(default, with = "dates::optional", skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, with = "dates::optional", skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<NaiveDate>,
    /// `Some(None)` clears a stored override (`"nextRenewal": null`).
    #[serde(default, with = "dates::nullable", skip_serializing_if = "Option::is_none")]
    pub next_renewal: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
}

impl ServiceInput {
    pub fn is_empty(&self) -> bool {
        *self == ServiceInput::default()
    }
}

/// Create/update payload for a client.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_link: Option<String>,
}

impl ClientInput {
    pub fn is_empty(&self) -> bool {
        *self == ClientInput::default()
    }

    /// Drop fields that are blank so they are not sent at all.
    pub fn cleaned(self) -> Self {
        fn keep(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.trim().is_empty())
        }
        ClientInput {
            name: keep(self.name),
            email: keep(self.email),
            phone: keep(self.phone),
            company: keep(self.company),
            repo_link: keep(self.repo_link),
            drive_link: keep(self.drive_link),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_accepts_running_alias_and_emits_active() {
        let s: ServiceStatus = serde_json::from_value(json!("running")).unwrap();
        assert_eq!(s, ServiceStatus::Active);
        assert_eq!(serde_json::to_value(s).unwrap(), json!("active"));
        assert_eq!("Inactive".parse::<ServiceStatus>(), Ok(ServiceStatus::Inactive));
        assert!("paused".parse::<ServiceStatus>().is_err());
    }

    #[test]
    fn kind_is_case_insensitive() {
        assert_eq!("Hosting".parse::<ServiceKind>(), Ok(ServiceKind::Hosting));
        assert_eq!(" DOMAIN ".parse::<ServiceKind>(), Ok(ServiceKind::Domain));
        assert!("vps".parse::<ServiceKind>().is_err());
    }

    #[test]
    fn service_record_decodes_server_shape() {
        let raw = json!({
            "id": 7,
            "type": "domain",
            "name": "example.com",
            "purchasePrice": "12.50",
            "renewalPrice": 15,
            "purchaseDate": "2025-01-10T00:00:00.000Z",
            "renewalDate": "2026-01-10",
            "nextRenewal": null,
            "status": "running",
            "createdAt": "2025-01-10T08:00:00Z"
        });
        let rec: ServiceRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(rec.kind, ServiceKind::Domain);
        assert_eq!(rec.purchase_price, Decimal::new(1250, 2));
        assert_eq!(rec.renewal_price, Decimal::from(15));
        assert_eq!(rec.purchase_date, NaiveDate::from_ymd_opt(2025, 1, 10));
        assert_eq!(rec.effective_renewal(), NaiveDate::from_ymd_opt(2026, 1, 10));
        assert!(rec.is_active());
    }

    #[test]
    fn service_record_falls_back_on_missing_fields() {
        let rec: ServiceRecord =
            serde_json::from_value(json!({"id": 1, "status": "expired", "name": null})).unwrap();
        assert_eq!(rec.kind, ServiceKind::Hosting);
        assert_eq!(rec.name, "");
        assert_eq!(rec.purchase_price, Decimal::ZERO);
        assert_eq!(rec.status, ServiceStatus::Inactive);
        assert_eq!(rec.effective_renewal(), None);
    }

    #[test]
    fn records_without_id_are_rejected() {
        assert!(serde_json::from_value::<ServiceRecord>(json!({"name": "orphan"})).is_err());
        assert!(serde_json::from_value::<ClientRecord>(json!({"email": "a@example.com"})).is_err());
        assert!(serde_json::from_value::<Vec<ServiceRecord>>(json!([{"id": 1}, {"name": "orphan"}])).is_err());
    }

    #[test]
    fn client_record_normalizes_nulls_to_empty_strings() {
        let rec: ClientRecord = serde_json::from_value(json!({
            "id": 3, "name": "Ada", "email": "ada@example.com", "phone": "555",
            "company": null, "repoLink": null
        }))
        .unwrap();
        assert_eq!(rec.company, "");
        assert_eq!(rec.repo_link, "");
        assert_eq!(rec.drive_link, "");
    }

    #[test]
    fn client_input_cleaning_drops_blank_fields() {
        let input = ClientInput {
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            phone: Some("".into()),
            repo_link: Some("   ".into()),
            drive_link: Some("https://drive.example.com/ada".into()),
            ..Default::default()
        }
        .cleaned();
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(
            body,
            json!({"name": "Ada", "email": "ada@example.com", "driveLink": "https://drive.example.com/ada"})
        );
    }

    #[test]
    fn empty_service_input_is_detected() {
        let input: ServiceInput = serde_json::from_value(json!({})).unwrap();
        assert!(input.is_empty());
        let input: ServiceInput = serde_json::from_value(json!({"name": "x"})).unwrap();
        assert!(!input.is_empty());
    }

    #[test]
    fn explicit_null_next_renewal_is_a_change() {
        let input: ServiceInput = serde_json::from_value(json!({"nextRenewal": null})).unwrap();
        assert_eq!(input.next_renewal, Some(None));
        assert!(!input.is_empty());
        assert_eq!(serde_json::to_value(&input).unwrap(), json!({"nextRenewal": null}));

        let input: ServiceInput = serde_json::from_value(json!({"nextRenewal": "2025-07-01"})).unwrap();
        assert_eq!(input.next_renewal, Some(NaiveDate::from_ymd_opt(2025, 7, 1)));
    }
}
