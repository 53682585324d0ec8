use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// A stored service. Prices are decimal strings; dates are `YYYY-MM-DD`.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDoc {
    pub id: i32,
    #[serde(rename = "type")]
    #[schema(example = "hosting")]
    pub kind: String,
    pub name: String,
    #[schema(example = "100.00")]
    pub purchase_price: String,
    #[schema(example = "90.00")]
    pub renewal_price: String,
    #[schema(example = "2025-01-10")]
    pub purchase_date: String,
    pub renewal_date: String,
    pub next_renewal: Option<String>,
    #[schema(example = "active")]
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Create/update body. On create `type`, `name` and both prices are required.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInputDoc {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub purchase_price: Option<String>,
    pub renewal_price: Option<String>,
    pub purchase_date: Option<String>,
    pub renewal_date: Option<String>,
    /// `null` clears the override.
    pub next_renewal: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDoc {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub repo_link: Option<String>,
    pub drive_link: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientInputDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub repo_link: Option<String>,
    pub drive_link: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDoc {
    pub total_services: u64,
    pub active_services: u64,
    pub total_domains: u64,
    pub active_domains: u64,
    pub total_clients: u64,
    pub total_revenue: String,
    pub monthly_revenue: String,
    #[schema(example = "93.3")]
    pub renewal_rate: String,
    pub upcoming_renewals: Vec<ServiceDoc>,
    pub recent_clients: Vec<ClientDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::clients::list,
        crate::routes::clients::create,
        crate::routes::clients::update,
        crate::routes::clients::delete,
        crate::routes::overview::get,
        crate::routes::proxy::forward,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceDoc,
            ServiceInputDoc,
            ClientDoc,
            ClientInputDoc,
            OverviewDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "services"),
        (name = "clients"),
        (name = "overview"),
        (name = "proxy")
    )
)]
pub struct ApiDoc;
