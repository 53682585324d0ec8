use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use common::{dates, overview::Overview};
use service::overview_service;

use crate::{errors::JsonApiError, observability::track, state::AppState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OverviewQuery {
    /// Reference date (`YYYY-MM-DD`); defaults to the current UTC date.
    pub today: Option<String>,
}

#[utoipa::path(
    get, path = "/overview", tag = "overview",
    params(OverviewQuery),
    responses(
        (status = 200, description = "Dashboard summary", body = crate::openapi::OverviewDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<OverviewQuery>, QueryRejection>,
) -> Result<Json<Overview>, JsonApiError> {
    let Query(q) = query?;
    let today = match q.today.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => dates::parse_lenient(raw)
            .ok_or_else(|| JsonApiError::bad_request(format!("invalid date: {raw}")))?,
        None => Utc::now().date_naive(),
    };
    let overview = track("overview", "get", overview_service::load_overview(&state.db, today).await)?;
    Ok(Json(overview))
}
