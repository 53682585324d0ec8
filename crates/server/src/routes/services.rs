use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    Json,
};

use common::types::ServiceInput;
use service::db::services_service;

use crate::{errors::JsonApiError, observability::track, state::AppState};

#[utoipa::path(
    get, path = "/services", tag = "services",
    responses(
        (status = 200, description = "All services in insertion order", body = [crate::openapi::ServiceDoc]),
        (status = 404, description = "No services found (only with api.empty_list_not_found)"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<models::service::Model>>, JsonApiError> {
    let rows = track("service", "list", services_service::list_services(&state.db, state.list_policy).await)?;
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/services", tag = "services",
    request_body = crate::openapi::ServiceInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ServiceInput>, JsonRejection>,
) -> Result<Json<models::service::Model>, JsonApiError> {
    let Json(input) = payload?;
    let created = track("service", "create", services_service::create_service(&state.db, &input).await)?;
    Ok(Json(created))
}

#[utoipa::path(
    put, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    request_body = crate::openapi::ServiceInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ServiceInput>, JsonRejection>,
) -> Result<Json<models::service::Model>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let updated = track("service", "update", services_service::update_service(&state.db, id, &input).await)?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Deleted; body is the removed service", body = crate::openapi::ServiceDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<models::service::Model>, JsonApiError> {
    let Path(id) = id?;
    let deleted = track("service", "delete", services_service::delete_service(&state.db, id).await)?;
    Ok(Json(deleted))
}
