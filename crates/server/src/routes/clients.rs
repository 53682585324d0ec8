use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    Json,
};

use common::types::ClientInput;
use service::db::clients_service;

use crate::{errors::JsonApiError, observability::track, state::AppState};

#[utoipa::path(
    get, path = "/clients", tag = "clients",
    responses(
        (status = 200, description = "All clients in insertion order", body = [crate::openapi::ClientDoc]),
        (status = 404, description = "No clients found (only with api.empty_list_not_found)"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<models::client::Model>>, JsonApiError> {
    let rows = track("client", "list", clients_service::list_clients(&state.db, state.list_policy).await)?;
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/clients", tag = "clients",
    request_body = crate::openapi::ClientInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ClientDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ClientInput>, JsonRejection>,
) -> Result<Json<models::client::Model>, JsonApiError> {
    let Json(input) = payload?;
    let created = track("client", "create", clients_service::create_client(&state.db, &input).await)?;
    Ok(Json(created))
}

#[utoipa::path(
    put, path = "/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client ID")),
    request_body = crate::openapi::ClientInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ClientDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ClientInput>, JsonRejection>,
) -> Result<Json<models::client::Model>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let updated = track("client", "update", clients_service::update_client(&state.db, id, &input).await)?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Deleted; body is the removed client", body = crate::openapi::ClientDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<models::client::Model>, JsonApiError> {
    let Path(id) = id?;
    let deleted = track("client", "delete", clients_service::delete_client(&state.db, id).await)?;
    Ok(Json(deleted))
}
