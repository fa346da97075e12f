use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::{Coffee, CoffeeInput};
use tracing::info;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/coffees", tag = "coffees",
    responses(
        (status = 200, description = "All coffees", body = [crate::openapi::CoffeeDoc]),
        (status = 500, description = "Storage Error")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Coffee>>, JsonApiError> {
    let all = state.coffees.list_all().await?;
    Ok(Json(all))
}

#[utoipa::path(
    get, path = "/coffees/{id}", tag = "coffees",
    params(("id" = String, Path, description = "Coffee ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CoffeeDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Coffee>, JsonApiError> {
    let coffee = state.coffees.get_by_id(&id).await?;
    Ok(Json(coffee))
}

#[utoipa::path(
    post, path = "/coffees", tag = "coffees",
    request_body = crate::openapi::CoffeeInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CoffeeDoc),
        (status = 409, description = "Conflict: id already exists")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<CoffeeInput>) -> Result<(StatusCode, Json<Coffee>), JsonApiError> {
    let created = state.coffees.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// The path id is authoritative; an `id` in the body is ignored.
#[utoipa::path(
    put, path = "/coffees/{id}", tag = "coffees",
    params(("id" = String, Path, description = "Coffee ID")),
    request_body = crate::openapi::CoffeeInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CoffeeDoc),
        (status = 201, description = "Created", body = crate::openapi::CoffeeDoc)
    )
)]
pub async fn upsert(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<CoffeeInput>,
) -> Result<(StatusCode, Json<Coffee>), JsonApiError> {
    if let Some(body_id) = input.supplied_id().filter(|b| *b != id) {
        info!(path_id = %id, body_id = %body_id, "ignoring body id on upsert");
    }
    let (coffee, outcome) = state.coffees.upsert(&id, input.name).await?;
    let status = if outcome.is_created() { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(coffee)))
}

#[utoipa::path(
    delete, path = "/coffees/{id}", tag = "coffees",
    params(("id" = String, Path, description = "Coffee ID")),
    responses(
        (status = 204, description = "Deleted, or was already absent")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    state.coffees.delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
