use axum::{extract::State, Json};
use configs::DroidConfig;

use crate::state::ServerState;

#[utoipa::path(get, path = "/droid", tag = "config", responses((status = 200, description = "Configured droid", body = crate::openapi::DroidDoc)))]
pub async fn get(State(state): State<ServerState>) -> Json<DroidConfig> {
    Json((*state.droid).clone())
}
