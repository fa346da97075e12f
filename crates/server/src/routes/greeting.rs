use axum::extract::State;

use crate::state::ServerState;

#[utoipa::path(get, path = "/greeting", tag = "config", responses((status = 200, description = "Configured greeting name", body = String)))]
pub async fn name(State(state): State<ServerState>) -> String {
    state.greeting.name.clone()
}

#[utoipa::path(get, path = "/greeting/coffee", tag = "config", responses((status = 200, description = "Who drinks what", body = String)))]
pub async fn coffee(State(state): State<ServerState>) -> String {
    state.greeting.coffee()
}
