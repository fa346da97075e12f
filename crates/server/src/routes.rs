use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod coffees;
pub mod greeting;
pub mod droid;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: coffees, greeting/droid, health and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let coffee_routes = Router::new()
        .route("/coffees", get(coffees::list).post(coffees::create))
        .route(
            "/coffees/:id",
            get(coffees::get).put(coffees::upsert).delete(coffees::delete),
        );

    let config_routes = Router::new()
        .route("/greeting", get(greeting::name))
        .route("/greeting/coffee", get(greeting::coffee))
        .route("/droid", get(droid::get));

    Router::new()
        .route("/health", get(health))
        .merge(coffee_routes)
        .merge(config_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request, carrying method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx and the like
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
