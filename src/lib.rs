pub mod app_errors;
pub mod config;
mod doc;
pub mod modules;
pub mod routes;
pub mod utils;
pub mod validation;

use crate::config::environment::Environment;
use crate::modules::AppState;
use axum::extract::State;
use axum::response::Redirect;
use axum::{Json, Router};
use http::{StatusCode, Uri};
use serde_json::{json, Value};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const SWAGGER_URI: &str = "/swagger-ui";

pub fn app(state: AppState) -> Router {
    let mut router = Router::new();

    info!("Environment: {}", state.environment);
    if state.environment.is_dev() {
        info!("Enabling Swagger UI");
        router = router.merge(
            SwaggerUi::new(SWAGGER_URI).url("/api-doc/openapi.json", doc::ApiDoc::openapi()),
        );
    }

    info!("Spawning main router with state: {state}");

    router
        .nest("/rsvp", routes::rsvp::router())
        .nest("/invitations", routes::invitations::router())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(
    State(environment): State<Environment>,
    uri: Uri,
) -> Result<Redirect, (StatusCode, Json<Value>)> {
    if environment.is_dev() && uri.path() == "/" {
        return Ok(Redirect::to(SWAGGER_URI));
    }
    Err((
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "404 Not Found" })),
    ))
}
