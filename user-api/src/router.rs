use axum::{
    http::{header, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, routes};

pub fn create(app_state: AppState, app_url: &str) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(allowed_origin(app_url));

    Router::new()
        .route("/health", get(health))
        .nest("/users", routes::users::router())
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn allowed_origin(app_url: &str) -> AllowOrigin {
    let app_url = app_url.trim_end_matches('/').to_string();
    AllowOrigin::predicate(move |origin, _| {
        origin.to_str().is_ok_and(|origin| origin == app_url)
    })
}
