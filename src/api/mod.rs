//! API handlers for the trip map REST endpoints

pub mod documents;
pub mod health;
pub mod locations;
pub mod map;
pub mod openapi;
pub mod posts;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Singleton documents
        .route("/list", get(documents::get_list).post(documents::save_list))
        .route("/schedule", get(documents::get_schedule).post(documents::save_schedule))
        .route(
            "/accommodations",
            get(documents::get_accommodations).post(documents::save_accommodations),
        )
        .route("/places", get(documents::get_places).post(documents::save_places))
        // Posts
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        // Map support
        .route("/locations", get(locations::list_locations))
        .route("/map/config", get(map::map_config))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
