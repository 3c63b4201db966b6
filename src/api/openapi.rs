//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{documents, health, locations, map, posts};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trip Map API",
        version = "0.3.0",
        description = "Travel list, schedule and accommodation storage for the trip map"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Documents
        documents::get_list,
        documents::save_list,
        documents::get_schedule,
        documents::save_schedule,
        documents::get_accommodations,
        documents::save_accommodations,
        documents::get_places,
        documents::save_places,
        // Posts
        posts::list_posts,
        posts::create_post,
        // Locations
        locations::list_locations,
        // Map
        map::map_config,
    ),
    components(
        schemas(
            // Documents
            crate::models::ListDocument,
            crate::models::DayPlaces,
            crate::models::ScheduleDocument,
            crate::models::ScheduleEntry,
            crate::models::AccommodationDocument,
            crate::models::Accommodation,
            crate::models::DayKey,
            crate::models::UpdateResult,
            documents::InsertedResponse,
            documents::ScheduleSaveResponse,
            documents::PlacesResponse,
            // Posts
            crate::models::Post,
            crate::models::CreatePost,
            posts::PostsResponse,
            posts::PostCreatedResponse,
            // Locations
            crate::models::Location,
            locations::LocationQuery,
            locations::LocationsResponse,
            // Map
            map::MapConfigResponse,
            map::CategoryButton,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "documents", description = "Singleton trip documents"),
        (name = "posts", description = "Board posts"),
        (name = "locations", description = "Place lookup"),
        (name = "map", description = "Map bootstrap settings")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
