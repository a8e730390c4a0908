//! Application router shared by the binary and the integration tests.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{self, web};
use crate::middleware::auth_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full application [`Router`]
///
/// Read-only API routes and HTML pages are public. Every route that writes
/// goes through [`auth_middleware`].
pub fn create_app(state: AppState, max_upload_bytes: usize) -> Router {
    let upload_dir = state.upload_dir.clone();

    Router::new()
        .merge(public_routes())
        .merge(admin_routes(state.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(web::home))
        .route("/conferences", get(web::conferences_page))
        .route("/publications", get(web::publications_page))
        .route("/staff", get(web::staff_page))
        .route("/staff/{id}", get(web::staff_profile))
        .route("/space-weather", get(web::space_weather))
        // Conferences
        .route("/api/conferences", get(handlers::list_conferences))
        .route("/api/conferences/upcoming", get(handlers::list_upcoming_conferences))
        .route("/api/conferences/past", get(handlers::list_past_conferences))
        .route("/api/conferences/{id}", get(handlers::get_conference))
        // Research
        .route("/api/research", get(handlers::list_research))
        .route("/api/research/projects", get(handlers::list_projects))
        .route("/api/research/publications", get(handlers::list_publications))
        .route("/api/research/publications/recent", get(handlers::list_recent_publications))
        .route("/api/research/{id}", get(handlers::get_research_item))
        // Staff
        .route("/api/staff", get(handlers::list_staff))
        .route("/api/staff/{id}", get(handlers::get_staff_member))
        // Events
        .route("/api/events", get(handlers::list_events))
        .route("/api/events/{id}", get(handlers::get_event))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/conferences", post(handlers::create_conference))
        .route(
            "/api/conferences/{id}",
            put(handlers::update_conference).delete(handlers::delete_conference),
        )
        .route("/api/conferences/{id}/hard", delete(handlers::hard_delete_conference))
        .route("/api/research", post(handlers::create_research_item))
        .route(
            "/api/research/{id}",
            put(handlers::update_research_item).delete(handlers::delete_research_item),
        )
        .route("/api/staff", post(handlers::create_staff_member))
        .route("/api/staff/upload", post(handlers::upload_staff_image))
        .route(
            "/api/staff/{id}",
            put(handlers::update_staff_member).delete(handlers::delete_staff_member),
        )
        .route("/api/events", post(handlers::create_event))
        .route(
            "/api/events/{id}",
            put(handlers::update_event).delete(handlers::delete_event),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
