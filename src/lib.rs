pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod utils;

pub use config::Config;
pub use error::AppError;
pub use routes::create_app;
pub use state::AppState;

// Re-export the pure domain rules (avoiding ambiguous re-exports)
pub use utils::{
    classify, select_listing, Classification, Listing,
    normalize_for_create, normalize_for_update, resolve_for_create, resolve_for_update,
    OrganizersUpdate,
    available_years, format_publication_date, publication_sort_key, publication_year,
    recent_publications,
};
