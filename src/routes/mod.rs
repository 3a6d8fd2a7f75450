use axum::Router;

use crate::state::AppState;

pub mod dashboard;
pub mod doc;
pub mod folios;
pub mod health;
pub mod housekeeping;
pub mod maintenance;
pub mod params;
pub mod reservations;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/reservations", reservations::router())
        .nest("/folios", folios::router())
        .nest("/housekeeping", housekeeping::router())
        .nest("/maintenance", maintenance::router())
        .nest("/dashboard", dashboard::router())
}
