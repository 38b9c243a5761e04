//! API endpoints.

mod food_groups;
mod health;
mod products;

use axum::Router;

use crate::middleware::AppState;

pub use health::health;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/foodgroups", food_groups::router())
        .nest("/products", products::router())
}
