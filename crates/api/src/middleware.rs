//! API middleware.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use catalog_core::{FoodGroupService, ProductService, UserService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub food_group_service: FoodGroupService,
    pub product_service: ProductService,
    pub user_service: UserService,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to a user and stores it in the request
/// extensions. Requests without a valid token pass through anonymously.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned);

    if let Some(token) = token {
        match state.user_service.authenticate_by_token(&token).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(e) => tracing::debug!(error = %e, "Bearer token rejected"),
        }
    }

    next.run(req).await
}
