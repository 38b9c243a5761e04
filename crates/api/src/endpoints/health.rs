//! Liveness endpoint.

use serde::Serialize;

use crate::response::ApiResponse;

#[derive(Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: &'static str,
}

/// Report that the process is up.
pub async fn health() -> ApiResponse<HealthBody> {
    ApiResponse::ok(HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
