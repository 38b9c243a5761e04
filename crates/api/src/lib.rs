//! HTTP API layer for the food catalog.
//!
//! - **Endpoints**: food group and product resources
//! - **Extractors**: bearer-token users and JSON bodies with enveloped rejections
//! - **Middleware**: token authentication
//!
//! Built on Axum 0.8. Every response uses the `{ statusCode, data }` envelope.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::{health, router};
