//! Core business logic for the food catalog.

pub mod services;

pub use services::*;
