//! Common utilities and shared types for the food catalog.
//!
//! This crate provides foundational components used across all catalog crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Object helpers**: Sanitising partial JSON bodies before updates
//!
//! # Example
//!
//! ```no_run
//! use catalog_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod object;

pub use config::{Config, DatabaseConfig};
pub use error::{AppError, AppResult};
pub use id::{IdGenerator, is_valid_id};
pub use object::{copy_object, delete_invalid_property_in_object};
