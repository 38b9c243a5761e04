//! ID generation utilities.

use ulid::Ulid;

/// Length of a generated ID.
pub const ID_LENGTH: usize = 26;

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// ULIDs are:
    /// - Lexicographically sortable
    /// - Monotonically increasing within the same millisecond
    /// - Shorter than UUIDs when represented as strings
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }
}

/// Returns whether `id` is syntactically a valid entity ID.
///
/// Only the shape is checked; the ID may still not exist.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LENGTH && Ulid::from_string(id).is_ok()
}
