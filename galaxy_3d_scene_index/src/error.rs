//! Error types for the Galaxy3D scene index
//!
//! This module defines the errors reported by the spatial index when a
//! caller breaks the insert/remove/update contract or hands it a malformed
//! bounding box.

use std::fmt;

/// Result type for Galaxy3D scene index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D scene index errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The object key is not stored in the index (remove/update of an unknown object)
    KeyNotFound(u64),

    /// The object key is already stored in the index (double insert)
    DuplicateKey(u64),

    /// Bounding box is inverted (min > max) or has non-finite coordinates
    InvalidAabb(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound(key) => write!(f, "Key not found: {}", key),
            Error::DuplicateKey(key) => write!(f, "Duplicate key: {}", key),
            Error::InvalidAabb(msg) => write!(f, "Invalid AABB: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
