//! Storage utilities shared by the spatial index.

mod dense_store;

pub use dense_store::{DenseStore, DEFAULT_GROWTH_INCREMENT};
