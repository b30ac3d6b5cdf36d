//! Property indexing
//!
//! Provides B-Tree indices for exact-match property lookups.

pub mod manager;
pub mod property_index;

pub use manager::{IndexManager, PropertyIndexKey};
pub use property_index::PropertyIndex;
