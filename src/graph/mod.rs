//! Property graph model and storage
//!
//! This module provides:
//! - Nodes with labels and properties
//! - Undirected, typed relationships with properties
//! - The `GraphStore` contract with unit-of-work scoping
//! - `InMemoryGraphStore`, an insertion-ordered in-memory implementation

pub mod edge;
pub mod memory;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use memory::InMemoryGraphStore;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{with_unit_of_work, GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, EdgeType, Label, NodeId, UnitOfWork};
