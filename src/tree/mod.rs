//! Tree Module - Routes and traversal over JSON content
//!
//! Content documents are plain `serde_json::Value` trees. This module
//! provides:
//! - `Key` / `KeyPath` for raw structural addressing
//! - `Route` for a key path paired with the values it passes through
//! - a depth-first walker with pluggable vertex policies
//! - `NodeShape` for reading ids and local names off content nodes

pub mod key;
pub mod route;
pub mod shape;
pub mod walk;

pub use key::{Key, KeyPath};
pub use route::Route;
pub use shape::{IdentityReader, NodeShape};
pub use walk::{walk_descendants, VertexPolicy, WalkControl};
