//! Identity Index Module
//!
//! Indexes a content tree by node id and by scoped local name, then
//! collapses the index into a duplicate-free form.
//!
//! ## Architecture
//!
//! ```text
//! MatchBuilder ──> IndexMatches ──> unique_names_in ──> Validation
//!                  ├── nodes: Vec<MatchNode>   (arena, pre-order)
//!                  ├── id_matches:   id        -> [MatchId]
//!                  └── root_matches: localName -> [MatchId]
//! ```
//!
//! A node carrying both an id and a local name is registered once in the
//! arena and referenced from both maps. Local names are scoped to the
//! nearest ancestor that carried an id or a local name; names with no such
//! ancestor land in `root_matches`.

pub mod builder;
pub mod unique;
pub mod validator;

pub use builder::MatchBuilder;
pub use unique::{unique_names_in, AmbiguousSearch, TraversalNode};
pub use validator::{LocalNameValidator, Validation};

use crate::tree::KeyPath;
use indexmap::IndexMap;

/// Position of a match node in the `IndexMatches` arena
pub type MatchId = usize;

/// Matches grouped by key, in pre-order
pub type MatchMap = IndexMap<String, Vec<MatchId>>;

/// A node that matched on id and/or local name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchNode {
    /// Key path from the document root
    pub route: KeyPath,
    /// Local-name matches scoped to this node
    pub name_matches: MatchMap,
}

impl MatchNode {
    pub fn new(route: KeyPath) -> Self {
        MatchNode {
            route,
            name_matches: IndexMap::new(),
        }
    }
}

/// Every id and local-name match in a document, duplicates included
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexMatches {
    /// Arena of match nodes in registration order
    pub nodes: Vec<MatchNode>,
    /// Matches by id
    pub id_matches: MatchMap,
    /// Local-name matches with no enclosing scope
    pub root_matches: MatchMap,
}

impl IndexMatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match node by id
    #[inline]
    pub fn get(&self, id: MatchId) -> Option<&MatchNode> {
        self.nodes.get(id)
    }

    /// Key paths of the given match nodes
    pub fn routes_of(&self, ids: &[MatchId]) -> Vec<KeyPath> {
        ids.iter()
            .filter_map(|&id| self.get(id))
            .map(|node| node.route.clone())
            .collect()
    }

    /// Number of registered match nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
