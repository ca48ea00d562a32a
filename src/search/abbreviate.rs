//! Route Abbreviation
//!
//! Turns a concrete route into the shortest address the identity index can
//! answer: an `{id}` anchor, then `{localName}` steps, then whatever raw
//! keys lie below the last named node.

use super::step::SearchStep;
use crate::tree::{IdentityReader, Route, VertexPolicy};

/// Builds minimal addresses from routes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchAbbreviator {
    identity: IdentityReader,
}

impl SearchAbbreviator {
    pub fn new(name_attribute: impl Into<String>) -> Self {
        SearchAbbreviator {
            identity: IdentityReader::new(name_attribute),
        }
    }

    /// Attribute read for local names
    pub fn name_attribute(&self) -> &str {
        &self.identity.name_attribute
    }

    /// Address for `route`.
    ///
    /// Keys are read from the target back toward the root. Each key is
    /// judged by the value it leads to: an id ends the address, a local name
    /// is kept and stops raw keys above it from being copied. Only values
    /// the index can see are judged: those reached from the root through
    /// array items and `content` / `children` properties alone.
    pub fn search_for(&self, route: &Route<'_>) -> Vec<SearchStep> {
        let indexed = route
            .path
            .iter()
            .enumerate()
            .take_while(|(index, key)| {
                route
                    .value_at(*index)
                    .is_some_and(|parent| VertexPolicy::ContentNodes.admits(parent, key))
            })
            .count();
        let mut reversed = Vec::new();
        let mut copy_keys = true;
        for (index, key) in route.path.iter().enumerate().rev() {
            if let Some(value) = route.value_at(index + 1).filter(|_| index < indexed) {
                if let Some(id) = self.identity.id_of(value) {
                    reversed.push(SearchStep::id(id));
                    break;
                }
                if let Some(name) = self.identity.local_name_of(value) {
                    reversed.push(SearchStep::local_name(name));
                    copy_keys = false;
                    continue;
                }
            }
            if copy_keys {
                reversed.push(SearchStep::Key(key.clone()));
            }
        }
        reversed.reverse();
        reversed
    }
}
