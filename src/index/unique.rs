//! Uniqueness Resolution
//!
//! Collapses a match map into a tree with exactly one node per key. Keys
//! with several matches are left out of the tree and reported instead.

use super::{IndexMatches, MatchMap};
use crate::search::{SearchStep, Selector};
use crate::tree::KeyPath;
use indexmap::IndexMap;
use serde::Serialize;

/// An indexed node with its uniquely named descendants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraversalNode {
    pub route: KeyPath,
    pub children: IndexMap<String, TraversalNode>,
}

/// An address that resolved to more than one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmbiguousSearch {
    /// Address that was ambiguous
    pub search: Vec<SearchStep>,
    /// Key paths of every match, in document order
    pub results: Vec<KeyPath>,
}

/// Unique entries of `source`.
///
/// `selector` builds the step for each key and `path` is the address of
/// the enclosing scope; both only shape the reports pushed to `duplicates`.
pub fn unique_names_in(
    matches: &IndexMatches,
    source: &MatchMap,
    mut duplicates: Option<&mut Vec<AmbiguousSearch>>,
    selector: Selector,
    path: &[SearchStep],
) -> IndexMap<String, TraversalNode> {
    let mut unique = IndexMap::with_capacity(source.len());
    for (key, ids) in source {
        let mut search = path.to_vec();
        search.push(selector.step(key.as_str()));
        match ids.as_slice() {
            [only] => {
                let Some(node) = matches.get(*only) else {
                    continue;
                };
                let children = unique_names_in(
                    matches,
                    &node.name_matches,
                    duplicates.as_deref_mut(),
                    Selector::LocalName,
                    &search,
                );
                unique.insert(
                    key.clone(),
                    TraversalNode {
                        route: node.route.clone(),
                        children,
                    },
                );
            }
            _ => {
                if let Some(sink) = duplicates.as_deref_mut() {
                    sink.push(AmbiguousSearch {
                        search,
                        results: matches.routes_of(ids),
                    });
                }
            }
        }
    }
    unique
}
