//! Match Builder
//!
//! Builds `IndexMatches` in a single pre-order pass over content-node
//! vertices. Only objects are candidates. The open scope is passed down the
//! recursion, so leaving a subtree restores the enclosing scope.

use super::{IndexMatches, MatchId, MatchNode};
use crate::tree::{IdentityReader, Key, KeyPath, VertexPolicy};
use serde_json::Value;

/// Builder state for one indexing pass
pub struct MatchBuilder<'r> {
    identity: &'r IdentityReader,
    matches: IndexMatches,
}

impl<'r> MatchBuilder<'r> {
    pub fn new(identity: &'r IdentityReader) -> Self {
        MatchBuilder {
            identity,
            matches: IndexMatches::new(),
        }
    }

    /// Index every content vertex below `root`; the root is not a candidate
    pub fn build(mut self, root: &Value) -> IndexMatches {
        let mut path = Vec::new();
        self.visit_members(root, &mut path, None);
        self.matches
    }

    fn visit_members(&mut self, value: &Value, path: &mut KeyPath, scope: Option<MatchId>) {
        for (key, member) in VertexPolicy::ContentNodes.children_vec(value) {
            path.push(key);
            self.visit(member, path, scope);
            path.pop();
        }
    }

    fn visit(&mut self, value: &Value, path: &mut KeyPath, scope: Option<MatchId>) {
        let mut inner_scope = scope;
        if value.is_object() {
            let id = self.identity.id_of(value);
            let local_name = self.identity.local_name_of(value);
            if id.is_some() || local_name.is_some() {
                let node = self.register(path);
                if let Some(id) = id {
                    self.matches
                        .id_matches
                        .entry(id.into_owned())
                        .or_default()
                        .push(node);
                }
                if let Some(name) = local_name {
                    let names = match scope.and_then(|open| self.matches.nodes.get_mut(open)) {
                        Some(parent) => &mut parent.name_matches,
                        None => &mut self.matches.root_matches,
                    };
                    names.entry(name.into_owned()).or_default().push(node);
                }
                inner_scope = Some(node);
            }
        }
        self.visit_members(value, path, inner_scope);
    }

    fn register(&mut self, path: &[Key]) -> MatchId {
        self.matches.nodes.push(MatchNode::new(path.to_vec()));
        self.matches.nodes.len() - 1
    }
}
