//! Indexed Search
//!
//! Answers id and local-name prefixes of an address straight from a
//! `Validation`, then hands the rest of the address to structural search
//! from the indexed node. When the index has nothing for the first step,
//! the whole address is searched from the root.

use super::resolver::{SearchPathResolver, SearchResponse};
use super::step::{path_shorthand, SearchStep};
use crate::index::{TraversalNode, Validation};
use crate::tree::Route;
use serde_json::Value;

/// Outcome of walking an address through the index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedNodeSearch<'v, 's> {
    /// Deepest indexed node reached, if the first step was indexed
    pub node: Option<&'v TraversalNode>,
    /// Steps left after that node
    pub subpath: &'s [SearchStep],
}

/// Resolver that consults a `Validation` before walking the document
pub struct ValidatedSearchResolver {
    subsearch: SearchPathResolver,
}

impl ValidatedSearchResolver {
    pub fn new(name_attribute: &str) -> Self {
        ValidatedSearchResolver {
            subsearch: SearchPathResolver::identified(name_attribute),
        }
    }

    /// Structural resolver used for subpaths and fallbacks
    pub fn subsearch(&self) -> &SearchPathResolver {
        &self.subsearch
    }

    /// Follow the indexed prefix of `path`.
    ///
    /// The first step must be an `{id}` or a root `{localName}`; following
    /// `{localName}` steps descend through scoped children until a step is
    /// not a name or the name is not indexed there.
    pub fn find_named_node<'v, 's>(
        &self,
        validation: &'v Validation,
        path: &'s [SearchStep],
    ) -> NamedNodeSearch<'v, 's> {
        let anchor = match path.first() {
            Some(SearchStep::Id { id }) => validation.id_values.get(id),
            Some(SearchStep::LocalName { local_name }) => validation.root_values.get(local_name),
            _ => None,
        };
        let Some(mut node) = anchor else {
            return NamedNodeSearch { node: None, subpath: path };
        };
        let mut consumed = 1;
        for step in &path[1..] {
            let SearchStep::LocalName { local_name } = step else {
                break;
            };
            match node.children.get(local_name) {
                Some(child) => {
                    node = child;
                    consumed += 1;
                }
                None => break,
            }
        }
        NamedNodeSearch {
            node: Some(node),
            subpath: &path[consumed..],
        }
    }

    /// Resolve `path` against `root`, using `validation` where it can answer.
    pub fn resolve<'a>(
        &self,
        validation: &Validation,
        root: &'a Value,
        path: &[SearchStep],
        max_results: Option<usize>,
    ) -> SearchResponse<'a> {
        let named = self.find_named_node(validation, path);
        let Some(node) = named.node else {
            tracing::trace!(address = %path_shorthand(path), "address not indexed, searching from root");
            return self.subsearch.resolve(root, path, max_results);
        };
        let Some(anchor) = Route::follow(root, &node.route) else {
            tracing::debug!(route = ?node.route, "indexed route missing from document, searching from root");
            return self.subsearch.resolve(root, path, max_results);
        };
        if named.subpath.is_empty() {
            if max_results == Some(0) {
                return SearchResponse {
                    results: Vec::new(),
                    completed: false,
                };
            }
            return SearchResponse {
                results: vec![anchor],
                completed: true,
            };
        }
        self.subsearch.extend_search(&anchor, named.subpath, max_results)
    }
}

impl Default for ValidatedSearchResolver {
    fn default() -> Self {
        ValidatedSearchResolver {
            subsearch: SearchPathResolver::default(),
        }
    }
}
