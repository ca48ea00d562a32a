//! Local Name Validator
//!
//! Checks a content tree for duplicate ids and for duplicate local names
//! within one scope, producing a `Validation` that doubles as a lookup index.

use super::unique::{unique_names_in, AmbiguousSearch, TraversalNode};
use super::{IndexMatches, MatchBuilder};
use crate::config::SearchOptions;
use crate::search::Selector;
use crate::tree::IdentityReader;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Duplicate-free index of a content tree plus its ambiguities
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    /// Nodes with a unique id
    pub id_values: IndexMap<String, TraversalNode>,
    /// Nodes with a unique local name and no enclosing scope
    pub root_values: IndexMap<String, TraversalNode>,
    /// Addresses with more than one match, id scope first
    pub duplicates: Vec<AmbiguousSearch>,
}

impl Validation {
    /// Check whether no id or scoped local name is ambiguous
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.duplicates.is_empty()
    }
}

/// Indexes and validates content trees
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalNameValidator {
    identity: IdentityReader,
}

impl LocalNameValidator {
    pub fn new(name_attribute: impl Into<String>) -> Self {
        LocalNameValidator {
            identity: IdentityReader::new(name_attribute),
        }
    }

    pub fn from_options(options: &SearchOptions) -> Self {
        LocalNameValidator::new(options.name_attribute.clone())
    }

    /// Attribute read for local names
    pub fn name_attribute(&self) -> &str {
        &self.identity.name_attribute
    }

    /// Every id and local-name match under `source`, duplicates included
    pub fn get_matches(&self, source: &Value) -> IndexMatches {
        MatchBuilder::new(&self.identity).build(source)
    }

    /// Index `source` and report its ambiguities
    pub fn validate(&self, source: &Value) -> Validation {
        let matches = self.get_matches(source);
        self.validate_matches(&matches)
    }

    /// Collapse `matches` into a duplicate-free index
    pub fn validate_matches(&self, matches: &IndexMatches) -> Validation {
        let mut duplicates = Vec::new();
        let id_values = unique_names_in(matches, &matches.id_matches, Some(&mut duplicates), Selector::Id, &[]);
        let root_values = unique_names_in(
            matches,
            &matches.root_matches,
            Some(&mut duplicates),
            Selector::LocalName,
            &[],
        );
        tracing::debug!(
            nodes = matches.len(),
            ids = id_values.len(),
            root_names = root_values.len(),
            duplicates = duplicates.len(),
            "validated local names"
        );
        Validation {
            id_values,
            root_values,
            duplicates,
        }
    }
}
