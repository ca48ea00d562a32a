//! Search Path Resolver
//!
//! Resolves a step sequence against a document by walking it. Each step is
//! compiled by the first rule in the chain that recognizes it; the compiled
//! term is then tested against the descendants of every route produced by
//! the previous step. Raw key steps that no rule claims are followed as
//! plain structural keys.

use super::compiler::{AttributeValueSearch, SearchTermCompiler, TemplatedSearch};
use super::step::{SearchStep, Selector};
use crate::config::DEFAULT_NAME_ATTRIBUTE;
use crate::tree::shape::ID_ATTRIBUTE;
use crate::tree::{walk_descendants, Route, WalkControl};
use serde_json::Value;

/// Routes found by a search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse<'a> {
    /// Matching routes in document order
    pub results: Vec<Route<'a>>,
    /// False when the result cap cut enumeration short
    pub completed: bool,
}

impl<'a> SearchResponse<'a> {
    /// Response with no results
    pub fn empty() -> Self {
        SearchResponse {
            results: Vec::new(),
            completed: true,
        }
    }

    /// First result, if any
    pub fn first(&self) -> Option<&Route<'a>> {
        self.results.first()
    }

    /// Target values of every result
    pub fn targets(&self) -> Vec<&'a Value> {
        self.results.iter().map(|route| route.target).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Structural resolver with an ordered chain of term rules
pub struct SearchPathResolver {
    term_rules: Vec<Box<dyn SearchTermCompiler>>,
}

impl SearchPathResolver {
    /// Resolver with no rules; only raw keys resolve
    pub fn new() -> Self {
        SearchPathResolver {
            term_rules: Vec::new(),
        }
    }

    /// Resolver that searches by id and by local name
    pub fn identified(name_attribute: &str) -> Self {
        SearchPathResolver::new()
            .with_rule(AttributeValueSearch::new(Selector::Id, ID_ATTRIBUTE))
            .with_rule(AttributeValueSearch::new(Selector::LocalName, name_attribute))
    }

    /// Resolver that evaluates `$use` template steps
    pub fn templated() -> Self {
        SearchPathResolver::templated_with(TemplatedSearch::default())
    }

    /// Resolver that evaluates template steps with a custom search rule
    pub fn templated_with(search: TemplatedSearch) -> Self {
        SearchPathResolver::new().with_rule(search)
    }

    /// Append a rule to the chain
    pub fn with_rule(mut self, rule: impl SearchTermCompiler + 'static) -> Self {
        self.push_rule(rule);
        self
    }

    pub fn push_rule(&mut self, rule: impl SearchTermCompiler + 'static) {
        self.term_rules.push(Box::new(rule));
    }

    /// Resolve `steps` from the document root
    pub fn resolve<'a>(&self, root: &'a Value, steps: &[SearchStep], max_results: Option<usize>) -> SearchResponse<'a> {
        self.extend_search(&Route::root(root), steps, max_results)
    }

    /// Resolve `steps` starting at an existing route
    pub fn extend_search<'a>(
        &self,
        route: &Route<'a>,
        steps: &[SearchStep],
        max_results: Option<usize>,
    ) -> SearchResponse<'a> {
        let mut response = SearchResponse::empty();
        if max_results == Some(0) {
            response.completed = false;
            return response;
        }
        let control = self.extend_into(route, steps, &mut response.results, max_results);
        response.completed = control != WalkControl::Stop;
        response
    }

    fn extend_into<'a>(
        &self,
        route: &Route<'a>,
        steps: &[SearchStep],
        results: &mut Vec<Route<'a>>,
        max_results: Option<usize>,
    ) -> WalkControl {
        let Some((step, rest)) = steps.split_first() else {
            results.push(route.clone());
            return match max_results {
                Some(max) if results.len() >= max => WalkControl::Stop,
                _ => WalkControl::Continue,
            };
        };

        if let Some(term) = self.term_rules.iter().find_map(|rule| rule.compile(step)) {
            return walk_descendants(route, term.vertices, &mut |candidate| {
                if !term.matches(candidate) {
                    return WalkControl::Continue;
                }
                match self.extend_into(candidate, rest, results, max_results) {
                    WalkControl::Stop => WalkControl::Stop,
                    _ if term.shallow => WalkControl::SkipChildren,
                    _ => WalkControl::Continue,
                }
            });
        }

        match step.as_key().and_then(|key| route.child(key)) {
            Some(child) => self.extend_into(&child, rest, results, max_results),
            None => WalkControl::Continue,
        }
    }
}

impl Default for SearchPathResolver {
    fn default() -> Self {
        SearchPathResolver::identified(DEFAULT_NAME_ATTRIBUTE)
    }
}
