//! Search Term Compiler
//!
//! Compiles address steps into traversal predicates in two stages:
//! `compile(step)` decides whether a rule understands the step, and the
//! returned `SearchTerm` is then checked against each visited route.

use super::step::{SearchStep, Selector};
use crate::template::{is_truthy, KeyedTemplateResolver, TemplateContext, TemplateResolver};
use crate::tree::{NodeShape, Route, VertexPolicy};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// Predicate produced for one step
pub struct SearchTerm<'s> {
    check: Box<dyn Fn(&Route<'_>) -> bool + 's>,
    /// Skip the descendants of a matching node
    pub shallow: bool,
    /// Members walked while looking for matches
    pub vertices: VertexPolicy,
}

impl<'s> SearchTerm<'s> {
    pub fn new<F>(check: F, shallow: bool, vertices: VertexPolicy) -> Self
    where
        F: Fn(&Route<'_>) -> bool + 's,
    {
        SearchTerm {
            check: Box::new(check),
            shallow,
            vertices,
        }
    }

    /// Check the route's target against the term
    #[inline]
    pub fn matches(&self, route: &Route<'_>) -> bool {
        (self.check)(route)
    }
}

/// A rule that may turn a step into a search term
pub trait SearchTermCompiler: Send + Sync {
    /// Returns `None` when the rule does not apply to `step`
    fn compile<'s>(&'s self, step: &'s SearchStep) -> Option<SearchTerm<'s>>;
}

// ============================================================================
// Attribute equality
// ============================================================================

/// Matches nodes whose id or local name equals the selector's value.
///
/// The value is read from the node's attribute map when it has one, else
/// from the same-named direct field of a shorthand content node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValueSearch {
    selector: Selector,
    attribute: String,
    shallow: bool,
}

impl AttributeValueSearch {
    pub fn new(selector: Selector, attribute: impl Into<String>) -> Self {
        AttributeValueSearch {
            selector,
            attribute: attribute.into(),
            shallow: false,
        }
    }

    /// Stop descending below matching nodes
    pub fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }
}

impl SearchTermCompiler for AttributeValueSearch {
    fn compile<'s>(&'s self, step: &'s SearchStep) -> Option<SearchTerm<'s>> {
        let expected = self.selector.value_of(step)?;
        let property = self.selector.property();
        let attribute = self.attribute.as_str();
        Some(SearchTerm::new(
            move |route: &Route<'_>| {
                NodeShape::of(route.target)
                    .and_then(|shape| shape.identity(attribute, property))
                    .is_some_and(|value| value == expected)
            },
            self.shallow,
            VertexPolicy::ContentNodes,
        ))
    }
}

// ============================================================================
// Template expressions
// ============================================================================

/// Matches values for which a template step resolves to something truthy.
///
/// The template sees the configured context plus `state` (`{path, depth}`
/// of the current route) and `value` (the current target).
#[derive(Clone)]
pub struct TemplatedSearch {
    resolver: Arc<dyn TemplateResolver>,
    context: Map<String, Value>,
    shallow: bool,
}

impl TemplatedSearch {
    pub fn new(resolver: Arc<dyn TemplateResolver>, context: Map<String, Value>) -> Self {
        TemplatedSearch {
            resolver,
            context,
            shallow: false,
        }
    }

    /// Stop descending below matching values
    pub fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }
}

impl Default for TemplatedSearch {
    fn default() -> Self {
        TemplatedSearch::new(Arc::new(KeyedTemplateResolver::new()), Map::new())
    }
}

impl SearchTermCompiler for TemplatedSearch {
    fn compile<'s>(&'s self, step: &'s SearchStep) -> Option<SearchTerm<'s>> {
        let SearchStep::Term(term) = step else {
            return None;
        };
        if !term.contains_key(self.resolver.directives_key()) {
            return None;
        }
        let template = Value::Object(term.clone());
        Some(SearchTerm::new(
            move |route: &Route<'_>| {
                let mut context = TemplateContext::with_base(&self.context);
                context.set_local("state", Cow::Owned(route_state(route)));
                context.set_local("value", Cow::Borrowed(route.target));
                is_truthy(&self.resolver.resolve_value(&template, &context))
            },
            self.shallow,
            VertexPolicy::AllValues,
        ))
    }
}

/// JSON snapshot of a route for template contexts
fn route_state(route: &Route<'_>) -> Value {
    let path: Vec<Value> = route.path.iter().map(|key| key.to_value()).collect();
    let mut state = Map::new();
    state.insert("path".to_string(), Value::Array(path));
    state.insert("depth".to_string(), Value::from(route.depth()));
    Value::Object(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Key;
    use serde_json::json;

    #[test]
    fn test_attribute_rule_ignores_other_steps() {
        let rule = AttributeValueSearch::new(Selector::Id, "id");
        assert!(rule.compile(&SearchStep::local_name("x")).is_none());
        assert!(rule.compile(&SearchStep::from(0)).is_none());
        assert!(rule.compile(&SearchStep::id("x")).is_some());
    }

    #[test]
    fn test_attribute_rule_matches_both_shapes() {
        let doc = json!([
            { "id": "x", "content": [] },
            { "tag": "p", "attributes": { "id": "x" } },
            { "tag": "p", "attributes": { "id": "y" } }
        ]);
        let rule = AttributeValueSearch::new(Selector::Id, "id");
        let step = SearchStep::id("x");
        let term = rule.compile(&step).unwrap();
        let hits: Vec<bool> = (0..3)
            .map(|i| term.matches(&Route::follow(&doc, &[Key::Index(i)]).unwrap()))
            .collect();
        assert_eq!(hits, vec![true, true, false]);
        assert_eq!(term.vertices, VertexPolicy::ContentNodes);
    }

    #[test]
    fn test_local_name_uses_configured_attribute() {
        let doc = json!({ "attributes": { "data-local-name": "label" } });
        let rule = AttributeValueSearch::new(Selector::LocalName, "data-local-name").shallow(true);
        let step = SearchStep::local_name("label");
        let term = rule.compile(&step).unwrap();
        assert!(term.shallow);
        assert!(term.matches(&Route::root(&doc)));
    }

    #[test]
    fn test_templated_rule_requires_directive() {
        let rule = TemplatedSearch::default();
        let plain: SearchStep = serde_json::from_value(json!({ "tag": "p" })).unwrap();
        assert!(rule.compile(&plain).is_none());
        assert!(rule.compile(&SearchStep::id("x")).is_none());
    }

    #[test]
    fn test_templated_rule_sees_state_and_context() {
        let mut context = Map::new();
        context.insert("wanted".to_string(), json!(1));
        let rule = TemplatedSearch::new(Arc::new(KeyedTemplateResolver::new()), context);
        let step: SearchStep = serde_json::from_value(json!({
            "$use": "==",
            "args": [
                { "$use": "getVar", "path": ["state", "depth"] },
                { "$use": "getVar", "path": ["wanted"] }
            ]
        }))
        .unwrap();
        let term = rule.compile(&step).unwrap();
        let doc = json!([["a"]]);
        assert!(term.matches(&Route::follow(&doc, &[Key::Index(0)]).unwrap()));
        assert!(!term.matches(&Route::follow(&doc, &[Key::Index(0), Key::Index(0)]).unwrap()));
    }
}
