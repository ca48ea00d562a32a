//! Validated Page Documents
//!
//! `ValidatedDocument` wraps a page document with a lazily built identity
//! index. Lookups consult the index first and fall back to walking the
//! pages, so results stay correct for ambiguous ids and names.
//!
//! The index is built on first use and kept until the document or its
//! validator is replaced, or `refresh_validation` is called.

use crate::address::RouteTextCodec;
use crate::config::SearchOptions;
use crate::error::Result;
use crate::index::{LocalNameValidator, Validation};
use crate::search::{resolve_all, SearchPathResolver, SearchResponse, SearchStep, ValidatedSearchResolver};
use crate::tree::Route;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// A titled tree of pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Top-level pages; each may nest `children` pages and `content`
    #[serde(default = "empty_pages")]
    pub pages: Value,
    /// Any other document fields, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn empty_pages() -> Value {
    Value::Array(Vec::new())
}

impl PageDocument {
    /// Untitled document holding `pages`
    pub fn new(pages: Value) -> Self {
        PageDocument {
            id: None,
            title: None,
            pages,
            extra: Map::new(),
        }
    }

    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Default for PageDocument {
    fn default() -> Self {
        PageDocument::new(empty_pages())
    }
}

/// A page document with a cached identity index
pub struct ValidatedDocument {
    source: PageDocument,
    validator: LocalNameValidator,
    resolver: ValidatedSearchResolver,
    templates: SearchPathResolver,
    routes: RouteTextCodec,
    validation: OnceLock<Validation>,
}

impl ValidatedDocument {
    pub fn new(source: PageDocument) -> Self {
        ValidatedDocument {
            source,
            validator: LocalNameValidator::default(),
            resolver: ValidatedSearchResolver::default(),
            templates: SearchPathResolver::templated(),
            routes: RouteTextCodec::new(),
            validation: OnceLock::new(),
        }
    }

    /// Document whose validator and address text follow `options`
    pub fn with_options(source: PageDocument, options: &SearchOptions) -> Result<Self> {
        let validator = LocalNameValidator::from_options(options);
        Ok(ValidatedDocument {
            source,
            resolver: ValidatedSearchResolver::new(validator.name_attribute()),
            validator,
            templates: SearchPathResolver::templated(),
            routes: RouteTextCodec::from_options(options)?,
            validation: OnceLock::new(),
        })
    }

    pub fn source(&self) -> &PageDocument {
        &self.source
    }

    /// Replace the document, dropping the cached index
    pub fn set_source(&mut self, source: PageDocument) {
        self.source = source;
        self.invalidate();
    }

    pub fn validator(&self) -> &LocalNameValidator {
        &self.validator
    }

    /// Replace the validator, dropping the cached index and switching every
    /// resolver to the validator's name attribute
    pub fn set_validator(&mut self, validator: LocalNameValidator) {
        self.resolver = ValidatedSearchResolver::new(validator.name_attribute());
        self.routes.set_name_attribute(validator.name_attribute());
        self.validator = validator;
        self.invalidate();
    }

    pub fn resolver(&self) -> &ValidatedSearchResolver {
        &self.resolver
    }

    /// Index of the current pages, built on first use
    pub fn validation(&self) -> &Validation {
        self.validation
            .get_or_init(|| self.validator.validate(&self.source.pages))
    }

    /// Rebuild the index now
    pub fn refresh_validation(&mut self) {
        let validation = self.validator.validate(&self.source.pages);
        self.validation = OnceLock::from(validation);
    }

    /// Target of `path` if exactly one value matches
    pub fn get_content_at(&self, path: &[SearchStep]) -> Option<&Value> {
        let search = self.find_content(path, Some(2));
        match search.results.as_slice() {
            [only] => Some(only.target),
            _ => None,
        }
    }

    /// Every route matching `path`, up to `max_results`
    pub fn find_content(&self, path: &[SearchStep], max_results: Option<usize>) -> SearchResponse<'_> {
        self.resolver
            .resolve(self.validation(), &self.source.pages, path, max_results)
    }

    /// Resolve a batch of addresses, keeping their order
    pub fn find_all<S>(&self, searches: &[S], max_results: Option<usize>) -> Vec<SearchResponse<'_>>
    where
        S: AsRef<[SearchStep]> + Sync,
    {
        resolve_all(
            &self.resolver,
            self.validation(),
            &self.source.pages,
            searches,
            max_results,
        )
    }

    /// Values matching template steps, e.g. `{"$use": "==", ...}`
    pub fn query(&self, steps: &[SearchStep], max_results: Option<usize>) -> SearchResponse<'_> {
        self.templates.resolve(&self.source.pages, steps, max_results)
    }

    /// Target of an address given as text, if exactly one value matches
    pub fn content_at_text(&self, text: &str) -> Result<Option<&Value>> {
        let steps = self.routes.steps_for(text)?;
        Ok(self.get_content_at(&steps))
    }

    /// Address text for a route into the pages
    pub fn route_text(&self, route: &Route<'_>) -> String {
        self.routes.stringify(route)
    }

    fn invalidate(&mut self) {
        if self.validation.take().is_some() {
            tracing::debug!("dropped cached validation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::AmbiguousSearch;
    use crate::tree::{walk_descendants, Key, VertexPolicy, WalkControl};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn steps(value: Value) -> Vec<SearchStep> {
        serde_json::from_value(value).unwrap()
    }

    fn sample_document() -> PageDocument {
        PageDocument::new(json!([
            {
                "id": "a",
                "content": [],
                "children": [{
                    "id": "a1",
                    "content": [{
                        "tag": "p",
                        "attributes": { "id": "a1-term" },
                        "content": [{
                            "tag": "span",
                            "attributes": { "data-local-name": "label" },
                            "content": ["apple"]
                        }]
                    }]
                }]
            },
            {
                "id": "b",
                "content": [],
                "children": [{ "localName": "intro", "content": [] }]
            },
            {
                "localName": "noId",
                "content": [{
                    "tag": "p",
                    "attributes": { "data-local-name": "first" },
                    "content": ["blank"]
                }]
            }
        ]))
    }

    #[test]
    fn test_intro_content() {
        let doc = ValidatedDocument::new(PageDocument::new(json!([{ "id": "intro", "content": ["Hi there!"] }])));
        let search = doc.find_content(&steps(json!([{ "id": "intro" }, "content"])), None);
        assert_eq!(search.len(), 1);
        assert_eq!(search.results[0].target, &json!(["Hi there!"]));
    }

    #[test]
    fn test_duplicate_ids() {
        let doc = ValidatedDocument::new(PageDocument::new(json!([
            { "id": "duo", "content": ["first"] },
            { "id": "duo", "content": ["second"] }
        ])));
        assert_eq!(
            doc.validation().duplicates,
            vec![AmbiguousSearch {
                search: vec![SearchStep::id("duo")],
                results: vec![vec![Key::Index(0)], vec![Key::Index(1)]],
            }]
        );
        let search = doc.find_content(&[SearchStep::id("duo")], None);
        assert_eq!(search.len(), 2);
        assert_eq!(doc.get_content_at(&[SearchStep::id("duo")]), None);
    }

    #[test]
    fn test_named_lookups() {
        let doc = ValidatedDocument::new(sample_document());
        let label = doc.get_content_at(&steps(json!([{ "id": "a1-term" }, { "localName": "label" }])));
        assert_eq!(label.and_then(|node| node.get("content")), Some(&json!(["apple"])));
        assert_eq!(
            doc.get_content_at(&steps(json!([{ "id": "a1-term" }, { "localName": "label" }, "content", 0]))),
            Some(&json!("apple"))
        );
        assert_eq!(
            doc.get_content_at(&steps(json!([{ "localName": "noId" }, { "localName": "first" }, "content", 0]))),
            Some(&json!("blank"))
        );
        let intro = steps(json!([{ "id": "b" }, { "localName": "intro" }]));
        let named = doc.resolver().find_named_node(doc.validation(), &intro);
        assert_eq!(
            named.node.map(|node| node.route.clone()),
            Some(vec![Key::Index(1), Key::from("children"), Key::Index(0)])
        );
    }

    #[test]
    fn test_set_source_drops_index() {
        let mut doc = ValidatedDocument::new(sample_document());
        assert!(doc.validation().id_values.contains_key("a"));
        doc.set_source(PageDocument::new(json!([{ "id": "z", "content": ["zed"] }])));
        assert!(!doc.validation().id_values.contains_key("a"));
        assert_eq!(
            doc.get_content_at(&steps(json!([{ "id": "z" }, "content", 0]))),
            Some(&json!("zed"))
        );
    }

    #[test]
    fn test_set_validator_switches_name_attribute() {
        let mut doc = ValidatedDocument::new(PageDocument::new(json!([{
            "id": "page",
            "content": [{ "tag": "p", "attributes": { "data-name": "lead" }, "content": ["x"] }]
        }])));
        assert!(doc.content_at_text("page/lead//0").unwrap().is_none());
        doc.set_validator(LocalNameValidator::new("data-name"));
        assert_eq!(doc.validator().name_attribute(), "data-name");
        assert_eq!(doc.content_at_text("page/lead//0").unwrap(), Some(&json!("x")));
    }

    #[test]
    fn test_refresh_validation_matches_lazy_build() {
        let mut doc = ValidatedDocument::new(sample_document());
        let lazy = doc.validation().clone();
        doc.refresh_validation();
        assert_eq!(doc.validation(), &lazy);
    }

    #[test]
    fn test_text_addresses_round_trip() {
        let doc = ValidatedDocument::new(sample_document());
        let pages = &doc.source().pages;
        let mut checked = 0;
        walk_descendants(&Route::root(pages), VertexPolicy::ContentNodes, &mut |route| {
            // a trailing axis key has no text form of its own
            if !matches!(route.path.last(), Some(Key::Index(_))) {
                return WalkControl::Continue;
            }
            let text = doc.route_text(route);
            assert_eq!(doc.content_at_text(&text).unwrap(), Some(route.target), "address {}", text);
            checked += 1;
            WalkControl::Continue
        });
        assert_eq!(checked, 10);
    }

    #[test]
    fn test_float_id_addressed_as_integer() {
        let doc = ValidatedDocument::new(PageDocument::new(json!([{ "id": 1.0, "content": ["one"] }])));
        assert!(doc.validation().id_values.contains_key("1"));
        assert_eq!(doc.content_at_text("1///0").unwrap(), Some(&json!("one")));
        let route = Route::follow(&doc.source().pages, &[Key::Index(0), Key::from("content"), Key::Index(0)]).unwrap();
        assert_eq!(doc.route_text(&route), "1///0");
    }

    #[test]
    fn test_malformed_text() {
        let doc = ValidatedDocument::new(sample_document());
        assert!(doc.content_at_text("a//one").is_err());
    }

    #[test]
    fn test_query_by_template() {
        let doc = ValidatedDocument::new(sample_document());
        let search = doc.query(
            &steps(json!([{
                "$use": "==",
                "args": [{ "$use": "getVar", "path": ["value", "tag"] }, "p"]
            }])),
            None,
        );
        let ids: Vec<Option<&Value>> = search
            .targets()
            .into_iter()
            .map(|node| node.pointer("/attributes/id"))
            .collect();
        assert_eq!(ids, vec![Some(&json!("a1-term")), None]);
    }

    #[test]
    fn test_find_all() {
        let doc = ValidatedDocument::new(sample_document());
        let searches = vec![steps(json!([{ "id": "b" }])), steps(json!([{ "id": "a" }, "children", 0]))];
        let responses = doc.find_all(&searches, None);
        assert_eq!(responses[0].targets(), vec![&doc.source().pages[1]]);
        assert_eq!(responses[1].targets(), vec![&doc.source().pages[0]["children"][0]]);
    }

    #[test]
    fn test_with_options() {
        let options = SearchOptions::from_json(r#"{ "nameAttribute": "data-name", "nameDelimiter": "," }"#).unwrap();
        let doc = ValidatedDocument::with_options(
            PageDocument::new(json!([{
                "id": "page",
                "content": [{
                    "tag": "p",
                    "attributes": { "data-name": "lead" },
                    "content": [{ "tag": "b", "attributes": { "data-name": "bold" }, "content": ["x"] }]
                }]
            }])),
            &options,
        )
        .unwrap();
        assert_eq!(doc.content_at_text("page/lead,bold//0").unwrap(), Some(&json!("x")));
    }

    #[test]
    fn test_page_document_json() {
        let source = PageDocument::from_json(r#"{ "title": "Site", "style": { "p": {} }, "pages": [] }"#).unwrap();
        assert_eq!(source.title.as_deref(), Some("Site"));
        assert!(source.extra.contains_key("style"));
        assert_eq!(
            serde_json::to_value(&source).unwrap(),
            json!({ "title": "Site", "pages": [], "style": { "p": {} } })
        );
        assert_eq!(PageDocument::from_json("{}").unwrap(), PageDocument::default());
    }
}
