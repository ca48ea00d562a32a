//! Search Steps
//!
//! An address is an ordered list of steps. Each step is a raw key, an id
//! selector, a local-name selector, or a free-form term object that a
//! template compiler may understand.

use crate::tree::shape::{identity_text, ID_PROPERTY, LOCAL_NAME_PROPERTY};
use crate::tree::Key;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One step of an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchStep {
    /// Raw structural key
    Key(Key),
    /// `{id: V}`: node whose id equals V
    Id {
        #[serde(deserialize_with = "scalar_text")]
        id: String,
    },
    /// `{localName: V}`: node whose local name equals V
    LocalName {
        #[serde(rename = "localName", deserialize_with = "scalar_text")]
        local_name: String,
    },
    /// Any other object, e.g. a template expression
    Term(Map<String, Value>),
}

/// Identity selector kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    Id,
    LocalName,
}

impl Selector {
    /// Step property this selector reads
    pub fn property(self) -> &'static str {
        match self {
            Selector::Id => ID_PROPERTY,
            Selector::LocalName => LOCAL_NAME_PROPERTY,
        }
    }

    /// Build a step selecting `value`
    pub fn step(self, value: impl Into<String>) -> SearchStep {
        match self {
            Selector::Id => SearchStep::Id { id: value.into() },
            Selector::LocalName => SearchStep::LocalName {
                local_name: value.into(),
            },
        }
    }

    /// Selected value, if `step` is this kind of selector
    pub fn value_of(self, step: &SearchStep) -> Option<&str> {
        match (self, step) {
            (Selector::Id, SearchStep::Id { id }) => Some(id),
            (Selector::LocalName, SearchStep::LocalName { local_name }) => Some(local_name),
            _ => None,
        }
    }
}

impl SearchStep {
    /// `{id: value}`
    pub fn id(value: impl Into<String>) -> Self {
        Selector::Id.step(value)
    }

    /// `{localName: value}`
    pub fn local_name(value: impl Into<String>) -> Self {
        Selector::LocalName.step(value)
    }

    /// Raw key, if this is a key step
    pub fn as_key(&self) -> Option<&Key> {
        match self {
            SearchStep::Key(key) => Some(key),
            _ => None,
        }
    }
}

impl From<Key> for SearchStep {
    fn from(key: Key) -> Self {
        SearchStep::Key(key)
    }
}

impl From<usize> for SearchStep {
    fn from(index: usize) -> Self {
        SearchStep::Key(Key::Index(index))
    }
}

impl From<&str> for SearchStep {
    fn from(name: &str) -> Self {
        SearchStep::Key(Key::from(name))
    }
}

/// Shorthand notation: `#id`, `~localName`, raw keys as-is, terms as JSON
impl fmt::Display for SearchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStep::Key(key) => write!(f, "{}", key),
            SearchStep::Id { id } => write!(f, "#{}", id),
            SearchStep::LocalName { local_name } => write!(f, "~{}", local_name),
            SearchStep::Term(term) => f.write_str(&serde_json::to_string(term).map_err(|_| fmt::Error)?),
        }
    }
}

/// Dot-joined shorthand for a whole address, e.g. `#main.~terms.content.0`
pub fn path_shorthand(steps: &[SearchStep]) -> String {
    steps
        .iter()
        .map(|step| step.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Accept any scalar as selector text
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    identity_text(&value)
        .map(|text| text.into_owned())
        .ok_or_else(|| de::Error::custom("selector value must be a string, number or boolean"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_mixed_steps() {
        let steps: Vec<SearchStep> = serde_json::from_value(json!([
            { "id": "main" },
            { "localName": "terms" },
            "children",
            0,
            { "$use": "==", "args": [1, 1] }
        ]))
        .unwrap();
        assert_eq!(steps[0], SearchStep::id("main"));
        assert_eq!(steps[1], SearchStep::local_name("terms"));
        assert_eq!(steps[2], SearchStep::from("children"));
        assert_eq!(steps[3], SearchStep::from(0));
        assert!(matches!(steps[4], SearchStep::Term(_)));
    }

    #[test]
    fn test_numeric_selector_becomes_text() {
        let step: SearchStep = serde_json::from_value(json!({ "id": 42 })).unwrap();
        assert_eq!(step, SearchStep::id("42"));
    }

    #[test]
    fn test_serialize_matches_address_form() {
        let steps = vec![SearchStep::id("a"), SearchStep::local_name("b"), SearchStep::from(2)];
        assert_eq!(
            serde_json::to_value(&steps).unwrap(),
            json!([{ "id": "a" }, { "localName": "b" }, 2])
        );
    }

    #[test]
    fn test_path_shorthand() {
        let steps: Vec<SearchStep> = serde_json::from_value(json!([
            { "id": "main" },
            { "localName": "terms" },
            "content",
            0,
            { "$use": "value" }
        ]))
        .unwrap();
        assert_eq!(path_shorthand(&steps), r##"#main.~terms.content.0.{"$use":"value"}"##);
        assert_eq!(path_shorthand(&[]), "");
    }

    #[test]
    fn test_selector_accessors() {
        let step = SearchStep::local_name("x");
        assert_eq!(Selector::Id.value_of(&step), None);
        assert_eq!(Selector::LocalName.value_of(&step), Some("x"));
    }
}
