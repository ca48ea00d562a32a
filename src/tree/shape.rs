//! Content Node Shapes
//!
//! Content nodes come in two shapes:
//! - attribute-map nodes (`{tag, attributes: {...}, content}`) keep their
//!   identity inside `attributes`
//! - shorthand nodes (`{id, localName, content}`) carry it as direct fields
//!
//! The shape is picked once per value; each shape has its own extractor.

use serde_json::{Map, Number, Value};
use std::borrow::Cow;

/// Attribute holding a node's id
pub const ID_ATTRIBUTE: &str = "id";
/// Direct field holding a shorthand node's id
pub const ID_PROPERTY: &str = "id";
/// Direct field holding a shorthand node's local name
pub const LOCAL_NAME_PROPERTY: &str = "localName";

/// A JSON object recognized as a content node
#[derive(Debug, Clone, Copy)]
pub enum NodeShape<'a> {
    /// Node with an `attributes` object
    Attributed(&'a Map<String, Value>),
    /// Node with a `content` field and no attribute map
    Shorthand(&'a Map<String, Value>),
}

impl<'a> NodeShape<'a> {
    /// Classify a value, returning `None` for anything that is not a node
    pub fn of(value: &'a Value) -> Option<Self> {
        let object = value.as_object()?;
        match object.get("attributes") {
            Some(Value::Object(attributes)) => Some(NodeShape::Attributed(attributes)),
            _ if object.contains_key("content") => Some(NodeShape::Shorthand(object)),
            _ => None,
        }
    }

    /// Raw value of `attribute` (attribute-map nodes) or `property` (shorthand nodes)
    pub fn value_of(&self, attribute: &str, property: &str) -> Option<&'a Value> {
        match self {
            NodeShape::Attributed(attributes) => attributes.get(attribute),
            NodeShape::Shorthand(object) => object.get(property),
        }
    }

    /// Identity text of `attribute` / `property`, if it holds a scalar
    pub fn identity(&self, attribute: &str, property: &str) -> Option<Cow<'a, str>> {
        self.value_of(attribute, property).and_then(identity_text)
    }
}

/// Text form of a scalar identity value.
///
/// Integral floats print without a fraction (`1.0` reads as `1`). Null,
/// arrays and objects never identify a node.
pub fn identity_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number_text(number))),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        _ => None,
    }
}

fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float == 0.0 => "0".to_string(),
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e21 => format!("{:.0}", float),
        _ => number.to_string(),
    }
}

/// Reads ids and local names off content nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityReader {
    /// Attribute consulted for local names on attribute-map nodes
    pub name_attribute: String,
}

impl IdentityReader {
    pub fn new(name_attribute: impl Into<String>) -> Self {
        IdentityReader {
            name_attribute: name_attribute.into(),
        }
    }

    /// Id of a node value, if any
    pub fn id_of<'a>(&self, value: &'a Value) -> Option<Cow<'a, str>> {
        NodeShape::of(value)?.identity(ID_ATTRIBUTE, ID_PROPERTY)
    }

    /// Local name of a node value, if any
    pub fn local_name_of<'a>(&self, value: &'a Value) -> Option<Cow<'a, str>> {
        NodeShape::of(value)?.identity(&self.name_attribute, LOCAL_NAME_PROPERTY)
    }
}

impl Default for IdentityReader {
    fn default() -> Self {
        IdentityReader::new(crate::config::DEFAULT_NAME_ATTRIBUTE)
    }
}
