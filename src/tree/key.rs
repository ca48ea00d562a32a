//! Structural Keys
//!
//! A key is one hop in a route: an array position or an object property.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One raw step from a value to one of its members
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Array position
    Index(usize),
    /// Object property
    Name(String),
}

/// Owned sequence of keys from a root value
pub type KeyPath = Vec<Key>;

impl Key {
    /// Look up the member this key addresses.
    ///
    /// Indices also address objects through their decimal form, and names
    /// address arrays when they parse as an index.
    pub fn get<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match (value, self) {
            (Value::Array(items), Key::Index(index)) => items.get(*index),
            (Value::Array(items), Key::Name(name)) => {
                name.parse::<usize>().ok().and_then(|index| items.get(index))
            }
            (Value::Object(map), Key::Name(name)) => map.get(name),
            (Value::Object(map), Key::Index(index)) => map.get(&index.to_string()),
            _ => None,
        }
    }

    /// Check whether this is the named property `name`
    pub fn is_name(&self, name: &str) -> bool {
        matches!(self, Key::Name(own) if own == name)
    }

    /// JSON form of the key
    pub fn to_value(&self) -> Value {
        match self {
            Key::Index(index) => Value::from(*index),
            Key::Name(name) => Value::String(name.clone()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{}", index),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}
