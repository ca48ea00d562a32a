//! Template Evaluation Context
//!
//! Named variables visible to a template. Base values are borrowed, per-call
//! locals may be borrowed or owned, so seeding a context for every visited
//! node does not copy the document.

use crate::tree::Key;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;

/// Variables available while resolving a template
#[derive(Debug, Clone, Default)]
pub struct TemplateContext<'a> {
    values: HashMap<String, Cow<'a, Value>>,
}

impl<'a> TemplateContext<'a> {
    pub fn new() -> Self {
        TemplateContext {
            values: HashMap::new(),
        }
    }

    /// Context whose variables are the entries of `base`
    pub fn with_base(base: &'a Map<String, Value>) -> Self {
        TemplateContext {
            values: base
                .iter()
                .map(|(name, value)| (name.clone(), Cow::Borrowed(value)))
                .collect(),
        }
    }

    /// Set or replace a variable
    pub fn set_local(&mut self, name: impl Into<String>, value: Cow<'a, Value>) {
        self.values.insert(name.into(), value);
    }

    /// Variable by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).map(|value| value.as_ref())
    }

    /// Follow `[variable, key, key...]`.
    ///
    /// Strings are property names and non-negative integers are indices.
    pub fn lookup(&self, path: &[Value]) -> Option<&Value> {
        let (head, rest) = path.split_first()?;
        let mut current = self.get(head.as_str()?)?;
        for step in rest {
            let key = match step {
                Value::String(name) => Key::Name(name.clone()),
                Value::Number(number) => Key::Index(usize::try_from(number.as_u64()?).ok()?),
                _ => return None,
            };
            current = key.get(current)?;
        }
        Some(current)
    }
}
