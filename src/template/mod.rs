//! Keyed Value Templates
//!
//! A minimal evaluator for declarative value templates. A template is any
//! JSON value; objects carrying the directives key (`$use`) are evaluated
//! by the named directive, arrays and plain objects are evaluated member by
//! member, and everything else is a literal.
//!
//! Supported directives:
//! - `getVar` `{path: [name, key...]}`: read a context variable
//! - `value` `{value: x}`: literal, not evaluated
//! - `==`, `!=` `{args: [a, b]}`: structural equality
//! - `!` / `not` `{args: [a]}`: negated truthiness
//! - `&&` / `and`, `||` / `or` `{args: [...]}`: boolean folds

pub mod context;

pub use context::TemplateContext;

use serde_json::{Map, Value};

/// Property naming the directive of a template object
pub const DIRECTIVES_KEY: &str = "$use";

/// Evaluates templates against a context
pub trait TemplateResolver: Send + Sync {
    /// Property that marks an object as a directive call
    fn directives_key(&self) -> &str {
        DIRECTIVES_KEY
    }

    /// Evaluate `template` against `context`
    fn resolve_value(&self, template: &Value, context: &TemplateContext<'_>) -> Value;
}

/// Built-in resolver for the directive set listed in the module docs
#[derive(Debug, Clone, Default)]
pub struct KeyedTemplateResolver;

impl KeyedTemplateResolver {
    pub fn new() -> Self {
        KeyedTemplateResolver
    }

    fn call(&self, directive: &str, call: &Map<String, Value>, context: &TemplateContext<'_>) -> Value {
        match directive {
            "getVar" => {
                let path = call.get("path").and_then(Value::as_array);
                path.and_then(|path| context.lookup(path))
                    .cloned()
                    .unwrap_or(Value::Null)
            }
            "value" => call.get("value").cloned().unwrap_or(Value::Null),
            "==" | "!=" => {
                let args = self.resolve_args(call, context);
                let equal = args.first() == args.get(1);
                Value::Bool(equal == (directive == "=="))
            }
            "!" | "not" => {
                let args = self.resolve_args(call, context);
                Value::Bool(!args.first().is_some_and(is_truthy))
            }
            "&&" | "and" => {
                let args = self.resolve_args(call, context);
                Value::Bool(args.iter().all(is_truthy))
            }
            "||" | "or" => {
                let args = self.resolve_args(call, context);
                Value::Bool(args.iter().any(is_truthy))
            }
            _ => {
                tracing::trace!(directive, "unknown template directive");
                Value::Null
            }
        }
    }

    fn resolve_args(&self, call: &Map<String, Value>, context: &TemplateContext<'_>) -> Vec<Value> {
        match call.get("args") {
            Some(Value::Array(args)) => args
                .iter()
                .map(|arg| self.resolve_value(arg, context))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl TemplateResolver for KeyedTemplateResolver {
    fn resolve_value(&self, template: &Value, context: &TemplateContext<'_>) -> Value {
        match template {
            Value::Object(map) => match map.get(DIRECTIVES_KEY) {
                Some(Value::String(directive)) => self.call(directive, map, context),
                _ => Value::Object(
                    map.iter()
                        .map(|(key, value)| (key.clone(), self.resolve_value(value, context)))
                        .collect(),
                ),
            },
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.resolve_value(item, context))
                    .collect(),
            ),
            literal => literal.clone(),
        }
    }
}

/// Truthiness in the usual scripting sense
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
