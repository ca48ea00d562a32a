//! Depth-First Walker
//!
//! Pre-order traversal over JSON values. A vertex policy decides which
//! members of a value are descended into:
//! - `AllValues`: every array item and every object property
//! - `ContentNodes`: every array item, plus only the `content` and
//!   `children` properties of objects

use super::key::Key;
use super::route::Route;
use serde_json::Value;

/// Object properties that hold nested content
pub const CONTENT_KEYS: [&str; 2] = ["content", "children"];

/// Which members of a value count as traversable vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexPolicy {
    #[default]
    AllValues,
    ContentNodes,
}

/// Visitor verdict for the value just visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Descend into the value's members
    Continue,
    /// Move on without descending
    SkipChildren,
    /// End the walk
    Stop,
}

impl VertexPolicy {
    /// Members of `value` to visit, in document order
    pub fn children_vec<'a>(self, value: &'a Value) -> Vec<(Key, &'a Value)> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| (Key::Index(index), item))
                .collect(),
            Value::Object(map) => match self {
                VertexPolicy::AllValues => map
                    .iter()
                    .map(|(name, item)| (Key::Name(name.clone()), item))
                    .collect(),
                VertexPolicy::ContentNodes => CONTENT_KEYS
                    .iter()
                    .filter_map(|name| map.get(*name).map(|item| (Key::from(*name), item)))
                    .collect(),
            },
            _ => Vec::new(),
        }
    }

    /// Check whether `key` names a member of `parent` that this policy visits
    pub fn admits(self, parent: &Value, key: &Key) -> bool {
        match (parent, key) {
            (Value::Array(items), Key::Index(index)) => *index < items.len(),
            (Value::Object(map), Key::Name(name)) => {
                map.contains_key(name)
                    && (self == VertexPolicy::AllValues || CONTENT_KEYS.contains(&name.as_str()))
            }
            _ => false,
        }
    }
}

/// Visit every descendant of `start.target` in pre-order.
///
/// Routes passed to the visitor are extensions of `start`. Returns `Stop` if
/// the visitor ended the walk early.
pub fn walk_descendants<'a, F>(start: &Route<'a>, policy: VertexPolicy, visit: &mut F) -> WalkControl
where
    F: FnMut(&Route<'a>) -> WalkControl,
{
    let mut route = start.clone();
    walk_members(&mut route, policy, visit)
}

fn walk_members<'a, F>(route: &mut Route<'a>, policy: VertexPolicy, visit: &mut F) -> WalkControl
where
    F: FnMut(&Route<'a>) -> WalkControl,
{
    for (key, member) in policy.children_vec(route.target) {
        route.push(key, member);
        let control = match visit(route) {
            WalkControl::Continue => walk_members(route, policy, visit),
            WalkControl::SkipChildren => WalkControl::Continue,
            WalkControl::Stop => WalkControl::Stop,
        };
        route.pop();
        if control == WalkControl::Stop {
            return WalkControl::Stop;
        }
    }
    WalkControl::Continue
}
