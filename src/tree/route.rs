//! Traversal Routes
//!
//! A route pairs the keys leading to a value with the values passed on the
//! way. `vertices[0]` is the root and `vertices[i]` is the value reached after
//! `i` keys, so `vertices.len() == path.len()` and the last value reached is
//! `target`.

use super::key::{Key, KeyPath};
use serde_json::Value;

/// Concrete path from a root value to a target value
#[derive(Debug, Clone, PartialEq)]
pub struct Route<'a> {
    /// Keys from the root to the target
    pub path: KeyPath,
    /// Values visited before the target, root first
    pub vertices: Vec<&'a Value>,
    /// Value the route ends at
    pub target: &'a Value,
}

impl<'a> Route<'a> {
    /// Route that ends at the root itself
    pub fn root(value: &'a Value) -> Self {
        Route {
            path: Vec::new(),
            vertices: Vec::new(),
            target: value,
        }
    }

    /// Follow a key path from the root, if every key exists.
    pub fn follow(root: &'a Value, keys: &[Key]) -> Option<Self> {
        let mut route = Route::root(root);
        for key in keys {
            let next = key.get(route.target)?;
            route.push(key.clone(), next);
        }
        Some(route)
    }

    /// Copy of this route extended by one key, if the key exists.
    pub fn child(&self, key: &Key) -> Option<Self> {
        let next = key.get(self.target)?;
        let mut route = self.clone();
        route.push(key.clone(), next);
        Some(route)
    }

    /// Descend into `value`, reached from the current target through `key`.
    pub fn push(&mut self, key: Key, value: &'a Value) {
        self.vertices.push(self.target);
        self.path.push(key);
        self.target = value;
    }

    /// Step back to the previous vertex.
    pub fn pop(&mut self) -> Option<Key> {
        let vertex = self.vertices.pop()?;
        self.target = vertex;
        self.path.pop()
    }

    /// Number of keys in the route
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Value reached after `count` keys.
    pub fn value_at(&self, count: usize) -> Option<&'a Value> {
        if count == self.vertices.len() {
            Some(self.target)
        } else {
            self.vertices.get(count).copied()
        }
    }
}
