//! Name-to-value mappings supplied to a render.

use std::collections::hash_map;

use rustc_hash::FxHashMap;

use crate::Value;

/// Values available to a template by name.
///
/// Merging is last-writer-wins: entries from a later context replace
/// entries of the same name from an earlier one.
#[derive(Clone, Debug, Default)]
pub struct Context {
    vars: FxHashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any earlier value of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Builder form of [`Context::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Copy every entry of `other` into `self`; `other` wins on collision.
    pub fn extend_from(&mut self, other: &Context) {
        self.vars
            .extend(other.vars.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// A new context holding `self` overlaid with `other`.
    #[must_use]
    pub fn merged(&self, other: &Context) -> Context {
        let mut merged = self.clone();
        merged.extend_from(other);
        merged
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.vars.iter()
    }

    /// Build a context from a JSON object. Anything else yields `None`.
    #[cfg(feature = "json")]
    pub fn from_json(json: serde_json::Value) -> Option<Context> {
        match json {
            serde_json::Value::Object(map) => Some(map.into_iter().collect()),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Context::new();
        context.extend(iter);
        context
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Context {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}
