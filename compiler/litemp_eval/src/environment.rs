//! Variable scopes for a single render.
//!
//! The outermost scope holds the names bound from the context at the top
//! of the routine. Each `{% for %}` body pushes a scope for its loop
//! variable and pops it when the loop ends, so a loop variable is not
//! visible after its block.

use rustc_hash::FxHashMap;

use litemp_ir::Name;

use crate::Value;

/// A stack of scopes; lookups search innermost first.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<FxHashMap<Name, Value>>,
}

impl Environment {
    /// An environment with one empty global scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Number of scopes, including the global one.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the innermost scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "pop_scope on the global scope");
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind `name` in the innermost scope, replacing any earlier binding there.
    pub fn define(&mut self, name: Name, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, value);
        }
    }

    pub fn lookup(&self, name: &Name) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn name(s: &str) -> Name {
        Name::new(s).unwrap_or_else(|| panic!("invalid name {s}"))
    }

    #[test]
    fn lookup_in_global_scope() {
        let mut env = Environment::new();
        env.define(name("x"), Value::from(1));
        assert_eq!(env.lookup(&name("x")), Some(&Value::from(1)));
        assert_eq!(env.lookup(&name("y")), None);
    }

    #[test]
    fn inner_scope_shadows_and_pops() {
        let mut env = Environment::new();
        env.define(name("x"), Value::from("outer"));
        env.push_scope();
        env.define(name("x"), Value::from("inner"));
        env.define(name("item"), Value::from(2));
        assert_eq!(env.depth(), 2);
        assert_eq!(env.lookup(&name("x")), Some(&Value::from("inner")));

        env.pop_scope();
        assert_eq!(env.depth(), 1);
        assert_eq!(env.lookup(&name("x")), Some(&Value::from("outer")));
        assert_eq!(env.lookup(&name("item")), None);
    }

    #[test]
    fn redefine_replaces_in_same_scope() {
        let mut env = Environment::new();
        env.push_scope();
        env.define(name("item"), Value::from(1));
        env.define(name("item"), Value::from(2));
        assert_eq!(env.lookup(&name("item")), Some(&Value::from(2)));
    }
}
