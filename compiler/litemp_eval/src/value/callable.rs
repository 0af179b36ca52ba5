//! Native functions callable from templates.
//!
//! Filters take one argument; methods take none and are invoked
//! automatically when a dotted access lands on them.

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::errors::{wrong_arg_count, RenderResult};

type NativeFn = dyn Fn(&[Value]) -> RenderResult<Value> + Send + Sync;

/// A named native function with a fixed arity.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    arity: usize,
    func: Arc<NativeFn>,
}

impl Callable {
    /// A zero-argument function, auto-invoked by dotted access.
    pub fn nullary<F>(name: &str, func: F) -> Self
    where
        F: Fn() -> RenderResult<Value> + Send + Sync + 'static,
    {
        Callable {
            name: Arc::from(name),
            arity: 0,
            func: Arc::new(move |_: &[Value]| func()),
        }
    }

    /// A one-argument function, usable as a filter.
    pub fn unary<F>(name: &str, func: F) -> Self
    where
        F: Fn(&Value) -> RenderResult<Value> + Send + Sync + 'static,
    {
        Callable {
            name: Arc::from(name),
            arity: 1,
            func: Arc::new(move |args: &[Value]| func(&args[0])),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Whether two handles wrap the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }

    /// Call with `args`, checking the arity first.
    pub fn call(&self, args: &[Value]) -> RenderResult<Value> {
        if args.len() != self.arity {
            return Err(wrong_arg_count(&self.name, self.arity, args.len()));
        }
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}/{}>", self.name, self.arity)
    }
}
