//! Capability trait for caller-defined values.

use std::fmt;
use std::sync::Arc;

use super::{Callable, Value};
use crate::errors::RenderResult;

/// A value whose members templates can reach with dotted access.
///
/// `get_attr` is tried first for every segment; `get_item` is the fallback.
/// Returning a zero-argument [`Value::Function`] from either makes the
/// member behave like a method: the resolver invokes it and continues with
/// the result.
///
/// # Implementation
///
/// ```
/// use litemp_eval::{Object, Value};
///
/// #[derive(Debug)]
/// struct User {
///     name: String,
/// }
///
/// impl Object for User {
///     fn type_name(&self) -> &str {
///         "User"
///     }
///
///     fn get_attr(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(Value::from(self.name.as_str())),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Object: fmt::Debug + Send + Sync {
    /// Name used in error messages.
    fn type_name(&self) -> &str;

    /// Attribute-style member lookup.
    fn get_attr(&self, name: &str) -> Option<Value>;

    /// Key- or index-style lookup, tried when `get_attr` finds nothing.
    fn get_item(&self, _key: &str) -> Option<Value> {
        None
    }

    /// Elements for `{% for %}`, or `None` if the object is not iterable.
    fn iterate(&self) -> Option<Vec<Value>> {
        None
    }

    fn is_truthy(&self) -> bool {
        true
    }

    /// Text produced by `{{ object }}`.
    fn to_text(&self) -> String {
        format!("<{}>", self.type_name())
    }
}

/// A structured record: named fields exposed as attributes.
///
/// Fields keep insertion order; a later field with the same name replaces
/// the earlier one.
#[derive(Clone, Debug)]
pub struct Record {
    type_name: Arc<str>,
    fields: Vec<(Arc<str>, Value)>,
}

impl Record {
    pub fn new(type_name: &str) -> Self {
        Record {
            type_name: Arc::from(type_name),
            fields: Vec::new(),
        }
    }

    /// Add a field.
    #[must_use]
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| &**n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((Arc::from(name), value)),
        }
        self
    }

    /// Add a zero-argument method, invoked on access.
    #[must_use]
    pub fn method<F>(self, name: &str, func: F) -> Self
    where
        F: Fn() -> RenderResult<Value> + Send + Sync + 'static,
    {
        let method = Value::Function(Callable::nullary(name, func));
        self.field(name, method)
    }
}

impl Object for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn get_attr(&self, name: &str) -> Option<Value> {
        self.fields
            .iter()
            .find(|(n, _)| &**n == name)
            .map(|(_, value)| value.clone())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::object(record)
    }
}
