//! Runtime values for the litemp interpreter.
//!
//! # Construction
//!
//! Heap variants are built through factory methods or `From` impls:
//!
//! ```text
//! let s = Value::from("hello");
//! let list = Value::from(vec![1, 2, 3]);
//! let map = Value::map([("b", "ok")]);
//! let upper = Value::filter("upper", |v| Ok(Value::from(v.to_string().to_uppercase())));
//! ```
//!
//! # Thread Safety
//!
//! All heap types use `Arc` internally and caller-supplied objects and
//! functions must be `Send + Sync`, so values can be shared between
//! concurrent renders.

mod callable;
mod heap;
#[cfg(feature = "json")]
mod json;
mod object;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub use callable::Callable;
pub use heap::Heap;
pub use object::{Object, Record};

use crate::errors::{not_callable, not_iterable, RenderResult};

/// Runtime value seen by templates.
#[derive(Clone, Debug)]
pub enum Value {
    /// Absent value; renders as empty text.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    List(Heap<Vec<Value>>),
    /// String-keyed mapping; iterates and renders in key order.
    Map(Heap<BTreeMap<String, Value>>),
    /// Caller-defined value reached through the [`Object`] trait.
    Object(Heap<dyn Object>),
    /// Native function: a filter or an auto-invoked method.
    Function(Callable),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Build a map from key/value pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(Heap::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    pub fn object<T: Object + 'static>(object: T) -> Self {
        let object: Arc<dyn Object> = Arc::new(object);
        Value::Object(Heap::from_arc(object))
    }

    /// A one-argument function for use in filter pipelines.
    pub fn filter<F>(name: &str, func: F) -> Self
    where
        F: Fn(&Value) -> RenderResult<Value> + Send + Sync + 'static,
    {
        Value::Function(Callable::unary(name, func))
    }

    /// A zero-argument function, invoked when reached by dotted access.
    pub fn method<F>(name: &str, func: F) -> Self
    where
        F: Fn() -> RenderResult<Value> + Send + Sync + 'static,
    {
        Value::Function(Callable::nullary(name, func))
    }
}

// Inspection

impl Value {
    /// Type name for error messages.
    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(object) => object.type_name(),
            Value::Function(_) => "function",
        }
    }

    /// Truthiness used by `{% if %}`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Object(object) => object.is_truthy(),
            Value::Function(_) => true,
        }
    }

    /// Whether this value is a function taking no arguments.
    pub fn is_nullary(&self) -> bool {
        matches!(self, Value::Function(f) if f.arity() == 0)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

// Member access and iteration

impl Value {
    /// Attribute-style lookup: object attributes and built-in methods.
    pub fn attr(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(object) => object.get_attr(name),
            Value::Str(s) => str_method(s, name),
            Value::Map(map) => map_method(map, name),
            _ => None,
        }
    }

    /// Key- or index-style lookup.
    pub fn item(&self, key: &str) -> Option<Value> {
        match self {
            Value::Map(map) => map.get(key).cloned(),
            Value::List(items) => key
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index).cloned()),
            Value::Object(object) => object.get_item(key),
            _ => None,
        }
    }

    /// Elements visited by `{% for %}`.
    ///
    /// Lists yield their items, maps their keys, strings their characters.
    pub fn iterate(&self) -> RenderResult<Vec<Value>> {
        match self {
            Value::List(items) => Ok(items.to_vec()),
            Value::Map(map) => Ok(map.keys().map(|k| Value::string(k.as_str())).collect()),
            Value::Str(s) => Ok(s.chars().map(Value::from).collect()),
            Value::Object(object) => object
                .iterate()
                .ok_or_else(|| not_iterable(object.type_name())),
            _ => Err(not_iterable(self.type_name())),
        }
    }

    /// Apply this value as a function to `args`.
    pub fn call(&self, args: &[Value]) -> RenderResult<Value> {
        match self {
            Value::Function(func) => func.call(args),
            _ => Err(not_callable(self.type_name())),
        }
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn strip(s: &str) -> String {
    s.trim().to_string()
}

fn lstrip(s: &str) -> String {
    s.trim_start().to_string()
}

fn rstrip(s: &str) -> String {
    s.trim_end().to_string()
}

/// Built-in zero-argument string methods, bound to `s`.
fn str_method(s: &Heap<String>, name: &str) -> Option<Value> {
    let op: fn(&str) -> String = match name {
        "upper" => str::to_uppercase,
        "lower" => str::to_lowercase,
        "strip" => strip,
        "lstrip" => lstrip,
        "rstrip" => rstrip,
        "title" => title_case,
        "capitalize" => capitalize,
        _ => return None,
    };
    let s = s.clone();
    Some(Value::method(name, move || Ok(Value::string(op(&s)))))
}

/// Built-in zero-argument map methods, bound to `map`.
fn map_method(map: &Heap<BTreeMap<String, Value>>, name: &str) -> Option<Value> {
    let map = map.clone();
    let method = match name {
        "keys" => Value::method(name, move || {
            Ok(map.keys().map(|k| Value::string(k.as_str())).collect())
        }),
        "values" => Value::method(name, move || Ok(map.values().cloned().collect())),
        "items" => Value::method(name, move || {
            Ok(map
                .iter()
                .map(|(k, v)| Value::list(vec![Value::string(k.as_str()), v.clone()]))
                .collect())
        }),
        _ => return None,
    };
    Some(method)
}

/// Text coercion used by `{{ expr }}`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            // keeps the fractional part: 2.0 renders as "2.0", not "2"
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Object(object) => f.write_str(&object.to_text()),
            Value::Function(func) => write!(f, "<function {}>", func.name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            #[expect(clippy::float_cmp, reason = "value equality is exact")]
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::string(c)
    }
}

impl From<Callable> for Value {
    fn from(func: Callable) -> Self {
        Value::Function(func)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(map: BTreeMap<String, V>) -> Self {
        Value::map(map)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::list(iter.into_iter().map(Into::into).collect())
    }
}
