//! Validated identifiers.
//!
//! A `Name` is only constructed from text that matches the identifier
//! grammar `[_a-zA-Z][_a-zA-Z0-9]*`. Clones share one allocation, so names
//! can be copied freely into the IR and across render threads.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A template identifier: variable, filter, or loop variable name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    /// Create a name, returning `None` if `text` is not an identifier.
    pub fn new(text: &str) -> Option<Self> {
        is_identifier(text).then(|| Name(Arc::from(text)))
    }

    /// The identifier text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check `text` against `[_a-zA-Z][_a-zA-Z0-9]*`.
pub fn is_identifier(text: &str) -> bool {
    let mut bytes = text.bytes();
    match bytes.next() {
        Some(first) if first == b'_' || first.is_ascii_alphabetic() => {
            bytes.all(|b| b == b'_' || b.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// Check whether `text` is a non-negative decimal index (`0`, `12`, ...).
pub fn is_index(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
