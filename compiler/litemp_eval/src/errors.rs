//! Render-time errors.
//!
//! `RenderErrorKind` carries the structured category; factory functions
//! (e.g. `undefined_variable()`) build both the kind and the message.
//! Errors returned by caller-supplied filters and methods travel through
//! the interpreter untouched.

use std::fmt;

/// Typed category of a render failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderErrorKind {
    /// A name bound from the context is missing, or a loop variable was
    /// used outside its block.
    UndefinedVariable { name: String },
    /// A dotted segment is neither an attribute nor a key of the value.
    NoSuchMember { member: String, type_name: String },
    NotCallable { type_name: String },
    NotIterable { type_name: String },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    /// Raised by caller-supplied code.
    Custom { message: String },
}

impl fmt::Display for RenderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::NoSuchMember { member, type_name } => {
                write!(f, "{type_name} value has no member '{member}'")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::NotIterable { type_name } => write!(f, "{type_name} is not iterable"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// A failure while rendering a compiled template.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RenderError {
    pub kind: RenderErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-built errors.
    pub message: String,
}

impl RenderError {
    /// An error raised by caller-supplied code.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        RenderError {
            kind: RenderErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: RenderErrorKind) -> Self {
        let message = kind.to_string();
        RenderError { kind, message }
    }

    /// Whether this is a failed name or member lookup.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self.kind,
            RenderErrorKind::UndefinedVariable { .. } | RenderErrorKind::NoSuchMember { .. }
        )
    }
}

/// Result of a render step.
pub type RenderResult<T> = Result<T, RenderError>;

#[cold]
pub fn undefined_variable(name: &str) -> RenderError {
    RenderError::from_kind(RenderErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn no_such_member(member: &str, type_name: &str) -> RenderError {
    RenderError::from_kind(RenderErrorKind::NoSuchMember {
        member: member.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> RenderError {
    RenderError::from_kind(RenderErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_iterable(type_name: &str) -> RenderError {
    RenderError::from_kind(RenderErrorKind::NotIterable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> RenderError {
    RenderError::from_kind(RenderErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cfg(test)]
mod tests;
