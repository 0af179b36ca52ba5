//! Template syntax errors.
//!
//! Every malformed-template condition is reported as one error type
//! carrying a kind, the offending fragment, and where it was found.
//! Construction stops at the first error; nothing partially compiled
//! escapes.

use litemp_ir::Span;

/// What was wrong with the template.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum SyntaxErrorKind {
    /// `if` without exactly one condition word.
    #[error("don't understand if")]
    MalformedIf,
    /// `elif` without exactly one condition word.
    #[error("don't understand elif")]
    MalformedElif,
    /// `else` with trailing words.
    #[error("don't understand else")]
    MalformedElse,
    /// `for` not shaped `for <name> in <expr>`.
    #[error("don't understand for")]
    MalformedFor,
    /// `end*` with trailing words.
    #[error("don't understand end")]
    MalformedEnd,
    /// `{% %}` with nothing inside.
    #[error("empty tag")]
    EmptyTag,
    #[error("unrecognized tag")]
    UnknownTag,
    /// Variable, filter or loop name outside `[_a-zA-Z][_a-zA-Z0-9]*`.
    #[error("not a valid name")]
    InvalidName,
    /// Dotted segment that is neither an identifier nor an index.
    #[error("not a valid member")]
    InvalidMember,
    /// `end*` with no open block.
    #[error("too many ends")]
    TooManyEnds,
    /// `end*` naming a different block than the innermost open one.
    #[error("mismatched end tag")]
    MismatchedEnd,
    /// `elif`/`else` while the innermost open block is not an `if`.
    #[error("branch outside if")]
    BranchOutsideIf,
    /// `elif`/`else` after the `else` of the same `if`.
    #[error("branch after else")]
    BranchAfterElse,
    /// Block still open at the end of the template.
    #[error("unclosed block")]
    UnclosedBlock,
}

/// A malformed template, reported at construction time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {fragment:?}")]
pub struct TemplateSyntaxError {
    pub kind: SyntaxErrorKind,
    /// The offending text: a whole tag, a name, or a block keyword.
    pub fragment: String,
    /// Location of the token the error was found in.
    pub span: Span,
}

impl TemplateSyntaxError {
    pub fn new(kind: SyntaxErrorKind, fragment: impl Into<String>, span: Span) -> Self {
        TemplateSyntaxError {
            kind,
            fragment: fragment.into(),
            span,
        }
    }

    /// Human-readable message without the fragment.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Result of a compilation step.
pub type ParseResult<T> = Result<T, TemplateSyntaxError>;
