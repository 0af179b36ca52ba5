//! Unified error type for compiling and rendering.

use litemp_eval::RenderError;
use litemp_parse::TemplateSyntaxError;

/// Any failure surfaced by a [`Template`](crate::Template).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The template text is malformed. Raised at construction.
    #[error("template syntax error: {0}")]
    Syntax(#[from] TemplateSyntaxError),
    /// A lookup or caller-supplied function failed. Raised at render time.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

impl Error {
    pub fn as_syntax(&self) -> Option<&TemplateSyntaxError> {
        match self {
            Error::Syntax(err) => Some(err),
            Error::Render(_) => None,
        }
    }

    pub fn as_render(&self) -> Option<&RenderError> {
        match self {
            Error::Render(err) => Some(err),
            Error::Syntax(_) => None,
        }
    }
}
