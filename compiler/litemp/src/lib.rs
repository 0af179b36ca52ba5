//! litemp - a small text-template compiler.
//!
//! Templates mix literal text with three kinds of directive:
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `{{ expr }}` | emit `expr` as text |
//! | `{% if expr %}` ... `{% elif expr %}` ... `{% else %}` ... `{% endif %}` | conditional |
//! | `{% for name in expr %}` ... `{% endfor %}` | iteration |
//! | `{# text #}` | comment |
//!
//! where `expr` is `name`, `name.member.member`, or `expr|filter|filter`.
//!
//! A [`Template`] is compiled once and rendered any number of times, from
//! any number of threads:
//!
//! ```
//! use litemp::{Context, Template, Value};
//!
//! let upper = Value::filter("upper", |v| Ok(Value::from(v.to_string().to_uppercase())));
//! let template = Template::new(
//!     "Hello {{name|upper}}!",
//!     [Context::new().with("upper", upper)],
//! )?;
//!
//! let context = Context::new().with("name", "ned");
//! assert_eq!(template.render(Some(&context))?, "Hello NED!");
//! # Ok::<(), litemp::Error>(())
//! ```

mod error;
mod template;

use std::sync::Once;

pub use error::Error;
pub use template::{compile, Template};

pub use litemp_eval::{
    Callable, Context, DotResolver, Object, Record, RenderError, RenderErrorKind, RenderResult,
    Resolve, Value,
};
pub use litemp_ir::{Name, Span};
pub use litemp_parse::{SyntaxErrorKind, TemplateSyntaxError};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set;
/// e.g. `RUST_LOG=litemp_parse=debug` logs each compilation and
/// `RUST_LOG=litemp_eval=trace` logs each render.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
    }
}
