//! litemp eval - runtime values and the interpreter for compiled templates.
//!
//! # Architecture
//!
//! - [`Value`]: runtime values; heap variants share `Arc` storage.
//! - [`Object`]: trait through which caller-defined values expose members.
//! - [`Context`]: the name-to-value mapping a render reads from.
//! - [`Resolve`] / [`DotResolver`]: dotted member access.
//! - [`Routine`]: runs a `Program` against a context.
//!
//! Every render owns its scopes and output buffer; a `Routine` and the
//! values it reads are `Send + Sync`.

mod context;
mod environment;
mod errors;
mod interpreter;
mod resolve;
mod value;

pub use context::Context;
pub use environment::Environment;
pub use errors::{
    no_such_member, not_callable, not_iterable, undefined_variable, wrong_arg_count, RenderError,
    RenderErrorKind, RenderResult,
};
pub use interpreter::Routine;
pub use resolve::{DotResolver, Resolve};
pub use value::{Callable, Heap, Object, Record, Value};
