//! litemp IR - Intermediate Representation Types
//!
//! This crate contains the data structures shared by every stage of the
//! template compiler:
//! - Spans for source locations
//! - Names for validated identifiers
//! - `Expr` trees produced by the expression compiler
//! - `Stmt` lines and the `CodeBuilder` that accumulates them
//! - `Program`, the block tree materialized from a finished builder
//!
//! # Design Philosophy
//!
//! The compiler never produces source text for a general-purpose evaluator.
//! Every emitted line is a typed `Stmt`; finishing a `CodeBuilder` rebuilds
//! the nesting from indentation into a `Program` that the evaluator walks
//! directly.

mod code_builder;
mod expr;
mod name;
mod program;
mod span;
mod stack;

pub use code_builder::{CodeBuilder, Line, SectionId, INDENT_STEP};
pub use expr::{Expr, MemberPath, Stmt};
pub use name::{is_identifier, is_index, Name};
pub use program::{Block, Branch, Node, Program};
pub use span::Span;
pub use stack::ensure_sufficient_stack;
