//! litemp parse - from template text to a finished `Program`.
//!
//! # Pipeline
//!
//! 1. `litemp_lexer` splits the text into tokens.
//! 2. [`TagParser`] walks the tokens, compiling expressions with
//!    [`compile_expr`] and emitting statements into a `CodeBuilder`.
//! 3. [`compile`] (the driver) hoists one `Bind` per free variable into the
//!    section reserved at the top of the routine and finishes the builder.
//!
//! The generated routine always has the shape:
//!
//! ```text
//! bind <free var> <- context["<free var>"]   (one per free variable)
//! init result
//! <body>
//! return join(result)
//! ```

mod error;
mod expr;
mod parser;
mod vars;

use litemp_ir::{CodeBuilder, Name, Program, Stmt};
use tracing::{debug, trace};

pub use error::{ParseResult, SyntaxErrorKind, TemplateSyntaxError};
pub use expr::compile_expr;
pub use parser::{BlockKind, TagParser};
pub use vars::VarSets;

/// Output of a successful compilation.
#[derive(Clone, Debug)]
pub struct CompiledTemplate {
    program: Program,
    free_vars: Vec<Name>,
    listing: String,
}

impl CompiledTemplate {
    /// The routine, ready for evaluation.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Names the routine binds from the context, in binding order.
    pub fn free_vars(&self) -> &[Name] {
        &self.free_vars
    }

    /// Indented listing of the generated routine.
    pub fn listing(&self) -> &str {
        &self.listing
    }

    pub fn into_program(self) -> Program {
        self.program
    }
}

/// Compile template text into a rendering routine.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn compile(text: &str) -> ParseResult<CompiledTemplate> {
    let mut code = CodeBuilder::new();
    let vars_section = code.add_section();
    code.add_line(Stmt::InitOutput);

    let (mut code, vars) = TagParser::new(code).parse(text)?;

    let free_vars = vars.free_vars();
    let section = code.section_mut(vars_section);
    for name in &free_vars {
        section.add_line(Stmt::Bind(name.clone()));
    }
    code.add_line(Stmt::Return);

    debug!(
        free = free_vars.len(),
        loop_vars = vars.loop_vars().len(),
        lines = code.line_count(),
        "template compiled"
    );
    let listing = code.to_string();
    trace!(%listing, "generated routine");

    Ok(CompiledTemplate {
        program: code.finish(),
        free_vars,
        listing,
    })
}
