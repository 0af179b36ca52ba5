//! Expression compiler.
//!
//! Precedence, loosest first: filter pipeline, dotted access, bare name.
//! `a.b|f|g` compiles to `g(f(resolve(a, "b")))`.

use litemp_ir::{is_identifier, is_index, Expr, MemberPath, Span};

use crate::{ParseResult, SyntaxErrorKind, TemplateSyntaxError, VarSets};

/// Compile one template expression, registering every name it references.
///
/// `span` locates the token the expression came from, for errors.
pub fn compile_expr(expr: &str, vars: &mut VarSets, span: Span) -> ParseResult<Expr> {
    if expr.contains('|') {
        let mut pipes = expr.split('|');
        let base = pipes.next().unwrap_or_default();
        let mut code = compile_expr(base, vars, span)?;
        for filter in pipes {
            let filter = vars.reference(filter, span)?;
            code = code.filtered(filter);
        }
        Ok(code)
    } else if expr.contains('.') {
        let mut dots = expr.split('.');
        let base = dots.next().unwrap_or_default();
        let code = compile_expr(base, vars, span)?;
        let path = dots
            .map(|segment| {
                if is_identifier(segment) || is_index(segment) {
                    Ok(segment.into())
                } else {
                    Err(TemplateSyntaxError::new(
                        SyntaxErrorKind::InvalidMember,
                        segment,
                        span,
                    ))
                }
            })
            .collect::<ParseResult<MemberPath>>()?;
        Ok(code.member(path))
    } else {
        Ok(Expr::var(vars.reference(expr, span)?))
    }
}
