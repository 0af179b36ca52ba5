//! Expressions and statement lines of the generated rendering routine.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::Name;

/// Segments of a dotted access chain after the base (`b`, `c` in `a.b.c`).
///
/// Segments are identifiers or decimal indices; they are resolved at render
/// time and never registered as variables.
pub type MemberPath = SmallVec<[Arc<str>; 2]>;

/// A compiled template expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Literal template text, emitted verbatim.
    Literal(Arc<str>),
    /// Reference to a name bound in the current render scope.
    Var(Name),
    /// Dotted access: `base.seg1.seg2...`, resolved segment by segment.
    Member { base: Box<Expr>, path: MemberPath },
    /// Filter application `filter(arg)`.
    Filter { filter: Name, arg: Box<Expr> },
    /// Coerce the inner value to text.
    ToText(Box<Expr>),
}

impl Expr {
    pub fn var(name: Name) -> Self {
        Expr::Var(name)
    }

    pub fn literal(text: &str) -> Self {
        Expr::Literal(Arc::from(text))
    }

    #[must_use]
    pub fn member(self, path: MemberPath) -> Self {
        Expr::Member {
            base: Box::new(self),
            path,
        }
    }

    #[must_use]
    pub fn filtered(self, filter: Name) -> Self {
        Expr::Filter {
            filter,
            arg: Box::new(self),
        }
    }

    #[must_use]
    pub fn to_text(self) -> Self {
        Expr::ToText(Box::new(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(text) => write!(f, "{text:?}"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Member { base, path } => {
                write!(f, "resolve({base}")?;
                for segment in path {
                    write!(f, ", {segment:?}")?;
                }
                write!(f, ")")
            }
            Expr::Filter { filter, arg } => write!(f, "{filter}({arg})"),
            Expr::ToText(inner) => write!(f, "to_text({inner})"),
        }
    }
}

/// One line of the generated routine.
///
/// Header statements (`If`, `Elif`, `Else`, `For`) own the lines that follow
/// them at one deeper indentation level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// Bind a local name to `context[name]`.
    Bind(Name),
    /// Initialize the output accumulator.
    InitOutput,
    /// Push one value onto the output accumulator.
    Append(Expr),
    /// Push several values onto the output accumulator in order.
    Extend(Vec<Expr>),
    If(Expr),
    Elif(Expr),
    Else,
    /// Bind `var` to each element of `iter` in turn.
    For { var: Name, iter: Expr },
    /// Join the accumulator and return it.
    Return,
}

impl Stmt {
    /// Whether the lines following this one are its body.
    pub fn opens_block(&self) -> bool {
        matches!(
            self,
            Stmt::If(_) | Stmt::Elif(_) | Stmt::Else | Stmt::For { .. }
        )
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Bind(name) => write!(f, "bind {name} <- context[{:?}]", name.as_str()),
            Stmt::InitOutput => write!(f, "init result"),
            Stmt::Append(expr) => write!(f, "append {expr}"),
            Stmt::Extend(exprs) => {
                write!(f, "extend [")?;
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{expr}")?;
                }
                write!(f, "]")
            }
            Stmt::If(cond) => write!(f, "if {cond}"),
            Stmt::Elif(cond) => write!(f, "elif {cond}"),
            Stmt::Else => write!(f, "else"),
            Stmt::For { var, iter } => write!(f, "for {var} in {iter}"),
            Stmt::Return => write!(f, "return join(result)"),
        }
    }
}
