//! The materialized routine: a block tree rebuilt from indented lines.

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::{ensure_sufficient_stack, Expr, Line, Name, Stmt};

/// A sequence of nodes executed in order.
pub type Block = Vec<Node>;

/// One `if`/`elif` arm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub cond: Expr,
    pub body: Block,
}

/// An executable node of the rendering routine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Bind(Name),
    InitOutput,
    Append(Expr),
    Extend(Vec<Expr>),
    /// `if` followed by any `elif` arms, in source order, and an optional `else`.
    If {
        branches: Vec<Branch>,
        otherwise: Option<Block>,
    },
    For {
        var: Name,
        iter: Expr,
        body: Block,
    },
    Return,
}

/// A finished rendering routine, ready for the evaluator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub body: Block,
}

impl Program {
    /// Rebuild nesting from a flat list of indented lines.
    ///
    /// # Panics
    ///
    /// Panics on line sequences the builder never produces: an indented line
    /// without a header, or `elif`/`else` without a preceding `if`.
    pub fn from_lines(lines: Vec<Line>) -> Program {
        let mut lines = lines.into_iter().peekable();
        let body = parse_block(&mut lines, 0);
        assert!(lines.peek().is_none(), "lines left after top-level block");
        Program { body }
    }

    /// Names bound from the context, in binding order.
    pub fn bound_names(&self) -> impl Iterator<Item = &Name> {
        self.body.iter().filter_map(|node| match node {
            Node::Bind(name) => Some(name),
            _ => None,
        })
    }
}

fn parse_block(lines: &mut Peekable<IntoIter<Line>>, indent: usize) -> Block {
    let mut block = Block::new();
    while let Some(line) = lines.next_if(|line| line.indent >= indent) {
        assert_eq!(
            line.indent, indent,
            "line `{}` indented without a header",
            line.stmt
        );
        let node = match line.stmt {
            Stmt::Bind(name) => Node::Bind(name),
            Stmt::InitOutput => Node::InitOutput,
            Stmt::Append(expr) => Node::Append(expr),
            Stmt::Extend(exprs) => Node::Extend(exprs),
            Stmt::Return => Node::Return,
            Stmt::For { var, iter } => Node::For {
                var,
                iter,
                body: nested_block(lines, indent + 1),
            },
            Stmt::If(cond) => ensure_sufficient_stack(|| parse_if(lines, indent, cond)),
            Stmt::Elif(_) | Stmt::Else => panic!("`{}` without a preceding if", line.stmt),
        };
        block.push(node);
    }
    block
}

fn nested_block(lines: &mut Peekable<IntoIter<Line>>, indent: usize) -> Block {
    ensure_sufficient_stack(|| parse_block(lines, indent))
}

fn parse_if(lines: &mut Peekable<IntoIter<Line>>, indent: usize, cond: Expr) -> Node {
    let mut branches = vec![Branch {
        cond,
        body: nested_block(lines, indent + 1),
    }];
    let mut otherwise = None;
    while let Some(line) = lines.next_if(|line| {
        line.indent == indent && matches!(line.stmt, Stmt::Elif(_) | Stmt::Else)
    }) {
        match line.stmt {
            Stmt::Elif(cond) => branches.push(Branch {
                cond,
                body: nested_block(lines, indent + 1),
            }),
            _ => {
                otherwise = Some(nested_block(lines, indent + 1));
                break;
            }
        }
    }
    Node::If {
        branches,
        otherwise,
    }
}

/// Nested blocks are dropped from a work list, not recursively.
impl Drop for Program {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.body);
        while let Some(node) = pending.pop() {
            match node {
                Node::If {
                    branches,
                    otherwise,
                } => {
                    for branch in branches {
                        pending.extend(branch.body);
                    }
                    pending.extend(otherwise.into_iter().flatten());
                }
                Node::For { body, .. } => pending.extend(body),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests;
