//! Tag parser.
//!
//! Walks the token stream once, buffering output expressions and turning
//! control tags into block headers on the `CodeBuilder`. The ops stack
//! tracks open blocks so every `end*`, `elif` and `else` can be checked
//! against the innermost one.

use std::fmt;

use litemp_ir::{CodeBuilder, Expr, Span, Stmt};
use litemp_lexer::{Lexer, Token, TokenKind};
use tracing::trace;

use crate::{compile_expr, ParseResult, SyntaxErrorKind, TemplateSyntaxError, VarSets};

/// Kind of an open block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    If,
    For,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::If => "if",
            BlockKind::For => "for",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry on the ops stack.
#[derive(Copy, Clone, Debug)]
struct OpenBlock {
    kind: BlockKind,
    /// Set once an `if` has taken its `else`.
    has_else: bool,
    /// The opening tag.
    span: Span,
}

/// Parser state for one template.
pub struct TagParser {
    code: CodeBuilder,
    vars: VarSets,
    ops_stack: Vec<OpenBlock>,
    /// Output expressions not yet emitted.
    buffered: Vec<Expr>,
}

impl TagParser {
    /// Start parsing into `code`, which already holds the routine prologue.
    pub fn new(code: CodeBuilder) -> Self {
        TagParser {
            code,
            vars: VarSets::new(),
            ops_stack: Vec::new(),
            buffered: Vec::new(),
        }
    }

    /// Parse `text` completely, returning the filled builder and the names seen.
    pub fn parse(mut self, text: &str) -> ParseResult<(CodeBuilder, VarSets)> {
        for token in Lexer::new(text) {
            match token.kind {
                TokenKind::Comment => {}
                TokenKind::Expression => {
                    let expr = compile_expr(token.interior(), &mut self.vars, token.span)?;
                    self.buffered.push(expr.to_text());
                }
                TokenKind::Tag => {
                    self.flush_output();
                    self.tag(&token)?;
                }
                TokenKind::Text => {
                    if !token.text.is_empty() {
                        self.buffered.push(Expr::literal(token.text));
                    }
                }
            }
        }

        if let Some(open) = self.ops_stack.last() {
            return Err(TemplateSyntaxError::new(
                SyntaxErrorKind::UnclosedBlock,
                open.kind.as_str(),
                open.span,
            ));
        }
        self.flush_output();
        Ok((self.code, self.vars))
    }

    /// Emit buffered output as one statement.
    fn flush_output(&mut self) {
        let mut exprs = std::mem::take(&mut self.buffered);
        if exprs.len() > 1 {
            self.code.add_line(Stmt::Extend(exprs));
        } else if let Some(expr) = exprs.pop() {
            self.code.add_line(Stmt::Append(expr));
        }
    }

    fn tag(&mut self, token: &Token<'_>) -> ParseResult<()> {
        let words: Vec<&str> = token.interior().split_whitespace().collect();
        let malformed = |kind| TemplateSyntaxError::new(kind, token.text, token.span);

        let Some(&keyword) = words.first() else {
            return Err(malformed(SyntaxErrorKind::EmptyTag));
        };
        trace!(keyword, depth = self.ops_stack.len(), "tag");

        match keyword {
            "if" => {
                if words.len() != 2 {
                    return Err(malformed(SyntaxErrorKind::MalformedIf));
                }
                let cond = compile_expr(words[1], &mut self.vars, token.span)?;
                self.open(BlockKind::If, token.span);
                self.code.add_line(Stmt::If(cond));
                self.code.indent();
            }
            "elif" => {
                if words.len() != 2 {
                    return Err(malformed(SyntaxErrorKind::MalformedElif));
                }
                self.check_branch(token)?;
                let cond = compile_expr(words[1], &mut self.vars, token.span)?;
                self.code.dedent();
                self.code.add_line(Stmt::Elif(cond));
                self.code.indent();
            }
            "else" => {
                if words.len() != 1 {
                    return Err(malformed(SyntaxErrorKind::MalformedElse));
                }
                self.check_branch(token)?;
                if let Some(open) = self.ops_stack.last_mut() {
                    open.has_else = true;
                }
                self.code.dedent();
                self.code.add_line(Stmt::Else);
                self.code.indent();
            }
            "for" => {
                if words.len() != 4 || words[2] != "in" {
                    return Err(malformed(SyntaxErrorKind::MalformedFor));
                }
                let var = self.vars.bind_loop(words[1], token.span)?;
                let iter = compile_expr(words[3], &mut self.vars, token.span)?;
                self.open(BlockKind::For, token.span);
                self.code.add_line(Stmt::For { var, iter });
                self.code.indent();
            }
            _ if keyword.starts_with("end") => {
                if words.len() != 1 {
                    return Err(malformed(SyntaxErrorKind::MalformedEnd));
                }
                let end_what = &keyword[3..];
                let Some(start) = self.ops_stack.pop() else {
                    return Err(malformed(SyntaxErrorKind::TooManyEnds));
                };
                if start.kind.as_str() != end_what {
                    return Err(TemplateSyntaxError::new(
                        SyntaxErrorKind::MismatchedEnd,
                        end_what,
                        token.span,
                    ));
                }
                self.code.dedent();
            }
            _ => {
                return Err(TemplateSyntaxError::new(
                    SyntaxErrorKind::UnknownTag,
                    keyword,
                    token.span,
                ));
            }
        }
        Ok(())
    }

    fn open(&mut self, kind: BlockKind, span: Span) {
        self.ops_stack.push(OpenBlock {
            kind,
            has_else: false,
            span,
        });
    }

    /// `elif`/`else` continue the innermost block only if it is an `if`
    /// still without its `else`.
    fn check_branch(&self, token: &Token<'_>) -> ParseResult<()> {
        match self.ops_stack.last() {
            Some(open) if open.kind == BlockKind::If && open.has_else => Err(
                TemplateSyntaxError::new(SyntaxErrorKind::BranchAfterElse, token.text, token.span),
            ),
            Some(open) if open.kind == BlockKind::If => Ok(()),
            _ => Err(TemplateSyntaxError::new(
                SyntaxErrorKind::BranchOutsideIf,
                token.text,
                token.span,
            )),
        }
    }
}
