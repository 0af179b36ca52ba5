//! Indentation-aware accumulator of generated statements.
//!
//! The builder is append-only. Nesting is expressed the way the finished
//! routine reads: a header statement followed by lines one level deeper.
//! A *section* is a nested builder reserved at a fixed position, so lines
//! only known after parsing (the hoisted variable bindings) still land
//! before the body.

use std::fmt;

use crate::{Program, Stmt};

/// Spaces per indentation level in the textual listing.
pub const INDENT_STEP: usize = 4;

/// Handle to a section created by [`CodeBuilder::add_section`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SectionId(usize);

/// A statement at a fixed indentation level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub indent: usize,
    pub stmt: Stmt,
}

#[derive(Clone, Debug)]
enum CodeNode {
    Line(Line),
    /// Index into `CodeBuilder::sections`.
    Section(usize),
}

/// Builder for the statement lines of one rendering routine.
#[derive(Clone, Debug, Default)]
pub struct CodeBuilder {
    code: Vec<CodeNode>,
    sections: Vec<CodeBuilder>,
    indent_level: usize,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_indent(indent_level: usize) -> Self {
        CodeBuilder {
            indent_level,
            ..Self::default()
        }
    }

    /// Append one statement at the current indentation.
    pub fn add_line(&mut self, stmt: Stmt) {
        self.code.push(CodeNode::Line(Line {
            indent: self.indent_level,
            stmt,
        }));
    }

    /// Reserve a nested builder at the current position and indentation.
    pub fn add_section(&mut self) -> SectionId {
        let id = self.sections.len();
        self.sections.push(CodeBuilder::with_indent(self.indent_level));
        self.code.push(CodeNode::Section(id));
        SectionId(id)
    }

    /// The section previously reserved by `add_section` on this builder.
    pub fn section_mut(&mut self, id: SectionId) -> &mut CodeBuilder {
        &mut self.sections[id.0]
    }

    /// Increase the indentation of subsequently added lines.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease the indentation of subsequently added lines.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent_level > 0, "dedent below level 0");
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Current indentation level.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Number of statement lines, sections included.
    pub fn line_count(&self) -> usize {
        self.code
            .iter()
            .map(|node| match node {
                CodeNode::Line(_) => 1,
                CodeNode::Section(id) => self.sections[*id].line_count(),
            })
            .sum()
    }

    /// Flatten the tree into lines, each section serialized in place.
    pub fn into_lines(self) -> Vec<Line> {
        let mut lines = Vec::with_capacity(self.line_count());
        self.flatten_into(&mut lines);
        lines
    }

    fn flatten_into(self, out: &mut Vec<Line>) {
        let mut sections: Vec<Option<CodeBuilder>> = self.sections.into_iter().map(Some).collect();
        for node in self.code {
            match node {
                CodeNode::Line(line) => out.push(line),
                CodeNode::Section(id) => {
                    if let Some(section) = sections[id].take() {
                        section.flatten_into(out);
                    }
                }
            }
        }
    }

    /// Finalize the builder into an executable block tree.
    ///
    /// # Panics
    ///
    /// Panics if the indentation is not back at level 0. The parser rejects
    /// unbalanced templates before this point, so reaching it is a compiler
    /// defect.
    pub fn finish(self) -> Program {
        assert_eq!(
            self.indent_level, 0,
            "code builder finished at indentation level {}",
            self.indent_level
        );
        Program::from_lines(self.into_lines())
    }

    fn write_listing(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.code {
            match node {
                CodeNode::Line(line) => {
                    write_indent(f, line.indent * INDENT_STEP)?;
                    writeln!(f, "{}", line.stmt)?;
                }
                CodeNode::Section(id) => self.sections[*id].write_listing(f)?,
            }
        }
        Ok(())
    }
}

/// Write `width` spaces. Widths can exceed what `{:width$}` accepts.
fn write_indent(f: &mut fmt::Formatter<'_>, mut width: usize) -> fmt::Result {
    const SPACES: &str = "                                                                ";
    while width > 0 {
        let chunk = width.min(SPACES.len());
        f.write_str(&SPACES[..chunk])?;
        width -= chunk;
    }
    Ok(())
}

/// Indented listing of the generated routine, sections in place.
impl fmt::Display for CodeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_listing(f)
    }
}

#[cfg(test)]
mod tests;
