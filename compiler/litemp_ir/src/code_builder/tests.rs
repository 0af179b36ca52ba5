use super::*;
use crate::{Expr, Name};
use pretty_assertions::assert_eq;

fn name(text: &str) -> Name {
    match Name::new(text) {
        Some(name) => name,
        None => panic!("{text:?} is not a valid name"),
    }
}

// === Lines and indentation ===

#[test]
fn add_line_records_current_indent() {
    let mut code = CodeBuilder::new();
    code.add_line(Stmt::InitOutput);
    code.add_line(Stmt::If(Expr::var(name("a"))));
    code.indent();
    code.add_line(Stmt::Append(Expr::literal("yes")));
    code.dedent();
    code.add_line(Stmt::Return);

    let indents: Vec<usize> = code.into_lines().iter().map(|line| line.indent).collect();
    assert_eq!(indents, vec![0, 0, 1, 0]);
}

#[test]
fn indent_level_balances() {
    let mut code = CodeBuilder::new();
    code.indent();
    code.indent();
    assert_eq!(code.indent_level(), 2);
    code.dedent();
    code.dedent();
    assert_eq!(code.indent_level(), 0);
}

// === Sections ===

#[test]
fn section_lines_land_at_reserved_position() {
    let mut code = CodeBuilder::new();
    let vars = code.add_section();
    code.add_line(Stmt::InitOutput);
    code.add_line(Stmt::Append(Expr::var(name("x")).to_text()));
    code.add_line(Stmt::Return);

    // Filled after the body, emitted before it.
    code.section_mut(vars).add_line(Stmt::Bind(name("x")));

    let stmts: Vec<Stmt> = code.into_lines().into_iter().map(|line| line.stmt).collect();
    assert_eq!(
        stmts,
        vec![
            Stmt::Bind(name("x")),
            Stmt::InitOutput,
            Stmt::Append(Expr::var(name("x")).to_text()),
            Stmt::Return,
        ]
    );
}

#[test]
fn section_inherits_indent_at_creation() {
    let mut code = CodeBuilder::new();
    code.indent();
    let section = code.add_section();
    code.indent();
    code.add_line(Stmt::InitOutput);
    code.section_mut(section).add_line(Stmt::Return);

    let lines = code.into_lines();
    assert_eq!(lines[0], Line { indent: 1, stmt: Stmt::Return });
    assert_eq!(lines[1], Line { indent: 2, stmt: Stmt::InitOutput });
}

#[test]
fn line_count_includes_sections() {
    let mut code = CodeBuilder::new();
    let vars = code.add_section();
    code.add_line(Stmt::InitOutput);
    code.section_mut(vars).add_line(Stmt::Bind(name("a")));
    code.section_mut(vars).add_line(Stmt::Bind(name("b")));
    assert_eq!(code.line_count(), 3);
}

// === Listing ===

#[test]
fn display_renders_indented_listing() {
    let mut code = CodeBuilder::new();
    let vars = code.add_section();
    code.add_line(Stmt::InitOutput);
    code.add_line(Stmt::For {
        var: name("topic"),
        iter: Expr::var(name("topics")),
    });
    code.indent();
    code.add_line(Stmt::Extend(vec![
        Expr::literal("<p>"),
        Expr::var(name("topic")).filtered(name("upper")).to_text(),
    ]));
    code.dedent();
    code.add_line(Stmt::Return);
    code.section_mut(vars).add_line(Stmt::Bind(name("topics")));

    let expected = "\
bind topics <- context[\"topics\"]
init result
for topic in topics
    extend [\"<p>\", to_text(upper(topic))]
return join(result)
";
    assert_eq!(code.to_string(), expected);
}

#[test]
fn listing_handles_deep_indentation() {
    let depth = 20_000;
    let mut code = CodeBuilder::new();
    for _ in 0..depth {
        code.indent();
    }
    code.add_line(Stmt::Append(Expr::literal("x")));
    for _ in 0..depth {
        code.dedent();
    }

    let listing = code.to_string();
    assert_eq!(listing.len(), depth * INDENT_STEP + "append \"x\"\n".len());
    assert!(listing.ends_with(&format!("{}append \"x\"\n", " ".repeat(INDENT_STEP))));
}

// === Finishing ===

#[test]
fn finish_builds_program() {
    let mut code = CodeBuilder::new();
    code.add_line(Stmt::InitOutput);
    code.add_line(Stmt::Return);
    let program = code.finish();
    assert_eq!(program.body.len(), 2);
}

#[test]
#[should_panic(expected = "indentation level 1")]
fn finish_rejects_unbalanced_indent() {
    let mut code = CodeBuilder::new();
    code.add_line(Stmt::If(Expr::var(name("a"))));
    code.indent();
    let _ = code.finish();
}
