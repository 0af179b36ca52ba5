use super::*;
use pretty_assertions::assert_eq;

fn name(text: &str) -> Name {
    match Name::new(text) {
        Some(name) => name,
        None => panic!("{text:?} is not a valid name"),
    }
}

fn line(indent: usize, stmt: Stmt) -> Line {
    Line { indent, stmt }
}

fn text(s: &str) -> Node {
    Node::Append(Expr::literal(s))
}

#[test]
fn flat_lines_stay_flat() {
    let program = Program::from_lines(vec![
        line(0, Stmt::Bind(name("a"))),
        line(0, Stmt::InitOutput),
        line(0, Stmt::Return),
    ]);
    assert_eq!(
        program.body,
        vec![Node::Bind(name("a")), Node::InitOutput, Node::Return]
    );
}

#[test]
fn for_owns_deeper_lines() {
    let program = Program::from_lines(vec![
        line(
            0,
            Stmt::For {
                var: name("x"),
                iter: Expr::var(name("xs")),
            },
        ),
        line(1, Stmt::Append(Expr::literal("a"))),
        line(1, Stmt::Append(Expr::literal("b"))),
        line(0, Stmt::Return),
    ]);
    assert_eq!(
        program.body,
        vec![
            Node::For {
                var: name("x"),
                iter: Expr::var(name("xs")),
                body: vec![text("a"), text("b")],
            },
            Node::Return,
        ]
    );
}

#[test]
fn header_without_body_gets_empty_block() {
    let program = Program::from_lines(vec![
        line(0, Stmt::If(Expr::var(name("a")))),
        line(0, Stmt::Return),
    ]);
    assert_eq!(
        program.body,
        vec![
            Node::If {
                branches: vec![Branch {
                    cond: Expr::var(name("a")),
                    body: vec![],
                }],
                otherwise: None,
            },
            Node::Return,
        ]
    );
}

#[test]
fn elif_and_else_join_the_if_chain() {
    let program = Program::from_lines(vec![
        line(0, Stmt::If(Expr::var(name("a")))),
        line(1, Stmt::Append(Expr::literal("Y"))),
        line(0, Stmt::Elif(Expr::var(name("b")))),
        line(1, Stmt::Append(Expr::literal("M"))),
        line(0, Stmt::Else),
        line(1, Stmt::Append(Expr::literal("N"))),
    ]);
    assert_eq!(
        program.body,
        vec![Node::If {
            branches: vec![
                Branch {
                    cond: Expr::var(name("a")),
                    body: vec![text("Y")],
                },
                Branch {
                    cond: Expr::var(name("b")),
                    body: vec![text("M")],
                },
            ],
            otherwise: Some(vec![text("N")]),
        }]
    );
}

#[test]
fn nested_blocks_close_on_dedent() {
    let program = Program::from_lines(vec![
        line(
            0,
            Stmt::For {
                var: name("row"),
                iter: Expr::var(name("rows")),
            },
        ),
        line(1, Stmt::If(Expr::var(name("row")))),
        line(2, Stmt::Append(Expr::literal("in"))),
        line(1, Stmt::Append(Expr::literal("after-if"))),
        line(0, Stmt::Append(Expr::literal("after-for"))),
    ]);
    assert_eq!(
        program.body,
        vec![
            Node::For {
                var: name("row"),
                iter: Expr::var(name("rows")),
                body: vec![
                    Node::If {
                        branches: vec![Branch {
                            cond: Expr::var(name("row")),
                            body: vec![text("in")],
                        }],
                        otherwise: None,
                    },
                    text("after-if"),
                ],
            },
            text("after-for"),
        ]
    );
}

#[test]
fn bound_names_lists_bindings_in_order() {
    let program = Program::from_lines(vec![
        line(0, Stmt::Bind(name("b"))),
        line(0, Stmt::Bind(name("a"))),
        line(0, Stmt::InitOutput),
    ]);
    let names: Vec<&str> = program.bound_names().map(Name::as_str).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
#[should_panic(expected = "without a preceding if")]
fn orphan_else_is_a_defect() {
    let _ = Program::from_lines(vec![line(0, Stmt::Else)]);
}

#[test]
fn deeply_nested_lines_rebuild_and_drop() {
    let depth = 20_000;
    let mut lines: Vec<Line> = (0..depth)
        .map(|level| line(level, Stmt::If(Expr::var(name("a")))))
        .collect();
    lines.push(line(depth, Stmt::Append(Expr::literal("x"))));
    lines.push(line(0, Stmt::Return));

    let program = Program::from_lines(lines);
    assert_eq!(program.body.len(), 2);
    let mut level = 0;
    let mut node = &program.body[0];
    while let Node::If { branches, .. } = node {
        level += 1;
        node = &branches[0].body[0];
    }
    assert_eq!(level, depth);
    assert_eq!(node, &text("x"));
}
