//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Assignments and local declarations
//! - Control flow statements and the nesting of `if` chains
//! - Operator precedence and associativity
//! - Calls, method calls, indexing and table constructors
//! - Comments kept as statements
//! - Syntax errors and the nesting limit

use super::parser::{parse, parse_with_options, ParseOptions};
use crate::{
    ast::{
        ast::{Block, Chunk, Expr, ExprType, Stmt, StmtType},
        expressions::{
            BinaryOp, FunctionExpr, InvokeExpr, Name, NumberExpr, Numeral, TableExpr, TableField,
            TableKey, UnaryOp,
        },
        statements::{
            BreakStmt, CommentStmt, DoStmt, ForinStmt, FornumStmt, FunctionName, FunctionStmt, IfStmt,
            LocalFunctionStmt, OrElse, RepeatStmt, ReturnStmt, Target, WhileStmt,
        },
    },
    errors::errors::ErrorImpl,
    ErrorKind, Span,
};

fn statements(source: &str) -> Vec<Stmt> {
    parse(source).unwrap().body.body
}

/// Parses `x = <source>` and returns the assigned expression.
fn value(source: &str) -> Expr {
    match statements(&format!("x = {}", source)).remove(0) {
        Stmt::Assign(mut assign) => assign.values.remove(0),
        other => panic!("expected an assignment, got {:?}", other),
    }
}

fn target(expr: Expr) -> Target {
    match expr {
        Expr::Name(name) => Target::Name(name),
        Expr::Index(index) => Target::Index(index),
        other => panic!("{:?} is not assignable", other),
    }
}

fn name(id: &str) -> Expr {
    Expr::name(id)
}

fn int(value: i64) -> Expr {
    Expr::integer(value)
}

fn binary(operator: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::binary(operator, left, right)
}

fn call_stmt(func: &str, args: Vec<Expr>) -> Stmt {
    Stmt::call(Expr::call(name(func), args))
}

fn if_stmt(test: Expr, body: Vec<Stmt>, orelse: OrElse) -> IfStmt {
    IfStmt {
        test,
        body: Block::new(body),
        orelse,
        span: Span::default(),
    }
}

#[test]
fn test_parse_empty_statements() {
    assert_eq!(parse(";;;;").unwrap(), Chunk::new(Block::new(vec![])));
    assert_eq!(parse("").unwrap(), Chunk::new(Block::new(vec![])));
}

#[test]
fn test_parse_local_declarations() {
    assert_eq!(
        statements("local a;local b;"),
        vec![
            Stmt::local_assign(vec![Name::new("a")], vec![]),
            Stmt::local_assign(vec![Name::new("b")], vec![]),
        ]
    );
}

#[test]
fn test_parse_local_assign_keeps_lengths() {
    assert_eq!(
        statements("local a, b, c = 1"),
        vec![Stmt::local_assign(
            vec![Name::new("a"), Name::new("b"), Name::new("c")],
            vec![int(1)]
        )]
    );
}

#[test]
fn test_parse_simple_assignment() {
    assert_eq!(
        statements("i=3"),
        vec![Stmt::assign(vec![target(name("i"))], vec![int(3)])]
    );
}

#[test]
fn test_parse_index_assignment() {
    assert_eq!(
        statements("a[i] = 42"),
        vec![Stmt::assign(
            vec![target(Expr::index(name("a"), name("i")))],
            vec![int(42)]
        )]
    );
    assert_eq!(
        statements("_ENV.x = val"),
        vec![Stmt::assign(
            vec![target(Expr::field(name("_ENV"), "x"))],
            vec![name("val")]
        )]
    );
}

#[test]
fn test_parse_multiple_assignment() {
    assert_eq!(
        statements("x, y = y, x"),
        vec![Stmt::assign(
            vec![target(name("x")), target(name("y"))],
            vec![name("y"), name("x")]
        )]
    );
    assert_eq!(
        statements("a, b.c, d[1] = f()"),
        vec![Stmt::assign(
            vec![
                target(name("a")),
                target(Expr::field(name("b"), "c")),
                target(Expr::index(name("d"), int(1))),
            ],
            vec![Expr::call(name("f"), vec![])]
        )]
    );
}

#[test]
fn test_parse_dot_and_square_index_differ() {
    assert_ne!(value("a.x"), value("a[x]"));
    assert_eq!(value("a.x"), Expr::field(name("a"), "x"));
    assert_eq!(value("a['x']"), Expr::index(name("a"), Expr::string("x")));
}

#[test]
fn test_parse_numeric_for() {
    assert_eq!(
        statements("for i=1,10,2 do print(i) end"),
        vec![Stmt::Fornum(FornumStmt {
            target: Name::new("i"),
            start: int(1),
            stop: int(10),
            step: Some(int(2)),
            body: Block::new(vec![call_stmt("print", vec![name("i")])]),
            span: Span::default(),
        })]
    );

    match &statements("for i = n, 1 do end")[0] {
        Stmt::Fornum(fornum) => {
            assert_eq!(fornum.step, None);
            assert_eq!(fornum.start, name("n"));
        }
        other => panic!("expected a numeric for, got {:?}", other),
    }
}

#[test]
fn test_parse_generic_for() {
    assert_eq!(
        statements("for k,v in pairs(t) do end"),
        vec![Stmt::Forin(ForinStmt {
            targets: vec![Name::new("k"), Name::new("v")],
            iter: vec![Expr::call(name("pairs"), vec![name("t")])],
            body: Block::new(vec![]),
            span: Span::default(),
        })]
    );

    match &statements("for line in next, t, nil do end")[0] {
        Stmt::Forin(forin) => {
            assert_eq!(forin.targets, vec![Name::new("line")]);
            assert_eq!(forin.iter.len(), 3);
        }
        other => panic!("expected a generic for, got {:?}", other),
    }
}

#[test]
fn test_parse_do_while_repeat() {
    assert_eq!(
        statements("do local x = 1 end"),
        vec![Stmt::Do(DoStmt {
            body: Block::new(vec![Stmt::local_assign(vec![Name::new("x")], vec![int(1)])]),
            span: Span::default(),
        })]
    );

    assert_eq!(
        statements("while true do break end"),
        vec![Stmt::While(WhileStmt {
            test: Expr::True(Span::default()),
            body: Block::new(vec![Stmt::Break(BreakStmt {
                span: Span::default(),
            })]),
            span: Span::default(),
        })]
    );

    assert_eq!(
        statements("repeat x = x + 1 until x > 10"),
        vec![Stmt::Repeat(RepeatStmt {
            body: Block::new(vec![Stmt::assign(
                vec![target(name("x"))],
                vec![binary(BinaryOp::Add, name("x"), int(1))]
            )]),
            test: binary(BinaryOp::GreaterThan, name("x"), int(10)),
            span: Span::default(),
        })]
    );
}

#[test]
fn test_parse_if_without_else() {
    assert_eq!(
        statements("if a then b() end"),
        vec![Stmt::If(if_stmt(
            name("a"),
            vec![call_stmt("b", vec![])],
            OrElse::Absent
        ))]
    );
}

#[test]
fn test_parse_if_else() {
    assert_eq!(
        statements("if a then b() else c() end"),
        vec![Stmt::If(if_stmt(
            name("a"),
            vec![call_stmt("b", vec![])],
            OrElse::Else(Block::new(vec![call_stmt("c", vec![])]))
        ))]
    );
}

#[test]
fn test_parse_elseif_nests() {
    let expected = if_stmt(
        name("e1"),
        vec![call_stmt("b1", vec![])],
        OrElse::ElseIf(Box::new(if_stmt(
            name("e2"),
            vec![call_stmt("b2", vec![])],
            OrElse::Else(Block::new(vec![call_stmt("b3", vec![])])),
        ))),
    );

    assert_eq!(
        statements("if e1 then b1() elseif e2 then b2() else b3() end"),
        vec![Stmt::If(expected)]
    );
}

#[test]
fn test_parse_elseif_chain_without_else() {
    let expected = if_stmt(
        name("a"),
        vec![],
        OrElse::ElseIf(Box::new(if_stmt(
            name("b"),
            vec![],
            OrElse::ElseIf(Box::new(if_stmt(name("c"), vec![], OrElse::Absent))),
        ))),
    );

    assert_eq!(
        statements("if a then elseif b then elseif c then end"),
        vec![Stmt::If(expected)]
    );
}

#[test]
fn test_parse_goto_and_label() {
    assert_eq!(
        statements("goto foo\n::foo::"),
        vec![Stmt::goto("foo"), Stmt::label("foo")]
    );
}

#[test]
fn test_parse_comment_statement() {
    assert_eq!(
        statements("-- a basic comment"),
        vec![Stmt::comment("a basic comment")]
    );
}

#[test]
fn test_parse_comments_keep_their_place() {
    assert_eq!(
        statements("local x = 1 -- one\n--[[ two ]]\nlocal y = 2"),
        vec![
            Stmt::local_assign(vec![Name::new("x")], vec![int(1)]),
            Stmt::comment("one"),
            Stmt::Comment(CommentStmt {
                text: String::from(" two "),
                is_multi_line: true,
                span: Span::default(),
            }),
            Stmt::local_assign(vec![Name::new("y")], vec![int(2)]),
        ]
    );
}

#[test]
fn test_parse_comment_before_block_end() {
    assert_eq!(
        statements("do -- inside\nend"),
        vec![Stmt::Do(DoStmt {
            body: Block::new(vec![Stmt::comment("inside")]),
            span: Span::default(),
        })]
    );
}

#[test]
fn test_parse_comment_inside_expression_is_skipped() {
    assert_eq!(
        statements("x = 1 + --[[ two ]] 2"),
        vec![Stmt::assign(
            vec![target(name("x"))],
            vec![binary(BinaryOp::Add, int(1), int(2))]
        )]
    );
}

#[test]
fn test_parse_arithmetic_precedence() {
    assert_eq!(
        value("1 + 2 * 3"),
        binary(BinaryOp::Add, int(1), binary(BinaryOp::Mult, int(2), int(3)))
    );
    assert_eq!(
        value("1 - 2 - 3"),
        binary(BinaryOp::Sub, binary(BinaryOp::Sub, int(1), int(2)), int(3))
    );
    assert_eq!(
        value("a // b % c"),
        binary(
            BinaryOp::Mod,
            binary(BinaryOp::FloorDiv, name("a"), name("b")),
            name("c")
        )
    );
    assert_eq!(
        value("(1 + 2) * 3"),
        binary(BinaryOp::Mult, binary(BinaryOp::Add, int(1), int(2)), int(3))
    );
}

#[test]
fn test_parse_right_associative_operators() {
    assert_eq!(
        value("a .. b .. c"),
        binary(
            BinaryOp::Concat,
            name("a"),
            binary(BinaryOp::Concat, name("b"), name("c"))
        )
    );
    assert_eq!(
        value("2 ^ 3 ^ 2"),
        binary(BinaryOp::Expo, int(2), binary(BinaryOp::Expo, int(3), int(2)))
    );
    assert_eq!(
        value("1 + 2 .. 3"),
        binary(BinaryOp::Concat, binary(BinaryOp::Add, int(1), int(2)), int(3))
    );
}

#[test]
fn test_parse_unary_precedence() {
    assert_eq!(
        value("-x ^ 2"),
        Expr::unary(UnaryOp::Minus, binary(BinaryOp::Expo, name("x"), int(2)))
    );
    assert_eq!(
        value("2 ^ -3"),
        binary(BinaryOp::Expo, int(2), Expr::unary(UnaryOp::Minus, int(3)))
    );
    assert_eq!(
        value("not a == b"),
        binary(
            BinaryOp::Equal,
            Expr::unary(UnaryOp::Not, name("a")),
            name("b")
        )
    );
    assert_eq!(
        value("#t + 1"),
        binary(BinaryOp::Add, Expr::unary(UnaryOp::Length, name("t")), int(1))
    );
    assert_eq!(
        value("~a ~ b"),
        binary(
            BinaryOp::BitXor,
            Expr::unary(UnaryOp::BitNot, name("a")),
            name("b")
        )
    );
}

#[test]
fn test_parse_logical_and_comparison_precedence() {
    assert_eq!(
        value("a or b and c"),
        binary(
            BinaryOp::Or,
            name("a"),
            binary(BinaryOp::And, name("b"), name("c"))
        )
    );
    assert_eq!(
        value("a < b .. c"),
        binary(
            BinaryOp::LessThan,
            name("a"),
            binary(BinaryOp::Concat, name("b"), name("c"))
        )
    );
    assert_eq!(
        value("a ~= b or c >= d"),
        binary(
            BinaryOp::Or,
            binary(BinaryOp::NotEqual, name("a"), name("b")),
            binary(BinaryOp::GreaterOrEqual, name("c"), name("d"))
        )
    );
}

#[test]
fn test_parse_bitwise_precedence() {
    assert_eq!(
        value("a | b ~ c & d << 1"),
        binary(
            BinaryOp::BitOr,
            name("a"),
            binary(
                BinaryOp::BitXor,
                name("b"),
                binary(
                    BinaryOp::BitAnd,
                    name("c"),
                    binary(BinaryOp::ShiftLeft, name("d"), int(1))
                )
            )
        )
    );
    assert_eq!(
        value("a >> 1 .. b"),
        binary(
            BinaryOp::ShiftRight,
            name("a"),
            binary(BinaryOp::Concat, int(1), name("b"))
        )
    );
}

#[test]
fn test_parse_literals() {
    assert_eq!(value("nil"), Expr::Nil(Span::default()));
    assert_eq!(value("true"), Expr::True(Span::default()));
    assert_eq!(value("false"), Expr::False(Span::default()));
    assert_eq!(value("..."), Expr::Varargs(Span::default()));
    assert_eq!(value("'hi'"), Expr::string("hi"));
    assert_eq!(value("[[long]]"), Expr::string("long"));
}

#[test]
fn test_parse_numbers() {
    assert_eq!(value("0x10"), int(16));
    assert_eq!(value("1e2"), Expr::float(100.0));
    assert_eq!(value("3.0"), Expr::float(3.0));
    assert_ne!(value("3.5"), int(3));

    match value("0x10") {
        Expr::Number(NumberExpr { value, raw, .. }) => {
            assert_eq!(value, Numeral::Integer(16));
            assert_eq!(raw, "0x10");
        }
        other => panic!("expected a number, got {:?}", other),
    }
}

#[test]
fn test_parse_number_spellings_compare_by_value() {
    for spelling in ["100", "1e2", "0x64", "100.0", "0x1.9p6", "1E+2", "10000e-2", "0X64"] {
        assert_eq!(value(spelling), int(100), "spelling {}", spelling);
        assert_eq!(value(spelling), Expr::float(100.0), "spelling {}", spelling);
    }

    assert_ne!(value("100.5"), int(100));
    assert_ne!(value("0x65"), Expr::float(100.0));
    assert_ne!(value("9223372036854775808"), int(i64::MIN));
    assert_eq!(Numeral::Float(-9223372036854775808.0), Numeral::Integer(i64::MIN));
    assert_ne!(Numeral::Float(f64::NAN), Numeral::Integer(0));
}

#[test]
fn test_parse_call_sugar() {
    assert_eq!(
        statements("print 'hi'"),
        vec![call_stmt("print", vec![Expr::string("hi")])]
    );
    assert_eq!(
        statements("f{1}"),
        vec![call_stmt(
            "f",
            vec![Expr::Table(TableExpr {
                fields: vec![TableField {
                    key: None,
                    value: int(1),
                }],
                span: Span::default(),
            })]
        )]
    );
    assert_eq!(
        statements("f(1, 2)"),
        vec![call_stmt("f", vec![int(1), int(2)])]
    );
    assert_eq!(
        statements("f(a)(b)"),
        vec![Stmt::call(Expr::call(
            Expr::call(name("f"), vec![name("a")]),
            vec![name("b")]
        ))]
    );
}

#[test]
fn test_parse_method_call() {
    let expected = Expr::Invoke(InvokeExpr {
        source: Box::new(name("obj")),
        func: Name::new("method"),
        args: vec![int(1)],
        span: Span::default(),
    });

    assert_eq!(statements("obj:method(1)"), vec![Stmt::call(expected)]);

    match &statements("s:upper():lower()")[0] {
        Stmt::Expression(stmt) => match &stmt.expression {
            Expr::Invoke(outer) => {
                assert_eq!(outer.func, Name::new("lower"));
                assert_eq!(outer.source.get_expr_type(), ExprType::Invoke);
            }
            other => panic!("expected a method call, got {:?}", other),
        },
        other => panic!("expected a call statement, got {:?}", other),
    }
}

#[test]
fn test_parse_suffix_chains() {
    assert_eq!(
        value("a.b[c](d).e"),
        Expr::field(
            Expr::call(
                Expr::index(Expr::field(name("a"), "b"), name("c")),
                vec![name("d")]
            ),
            "e"
        )
    );
}

#[test]
fn test_parse_parenthesized_prefixes() {
    assert_eq!(
        statements("(f)()"),
        vec![Stmt::call(Expr::call(name("f"), vec![]))]
    );
    assert_eq!(
        statements("(a).b = 1"),
        vec![Stmt::assign(
            vec![target(Expr::field(name("a"), "b"))],
            vec![int(1)]
        )]
    );
}

#[test]
fn test_parse_table_constructor() {
    let table = match value("{1, x = 2, [3] = 4; 'five',}") {
        Expr::Table(table) => table,
        other => panic!("expected a table, got {:?}", other),
    };

    assert_eq!(
        table.fields,
        vec![
            TableField {
                key: None,
                value: int(1),
            },
            TableField {
                key: Some(TableKey::Name(Name::new("x"))),
                value: int(2),
            },
            TableField {
                key: Some(TableKey::Expr(int(3))),
                value: int(4),
            },
            TableField {
                key: None,
                value: Expr::string("five"),
            },
        ]
    );
    assert_eq!(table.keys().count(), table.values().count());
    assert_eq!(table.keys().filter(|key| key.is_none()).count(), 2);

    assert_eq!(
        value("{}"),
        Expr::Table(TableExpr {
            fields: vec![],
            span: Span::default(),
        })
    );
}

#[test]
fn test_parse_function_expression() {
    assert_eq!(
        value("function(a, b, ...) return a end"),
        Expr::Function(FunctionExpr {
            params: vec![Name::new("a"), Name::new("b")],
            is_vararg: true,
            body: Block::new(vec![Stmt::Return(ReturnStmt {
                values: vec![name("a")],
                span: Span::default(),
            })]),
            span: Span::default(),
        })
    );
}

#[test]
fn test_parse_function_statements() {
    assert_eq!(
        statements("function a.b:c(x) end"),
        vec![Stmt::Function(FunctionStmt {
            name: FunctionName {
                path: vec![Name::new("a"), Name::new("b")],
                method: Some(Name::new("c")),
            },
            func: FunctionExpr {
                params: vec![Name::new("x")],
                is_vararg: false,
                body: Block::new(vec![]),
                span: Span::default(),
            },
            span: Span::default(),
        })]
    );

    assert_eq!(
        statements("local function f() return end"),
        vec![Stmt::LocalFunction(LocalFunctionStmt {
            name: Name::new("f"),
            func: FunctionExpr {
                params: vec![],
                is_vararg: false,
                body: Block::new(vec![Stmt::Return(ReturnStmt {
                    values: vec![],
                    span: Span::default(),
                })]),
                span: Span::default(),
            },
            span: Span::default(),
        })]
    );
}

#[test]
fn test_parse_return() {
    assert_eq!(
        statements("return 1, 2"),
        vec![Stmt::Return(ReturnStmt {
            values: vec![int(1), int(2)],
            span: Span::default(),
        })]
    );
    assert_eq!(
        statements("return; -- done"),
        vec![
            Stmt::Return(ReturnStmt {
                values: vec![],
                span: Span::default(),
            }),
            Stmt::comment("done"),
        ]
    );
    assert_eq!(statements("do return end print(1)").len(), 2);
}

#[test]
fn test_parse_return_must_be_last() {
    let error = parse("return 1 x = 2").unwrap_err();

    assert!(matches!(error.get_impl(), ErrorImpl::ReturnNotLast { .. }));
    assert_eq!(error.get_position().column, 10);
}

#[test]
fn test_parse_missing_end() {
    let error = parse("local x = 1\nif x then\n").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("'end'"),
            found: String::from("<eof>"),
        }
    );
    assert_eq!(error.get_position().line, 3);
}

#[test]
fn test_parse_missing_then_and_until() {
    let error = parse("if x y() end").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("'then'"),
            found: String::from("'y'"),
        }
    );

    let error = parse("repeat x() x()").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("'until'"),
            found: String::from("<eof>"),
        }
    );
}

#[test]
fn test_parse_invalid_assignment_targets() {
    let error = parse("(a) = 1").unwrap_err();
    assert!(matches!(
        error.get_impl(),
        ErrorImpl::InvalidAssignmentTarget { .. }
    ));

    let error = parse("f() = 1").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::InvalidAssignmentTarget {
            found: String::from("a function call"),
        }
    );
    assert_eq!(error.get_position().column, 1);

    let error = parse("x, f() = 1, 2").unwrap_err();
    assert_eq!(error.get_position().column, 4);
}

#[test]
fn test_parse_expression_statements_must_be_calls() {
    for source in ["x", "a.b", "(f())", "1"] {
        let error = parse(source).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Syntax, "{}", source);
    }

    let error = parse("x").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::InvalidStatement {
            found: String::from("<eof>"),
        }
    );
}

#[test]
fn test_parse_unexpected_symbols() {
    let error = parse("x = ").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedSymbol {
            found: String::from("<eof>"),
        }
    );

    let error = parse("local 1").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("<name>"),
            found: String::from("'1'"),
        }
    );

    let error = parse("for i do end").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("'=' or 'in'"),
            found: String::from("'do'"),
        }
    );

    let error = parse("x = 1 end").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("<eof>"),
            found: String::from("'end'"),
        }
    );
}

#[test]
fn test_parse_reports_lexical_errors() {
    let error = parse("x = 'abc").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Lexical);

    // lexical errors win over earlier syntax errors
    let error = parse("x = = 3x").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Lexical);
}

#[test]
fn test_parse_recursion_limit() {
    let options = ParseOptions { max_depth: 20 };

    let source = format!("x = {}1{}", "(".repeat(50), ")".repeat(50));
    let error = parse_with_options(&source, &options).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::RecursionLimit);
    assert_eq!(error.get_impl(), &ErrorImpl::RecursionLimit { limit: 20 });

    let source = format!("{}{}", "do ".repeat(50), "end ".repeat(50));
    let error = parse_with_options(&source, &options).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::RecursionLimit);

    let source = format!("x = {}1{}", "(".repeat(5), ")".repeat(5));
    assert!(parse_with_options(&source, &options).is_ok());
}

#[test]
fn test_parse_default_recursion_limit() {
    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let shallow = format!("x = {}1{}", "(".repeat(400), ")".repeat(400));
            assert!(parse(&shallow).is_ok());

            let deep = format!("x = {}1{}", "(".repeat(3000), ")".repeat(3000));
            let error = parse(&deep).unwrap_err();
            assert_eq!(error.get_impl(), &ErrorImpl::RecursionLimit { limit: 1000 });
        })
        .unwrap();

    handle.join().unwrap();
}

#[test]
fn test_parse_long_operator_chain_hits_limit() {
    let source = format!("x = {}1", "1 + ".repeat(5_000));
    let error = parse(&source).unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::RecursionLimit { limit: 1000 });

    let options = ParseOptions { max_depth: 50 };
    let source = format!("x = {}1", "1 * ".repeat(100));
    let error = parse_with_options(&source, &options).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::RecursionLimit);

    let source = format!("x = {}1", "1 - ".repeat(20));
    assert!(parse_with_options(&source, &options).is_ok());
}

#[test]
fn test_parse_long_suffix_chain_hits_limit() {
    let source = format!("x = {}b", "a.".repeat(5_000));
    let error = parse(&source).unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::RecursionLimit { limit: 1000 });

    let source = format!("a{}", ":m()".repeat(5_000));
    let error = parse(&source).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::RecursionLimit);

    let options = ParseOptions { max_depth: 50 };
    let source = format!("x = {}b", "a[1].".repeat(20));
    assert!(parse_with_options(&source, &options).is_ok());
}

#[test]
fn test_parse_long_elseif_chain_hits_limit() {
    let source = format!("if a then {}end", "elseif a then ".repeat(5_000));
    let error = parse(&source).unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::RecursionLimit { limit: 1000 });

    let source = format!("if a then {}end", "elseif a then ".repeat(300));
    assert!(parse(&source).is_ok());
}

#[test]
fn test_parse_spans() {
    let body = statements("local x = 1\n  foo()");

    assert_eq!(body[0].get_span().start.line, 1);
    assert_eq!(body[0].get_span().end.column, 12);
    assert_eq!(body[1].get_span().start.line, 2);
    assert_eq!(body[1].get_span().start.column, 3);
    assert_eq!(body[1].get_span().len(), 5);
}

#[test]
fn test_parse_equality_ignores_positions() {
    assert_eq!(parse("x = 1").unwrap(), parse("x    =\n\n  1").unwrap());
    assert_ne!(parse("x = 1").unwrap(), parse("x = 2").unwrap());
}

#[test]
fn test_node_introspection() {
    let body = statements("for i = 1, 2 do end x = a + b");

    assert_eq!(body[0].get_stmt_type(), StmtType::Fornum);
    let names: Vec<&str> = body[0].fields().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["target", "start", "stop", "step", "body"]);

    let expr = match &body[1] {
        Stmt::Assign(assign) => &assign.values[0],
        other => panic!("expected an assignment, got {:?}", other),
    };
    assert_eq!(expr.get_expr_type(), ExprType::Binary(BinaryOp::Add));
    assert_eq!(expr.get_expr_type().to_string(), "AddOp");
    assert_eq!(expr.fields().len(), 2);
    assert_eq!(ExprType::Nil.to_string(), "NilExpr");
    assert_eq!(ExprType::Unary(UnaryOp::Not).to_string(), "ULNotOp");
    assert_eq!(BinaryOp::FloorDiv.symbol(), "//");
}
