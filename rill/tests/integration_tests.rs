use rill::{RunError, RuntimeErrorKind, Session, Value, ValueType};

fn run(session: &Session, source: &str) -> Option<Value> {
    match session.run("test.rl", source) {
        Ok(value) => value,
        Err(error) => panic!("{} failed: {}", source, error),
    }
}

fn runtime_error(session: &Session, source: &str) -> RuntimeErrorKind {
    match session.run("test.rl", source) {
        Err(RunError::Runtime(error)) => error.kind,
        other => panic!("expected a runtime error from {}, got {:?}", source, other),
    }
}

fn int(value: i64) -> Option<Value> {
    Some(Value::Integer(value))
}

fn boolean(value: bool) -> Option<Value> {
    Some(Value::Boolean(value))
}

fn diagnostics(session: &Session, source: &str) -> Vec<String> {
    match session.run_script("test.rl", source) {
        Err(RunError::Diagnostics(diagnostics)) => {
            diagnostics.iter().map(ToString::to_string).collect()
        }
        other => panic!("expected diagnostics, got {:?}", other),
    }
}

#[test]
fn smoke_arithmetic() {
    let session = Session::new();
    assert_eq!(run(&session, "1 + 2 * 3"), int(7));
    assert_eq!(run(&session, "(1 + 2) * 3"), int(9));
    assert_eq!(run(&session, "3 + 4 * 2"), int(11));
    assert_eq!(run(&session, "2 << 1 + 1"), int(5));
    assert_eq!(run(&session, "7 / 2"), int(3));
    assert_eq!(run(&session, "-7 / 2"), int(-3));
    assert_eq!(run(&session, "-7 % 2"), int(-1));
    assert_eq!(runtime_error(&session, "1 / 0"), RuntimeErrorKind::DivisionByZero);
    assert_eq!(runtime_error(&session, "1 % (2 - 2)"), RuntimeErrorKind::DivisionByZero);
}

#[test]
fn smoke_logical_and_bitwise() {
    let session = Session::new();
    assert_eq!(run(&session, "true && false"), boolean(false));
    assert_eq!(run(&session, "5 & 3"), int(1));
    assert_eq!(run(&session, "true || false"), boolean(true));
    assert_eq!(run(&session, "5 | 2"), int(7));
}

#[test]
fn boolean_operators_evaluate_both_sides() {
    let session = Session::new();
    assert_eq!(run(&session, "false && (y = true)"), boolean(false));
    assert_eq!(run(&session, "y"), boolean(true));

    assert_eq!(run(&session, "true || (z = 1 == 1)"), boolean(true));
    assert_eq!(run(&session, "z"), boolean(true));
}

#[test]
fn declarations_persist_across_runs() {
    let session = Session::new();
    assert_eq!(run(&session, "x := 5"), int(5));
    assert_eq!(run(&session, "x * 2"), int(10));
    assert_eq!(session.scope().resolve("x"), Some(Value::Integer(5)));
}

#[test]
fn redeclaration_and_shadowing() {
    let session = Session::new();
    run(&session, "x := 5");
    assert_eq!(
        runtime_error(&session, "x := 6"),
        RuntimeErrorKind::Redeclaration("x".to_string())
    );
    assert_eq!(run(&session, "{ x := 6 x }"), int(6));
    assert_eq!(run(&session, "x"), int(5));
}

#[test]
fn typed_declarations() {
    let session = Session::new();
    assert_eq!(
        runtime_error(&session, "bool x = 5"),
        RuntimeErrorKind::TypeMismatch {
            name: "x".to_string(),
            expected: ValueType::Boolean,
            found: ValueType::Integer,
        }
    );
    run(&session, "int x = 5");
    assert_eq!(run(&session, "x"), int(5));
}

#[test]
fn compound_assignment() {
    let session = Session::new();
    assert_eq!(
        runtime_error(&session, "x += 1"),
        RuntimeErrorKind::UndefinedAssignmentTarget("x".to_string())
    );

    run(&session, "b := true");
    assert_eq!(
        runtime_error(&session, "b += 1"),
        RuntimeErrorKind::NotAnInteger {
            name: "b".to_string(),
            found: ValueType::Boolean,
        }
    );

    run(&session, "x := 5");
    assert_eq!(run(&session, "x += 3"), int(8));
    assert_eq!(run(&session, "x"), int(8));
}

#[test]
fn if_else_chains() {
    let session = Session::new();
    run(&session, "n := 15");
    let classify = "if n % 15 == 0 { 15 } else if n % 5 == 0 { 5 } else if n % 3 == 0 { 3 } else { n }";
    assert_eq!(run(&session, classify), int(15));

    run(&session, "m := 0");
    assert_eq!(run(&session, "if m > 0 { 1 }"), None);
    assert_eq!(run(&session, "if m > 0 { 1 } else { -1 }"), int(-1));
}

#[test]
fn nested_blocks() {
    let session = Session::new();
    let program = "{ a := 1 { b := a + 1 { c := b * 10 a + b + c } } }";
    assert_eq!(run(&session, program), int(23));
    assert_eq!(session.scope().resolve("a"), None);
}

#[test]
fn syntax_errors_skip_evaluation() {
    let session = Session::new();
    match session.run("test.rl", "x := (1 +") {
        Err(RunError::Diagnostics(diagnostics)) => {
            let messages: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
            assert_eq!(
                messages,
                vec![
                    "test.rl:1:10: error: unexpected token EOF, expected expression",
                    "test.rl:1:10: error: unexpected token EOF, expected RPAREN",
                ]
            );
        }
        other => panic!("expected diagnostics, got {:?}", other),
    }
    assert_eq!(session.scope().resolve("x"), None);
}

#[test]
fn lexical_errors_are_reported() {
    let session = Session::new();
    let error = session.run("test.rl", "1 + #").unwrap_err();
    assert_eq!(
        error.to_string(),
        "test.rl:1:5: error: unrecognized character in input: '#'\n\
         test.rl:1:6: error: unexpected token EOF, expected expression"
    );
}

#[test]
fn runtime_errors_keep_the_session_usable() {
    let session = Session::new();
    run(&session, "x := 1");
    let error = session.run("test.rl", "{ y := 2 x + z }").unwrap_err();
    assert_eq!(error.to_string(), "test.rl:1:14: undefined variable z");
    assert_eq!(run(&session, "x + 1"), int(2));
    assert_eq!(session.scope().resolve("y"), None);
}

#[test]
fn empty_input() {
    let session = Session::new();
    assert_eq!(run(&session, ""), None);
    assert_eq!(run(&session, "   \n\t"), None);
}

#[test]
fn block_value_is_its_trailing_declaration() {
    let session = Session::new();
    assert_eq!(run(&session, "{ y := 7 }"), int(7));
    assert_eq!(session.scope().resolve("y"), None);
    assert_eq!(run(&session, "{ bool t = 1 < 2 }"), boolean(true));
}

#[test]
fn deeply_nested_input_is_rejected() {
    let session = Session::new();
    let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let negations = format!("{}1", "-".repeat(10_000));
    let chain = format!("1{}", " + 1".repeat(10_000));
    let blocks = format!("{}1{}", "{".repeat(10_000), "}".repeat(10_000));

    for source in &[parens, negations, chain, blocks] {
        let messages = diagnostics(&session, source);
        assert_eq!(messages.len(), 1, "{:?}", messages);
        assert!(messages[0].ends_with("error: code is nested too deeply"));
    }
}

#[test]
fn moderately_nested_input_runs() {
    let session = Session::new();
    let parens = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(run(&session, &parens), int(1));
    let negations = format!("{}1", "-".repeat(51));
    assert_eq!(run(&session, &negations), int(-1));
    let chain = format!("0{}", " + 2".repeat(60));
    assert_eq!(run(&session, &chain), int(120));
}

#[test]
fn scripts_run_every_statement() {
    let session = Session::new();
    let script = "x := 5\nx += 1\n{ y := x * 2 }\nx + 1";
    assert_eq!(session.run_script("test.rl", script).unwrap(), int(7));
    assert_eq!(session.scope().resolve("x"), Some(Value::Integer(6)));
    assert_eq!(session.run_script("test.rl", "\n\n").unwrap(), None);
}

#[test]
fn scripts_with_syntax_errors_are_not_run() {
    let session = Session::new();
    assert_eq!(
        diagnostics(&session, "x := 5\ny := *"),
        vec!["test.rl:2:6: error: unexpected token MUL, expected expression"]
    );
    assert_eq!(session.scope().resolve("x"), None);
}

#[test]
fn scripts_stop_at_the_first_runtime_error() {
    let session = Session::new();
    let error = session
        .run_script("test.rl", "a := 1\nb := a / 0\nc := 3")
        .unwrap_err();
    assert_eq!(error.to_string(), "test.rl:2:8: division by zero");
    assert_eq!(session.scope().resolve("a"), Some(Value::Integer(1)));
    assert_eq!(session.scope().resolve("c"), None);
}
