//! Shell session tests

use iterproto::shell::{IterKind, Reply, Session, ShellError};
use iterproto::Value;
use test_case::test_case;

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(t) => t,
        other => panic!("expected text, got {:?}", other),
    }
}

fn session_with(line: &str) -> Session {
    let mut session = Session::new().expect("session");
    assert_eq!(session.eval(line).unwrap(), Reply::Silent);
    session
}

#[test]
fn test_step_through_numbers() {
    let mut session = session_with("let xs = [10, 20, 30]");

    assert_eq!(text(session.eval("xs[Symbol.iterator]()").unwrap()), "it1");
    assert_eq!(text(session.eval("it1.next()").unwrap()), "{ value: 10, done: false }");
    assert_eq!(text(session.eval("it1.next()").unwrap()), "{ value: 20, done: false }");
    assert_eq!(text(session.eval("it1.next()").unwrap()), "{ value: 30, done: false }");
    assert_eq!(text(session.eval("it1.next()").unwrap()), "{ value: undefined, done: true }");
    assert_eq!(text(session.eval("it1.next();").unwrap()), "{ value: undefined, done: true }");
}

#[test]
fn test_empty_iterable() {
    let mut session = session_with("let empty = []");
    session.eval("empty.values()").unwrap();
    assert_eq!(text(session.eval("it1.next()").unwrap()), "{ value: undefined, done: true }");
}

#[test]
fn test_independent_handles() {
    let mut session = session_with("let s = ['x', 'y']");
    assert_eq!(text(session.eval("s[Symbol.iterator]()").unwrap()), "it1");
    assert_eq!(text(session.eval("s[Symbol.iterator]()").unwrap()), "it2");

    for _ in 0..3 {
        session.eval("it1.next()").unwrap();
    }
    assert_eq!(text(session.eval("it2.next()").unwrap()), "{ value: 'x', done: false }");
    assert_eq!(session.iterator_count(), 2);
}

#[test_case("s.keys()", "{ value: 0, done: false }" ; "keys")]
#[test_case("s.entries()", "{ value: [ 0, 'x' ], done: false }" ; "entries")]
#[test_case("s.values()", "{ value: 'x', done: false }" ; "values")]
fn test_iterator_forms(obtain: &str, first: &str) {
    let mut session = session_with("let s = ['x', 'y']");
    session.eval(obtain).unwrap();
    assert_eq!(text(session.eval("it1.next()").unwrap()), first);
}

#[test]
fn test_rebinding_keeps_running_iterators() {
    let mut session = session_with("let a = [1, 2]");
    session.eval("a.values()").unwrap();
    session.eval("it1.next()").unwrap();

    session.eval("let a = ['new']").unwrap();
    assert_eq!(text(session.eval("it1.next()").unwrap()), "{ value: 2, done: false }");

    session.eval("a.values()").unwrap();
    assert_eq!(text(session.eval("it2.next()").unwrap()), "{ value: 'new', done: false }");
}

#[test]
fn test_spread_and_for_of() {
    let mut session = session_with("let xs = [1, 'two', true, null]");

    assert_eq!(text(session.eval("[...xs]").unwrap()), "[ 1, 'two', true, null ]");
    assert_eq!(
        text(session.eval("for (const v of xs)").unwrap()),
        "1\n'two'\ntrue\nnull"
    );

    session.eval("let none = []").unwrap();
    assert_eq!(session.eval("for (let v of none)").unwrap(), Reply::Silent);
    assert_eq!(text(session.eval("[...none]").unwrap()), "[]");
}

#[test]
fn test_show_binding_and_handle() {
    let mut session = session_with("let xs = [1]");
    assert_eq!(text(session.eval("xs").unwrap()), "[ 1 ]");

    session.eval("xs.keys()").unwrap();
    assert_eq!(text(session.eval("it1").unwrap()), "[keys iterator over xs] active at 0");
    session.eval("it1.next()").unwrap();
    session.eval("it1.next()").unwrap();
    assert_eq!(text(session.eval("it1").unwrap()), "[keys iterator over xs] exhausted");
}

#[test]
fn test_direct_api() {
    let mut session = Session::new().unwrap();
    session.bind("v".to_string(), vec![Value::from(5)]);
    let handle = session.obtain("v", IterKind::Entries).unwrap();
    assert_eq!(session.advance(&handle).unwrap(), "{ value: [ 0, 5 ], done: false }");
    assert_eq!(session.lookup("v").unwrap().len(), 1);
}

#[test]
fn test_errors() {
    let mut session = session_with("let xs = [1]");

    assert!(matches!(
        session.eval("ys.values()"),
        Err(ShellError::UnknownBinding(name)) if name == "ys"
    ));
    assert!(matches!(
        session.eval("it9.next()"),
        Err(ShellError::UnknownIterator(name)) if name == "it9"
    ));
    assert!(matches!(session.eval("let bad = [1,"), Err(ShellError::Syntax { .. })));
    assert!(matches!(session.eval("xs.map()"), Err(ShellError::UnknownCommand(_))));
    assert!(matches!(session.eval("nope"), Err(ShellError::UnknownBinding(_))));
}

#[test]
fn test_misc_commands() {
    let mut session = Session::new().unwrap();
    assert_eq!(session.eval("").unwrap(), Reply::Silent);
    assert_eq!(session.eval("// comment").unwrap(), Reply::Silent);
    assert_eq!(session.eval("exit").unwrap(), Reply::Exit);
    assert!(text(session.eval("help").unwrap()).contains("itN.next()"));
}

#[test]
fn test_script_stops_at_first_error() {
    let mut session = Session::new().unwrap();
    let mut printed = Vec::new();
    let script = "let xs = [1, 2]\nxs.values()\n\nit1.next()\nys.values()\nlet zs = [3]\nit1.next()";

    let err = session
        .run_script(script, |text| printed.push(text.to_string()))
        .unwrap_err();

    assert!(matches!(&err, ShellError::AtLine { line: 5, .. }), "{err}");
    assert_eq!(err.to_string(), "line 5: ReferenceError: ys is not defined");
    assert_eq!(printed, ["it1", "{ value: 1, done: false }"]);
    assert!(session.lookup("zs").is_err());
}

#[test]
fn test_script_skips_blanks_and_stops_at_exit() {
    let mut session = Session::new().unwrap();
    let mut printed = Vec::new();
    let script = "// setup\n\nlet xs = ['a']\n[...xs];\nexit\nlet later = [1]";

    session
        .run_script(script, |text| printed.push(text.to_string()))
        .unwrap();

    assert_eq!(printed, ["[ 'a' ]"]);
    assert!(session.lookup("later").is_err());
}

#[test_case("let help = [9]" ; "help")]
#[test_case("let exit = []" ; "exit")]
#[test_case("let for = [1]" ; "keyword")]
#[test_case("let it1 = [1]" ; "handle name")]
fn test_reserved_names_cannot_be_bound(line: &str) {
    let mut session = Session::new().unwrap();
    assert!(matches!(session.eval(line), Err(ShellError::ReservedName(_))));
    assert_eq!(session.eval("exit").unwrap(), Reply::Exit);
}

#[test_case("it01.next()" ; "leading zero")]
#[test_case("it0.next()" ; "zero")]
#[test_case("it1x.next()" ; "trailing garbage")]
fn test_handle_names_are_exact(line: &str) {
    let mut session = session_with("let xs = [1]");
    session.eval("xs.values()").unwrap();
    assert!(matches!(session.eval(line), Err(ShellError::UnknownIterator(_))));
    assert!(matches!(session.eval("it01"), Err(ShellError::UnknownBinding(_))));
}

#[test]
fn test_number_notation() {
    let mut session = session_with("let n = [0.1, 1e-7, 1e300, 123456]");
    assert_eq!(text(session.eval("n").unwrap()), "[ 0.1, 1e-7, 1e+300, 123456 ]");
}

#[test]
fn test_non_ascii_literals() {
    let mut session = session_with("let s = ['é', 'ü']");
    assert_eq!(text(session.eval("[...s]").unwrap()), "[ 'é', 'ü' ]");

    let err = session.eval("let bad = ['é', x]").unwrap_err();
    assert_eq!(err.to_string(), "SyntaxError: x is not a literal (column 7)");
}
