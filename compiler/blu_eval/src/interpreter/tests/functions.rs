use blu_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::{fault, output};

#[test]
fn test_call_and_return() {
    assert_eq!(
        output("let add = fun(a, b) { return a + b; }; print add(2, 3);"),
        "5\n"
    );
}

#[test]
fn test_last_statement_is_the_result() {
    assert_eq!(output("let f = fun() { 1; 2 }; print f();"), "2\n");
    assert_eq!(output("let g = fun() {}; print g();"), "nil\n");
}

#[test]
fn test_short_function_form() {
    assert_eq!(output("let add a b = { a + b }; print add(1, 2);"), "3\n");
}

#[test]
fn test_recursion_needs_rec() {
    let source = "
        let rec fact = fun(n) {
            if n < 2 then { return 1; } else { return n * fact(n - 1); }
        };
        print fact(5);
    ";
    assert_eq!(output(source), "120\n");
}

#[test]
fn test_return_unwinds_loops() {
    let source = "
        let find = fun(xs) {
            for 0 to len xs {
                if xs[idx] == 3 then { return idx; }
            }
            return -1;
        };
        print find([1, 3, 5]), find([]);
    ";
    assert_eq!(output(source), "1-1\n");
}

#[test]
fn test_pipe_appends_last_argument() {
    assert_eq!(
        output("let double = fun(x) { x * 2 }; print 3 |> double();"),
        "6\n"
    );
    assert_eq!(
        output("let sub = fun(a, b) { a - b }; print 1 |> sub(10);"),
        "9\n"
    );
}

#[test]
fn test_chained_pipes() {
    let source = "
        let add = fun(a, b) { a + b };
        let double = fun(x) { x * 2 };
        print 1 |> add(2) |> double();
    ";
    assert_eq!(output(source), "6\n");
}

#[test]
fn test_free_names_resolve_dynamically() {
    let source = "
        let secret = 1;
        let show = fun() { print secret; };
        let caller = fun() { let secret = 2; show(); };
        show();
        caller();
    ";
    assert_eq!(output(source), "1\n2\n");
}

#[test]
fn test_functions_do_not_capture() {
    let source = "
        let make = fun() { let hidden = 5; return fun() { hidden }; };
        let get = make();
        get();
    ";
    let err = fault(source);
    assert_eq!(err.code(), ErrorCode::E6004);
    assert_eq!(err.to_string(), "Cannot find binding 'hidden'");
}

#[test]
fn test_parameters_do_not_leak() {
    let source = "
        let mut x = 0;
        let set = fun(x) { x };
        set(5);
        print x;
    ";
    assert_eq!(output(source), "0\n");
}

#[test]
fn test_main_runs_after_top_level() {
    let source = r#"
        print "top";
        let final main = fun() { print "from main"; };
    "#;
    assert_eq!(output(source), "top\nfrom main\n");
}

#[test]
fn test_main_with_parameters_is_not_invoked() {
    assert_eq!(output("let final main = fun(a) { print a; };"), "");
}

#[test]
fn test_natives_are_callable() {
    assert_eq!(output("print blu.system.type_of(1);"), "number\n");
    assert_eq!(
        output("let t = blu.system.now(); print blu.system.type_of(blu.system.elapsed(t));"),
        "number\n"
    );
    assert_eq!(
        output("print blu.io;"),
        "{exists: <native io.exists>, read: <native io.read>, write: <native io.write>}\n"
    );
}
