#![expect(clippy::unwrap_used, reason = "tests unwrap expected faults")]

use blu_analysis::UnitRole;
use blu_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::{evaluate_with, fault, Options};
use crate::{ControlFlow, Value};

#[test]
fn test_arity_mismatch() {
    let err = fault("let f = fun(a) { a }; f(1, 2);");
    assert_eq!(err.code(), ErrorCode::E6002);
    assert_eq!(
        err.to_string(),
        "Trying to call f with 2 arguments, but expected 1"
    );
}

#[test]
fn test_native_arity_mismatch() {
    let err = fault("blu.system.type_of(1, 2);");
    assert_eq!(
        err.to_string(),
        "Trying to call system.type_of with 2 arguments, but expected 1"
    );
}

#[test]
fn test_not_callable() {
    assert_eq!(fault("let x = 1; x();").code(), ErrorCode::E6001);
}

#[test]
fn test_index_out_of_range() {
    let err = fault("let xs = [1, 2, 3]; print xs[3];");
    assert_eq!(err.code(), ErrorCode::E6005);
    assert_eq!(err.to_string(), "Index '3' out of range of '3'");
    assert_eq!(fault("print [1][-1];").code(), ErrorCode::E6005);
}

#[test]
fn test_operand_kinds() {
    assert_eq!(fault(r#"print 1 + "a";"#).code(), ErrorCode::E6003);
    assert_eq!(fault(r#"print -"a";"#).code(), ErrorCode::E6003);
    assert_eq!(fault("print 1 @ 2;").code(), ErrorCode::E6003);
    assert_eq!(fault(r#"print 1 == "1";"#).code(), ErrorCode::E6003);
    assert_eq!(
        fault("let f = fun() {}; print f == f;").code(),
        ErrorCode::E6003
    );
    assert_eq!(fault("print len 5;").code(), ErrorCode::E6014);
    assert_eq!(fault("print 5[0];").code(), ErrorCode::E6014);
}

#[test]
fn test_fault_points_at_innermost_node() {
    let err = fault("let x = 1;\nprint x + \"a\";");
    assert_eq!(err.token.map(|t| t.line), Some(2));
}

#[test]
fn test_backtrace_lists_active_calls() {
    let source = "let inner = fun(x) { x + \"a\" };
let outer = fun(y) { inner(y) };
outer(1);";
    let err = fault(source);
    assert_eq!(err.code(), ErrorCode::E6003);
    let backtrace = err.backtrace.unwrap();
    let frames: Vec<String> = backtrace.frames().iter().map(ToString::to_string).collect();
    assert_eq!(frames.len(), 2);
    assert!(frames[0].starts_with("inner(x = 1) at 2:"), "{frames:?}");
    assert!(frames[1].starts_with("outer(y = 1) at 3:"), "{frames:?}");
}

#[test]
fn test_runaway_recursion_is_bounded() {
    let options = Options {
        max_call_depth: 50,
        ..Options::default()
    };
    let outcome = evaluate_with("let rec down = fun(n) { down(n + 1) }; down(0);", &options);
    let err = outcome.result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6009);
    assert_eq!(err.backtrace.map(|b| b.len()), Some(50));
}

#[test]
fn test_exit_signal_propagates() {
    let outcome = evaluate_with(
        "print 1; blu.system.exit(3); print 2;",
        &Options::default(),
    );
    assert_eq!(outcome.output, "1\n");
    let err = outcome.result.unwrap_err();
    assert!(matches!(err.control_flow, Some(ControlFlow::Exit(3))));
}

#[test]
fn test_failed_assertion() {
    let err = fault(r#"blu.system.assert(1 == 2, "nope");"#);
    assert_eq!(err.code(), ErrorCode::E6013);
    assert_eq!(err.to_string(), "system.assert: assertion failed: nope");
}

#[test]
fn test_import_without_loader() {
    let err = fault("let m = import lib.math;");
    assert_eq!(err.code(), ErrorCode::E6011);
    assert_eq!(
        err.to_string(),
        "Failed to import 'lib.math': no module loader is configured"
    );
}

#[test]
fn test_module_exports() {
    let options = Options {
        role: UnitRole::Module,
        ..Options::default()
    };
    let outcome = evaluate_with("let x = 1; let hidden = 2; export x;", &options);
    let exports = outcome.result.unwrap();
    assert_eq!(exports.len(), 1);
    assert_eq!(exports.get("x"), Some(&Value::Number(1.0)));
}

#[test]
fn test_unanalysed_pipe_is_internal_error() {
    let options = Options {
        analyse: false,
        ..Options::default()
    };
    let err = evaluate_with("print 1 |> f();", &options).result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E9001);
}

#[test]
fn test_duplicate_record_field_at_run_time() {
    let options = Options {
        analyse: false,
        ..Options::default()
    };
    let err = evaluate_with("print {a: 1, a: 2};", &options).result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6015);
}

#[test]
fn test_stray_return_ends_unit() {
    let options = Options {
        analyse: false,
        ..Options::default()
    };
    let outcome = evaluate_with("print 1; return; print 2;", &options);
    assert!(outcome.result.is_ok());
    assert_eq!(outcome.output, "1\n");
}
