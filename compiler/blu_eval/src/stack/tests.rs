#![expect(clippy::unwrap_used, reason = "tests unwrap setup results")]

use super::*;
use blu_diagnostic::ErrorCode;
use blu_ir::{Span, Token};
use pretty_assertions::assert_eq;

fn frame(name: Option<Name>, params: Vec<(Name, Value)>) -> CallFrame {
    CallFrame {
        name,
        params,
        call_site: Some(Token::new(Span::DUMMY, 1, 4)),
    }
}

#[test]
fn test_push_stops_at_limit() {
    let mut stack = CallStack::new(2);
    assert!(stack.push(frame(None, Vec::new())).is_ok());
    assert!(stack.push(frame(None, Vec::new())).is_ok());

    let err = stack.push(frame(None, Vec::new())).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6009);
    assert_eq!(stack.depth(), 2);

    stack.pop();
    assert_eq!(stack.depth(), 1);
}

#[test]
fn test_capture_is_most_recent_first() {
    let interner = StringInterner::new();
    let (outer, inner, x) = (
        interner.intern("outer"),
        interner.intern("inner"),
        interner.intern("x"),
    );
    let mut stack = CallStack::default();
    stack.push(frame(Some(outer), Vec::new())).unwrap();
    stack
        .push(frame(Some(inner), vec![(x, Value::string("hi"))]))
        .unwrap();
    stack.push(frame(None, Vec::new())).unwrap();

    let backtrace = stack.capture(&interner);
    let names: Vec<_> = backtrace.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["<anonymous>", "inner", "outer"]);
    assert_eq!(backtrace.frames()[1].args, vec!["x = hi".to_owned()]);
}

#[test]
fn test_attach_backtrace_keeps_innermost() {
    let interner = StringInterner::new();
    let mut stack = CallStack::default();
    stack.push(frame(Some(interner.intern("f")), Vec::new())).unwrap();

    let err = stack.attach_backtrace(errors::internal("x"), &interner);
    assert_eq!(err.backtrace.as_ref().map(EvalBacktrace::len), Some(1));

    stack.push(frame(Some(interner.intern("g")), Vec::new())).unwrap();
    let again = stack.attach_backtrace(err, &interner);
    assert_eq!(again.backtrace.as_ref().map(EvalBacktrace::len), Some(1));
}

#[test]
fn test_attach_backtrace_skips_signals_and_empty_stack() {
    let interner = StringInterner::new();
    let mut stack = CallStack::default();
    let err = stack.attach_backtrace(errors::internal("x"), &interner);
    assert!(err.backtrace.is_none());

    stack.push(frame(None, Vec::new())).unwrap();
    let signal = stack.attach_backtrace(errors::return_signal(Value::Nil), &interner);
    assert!(signal.backtrace.is_none());
}
