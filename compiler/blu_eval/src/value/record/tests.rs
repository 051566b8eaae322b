use super::*;
use crate::FunctionValue;
use blu_ir::{Expr, ExprArena, ExprKind, StringInterner};
use pretty_assertions::assert_eq;

/// A zero-parameter function with an empty body.
fn empty_function() -> FunctionValue {
    let mut arena = ExprArena::new();
    let body = arena.alloc(Expr::new(ExprKind::Body(Vec::new()), None));
    let func = arena.alloc(Expr::new(
        ExprKind::Function {
            params: Vec::new(),
            body,
        },
        None,
    ));
    FunctionValue::new(SharedArena::new(arena), func)
}

#[test]
fn test_from_entries_later_duplicate_wins() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let record = RecordValue::from_entries([(a, Value::Number(1.0)), (a, Value::Number(2.0))]);
    assert_eq!(record.len(), 1);
    assert_eq!(record.get(a), Some(Value::Number(2.0)));
}

#[test]
fn test_shallow_clone_is_isolated() {
    let interner = StringInterner::new();
    let v = interner.intern("v");
    let original = RecordValue::from_entries([(v, Value::Number(1.0))]);
    let copy = original.shallow_clone();

    copy.set(v, Value::Number(2.0));
    assert_eq!(original.get(v), Some(Value::Number(1.0)));
    assert_eq!(copy.get(v), Some(Value::Number(2.0)));
    assert!(!copy.ptr_eq(&original));
}

#[test]
fn test_shallow_clone_shares_nested_records() {
    let interner = StringInterner::new();
    let (inner_name, n) = (interner.intern("inner"), interner.intern("n"));
    let inner = RecordValue::from_entries([(n, Value::Number(1.0))]);
    let outer = RecordValue::from_entries([(inner_name, Value::Record(inner.clone()))]);

    let copy = outer.shallow_clone();
    let Some(Value::Record(shared)) = copy.get(inner_name) else {
        panic!("nested record missing from copy");
    };
    assert!(shared.ptr_eq(&inner));
}

#[test]
fn test_set_rebinds_functions() {
    let interner = StringInterner::new();
    let f = interner.intern("f");
    let record = RecordValue::new();
    record.set(f, Value::Function(empty_function()));

    let Some(Value::Function(stored)) = record.get(f) else {
        panic!("function property missing");
    };
    assert!(stored.receiver().is_some_and(|r| r.ptr_eq(&record)));

    let copy = record.shallow_clone();
    let Some(Value::Function(copied)) = copy.get(f) else {
        panic!("function property missing from copy");
    };
    assert!(copied.receiver().is_some_and(|r| r.ptr_eq(&copy)));
}

#[test]
fn test_receiver_does_not_keep_record_alive() {
    let interner = StringInterner::new();
    let f = interner.intern("f");
    let record = RecordValue::new();
    record.set(f, Value::Function(empty_function()));
    let Some(Value::Function(stored)) = record.get(f) else {
        panic!("function property missing");
    };
    drop(record);
    assert!(stored.receiver().is_none());
}

#[test]
fn test_function_read_out_holds_its_record() {
    let interner = StringInterner::new();
    let f = interner.intern("f");
    let record = RecordValue::new();
    record.set(f, Value::Function(empty_function()));
    let Some(Value::Function(stored)) = record.get(f) else {
        panic!("function property missing");
    };
    let held = stored.holding_receiver();
    let identity = record.identity();
    drop(record);
    assert!(held.receiver().is_some_and(|r| r.identity() == identity));
}

#[test]
fn test_instances_remember_their_class() {
    let mut arena = ExprArena::new();
    let object = arena.alloc(Expr::new(
        ExprKind::Object {
            params: Some(Vec::new()),
            composed: Vec::new(),
            members: Vec::new(),
        },
        None,
    ));
    let class = RecordValue::class(ObjectTemplate {
        arena: SharedArena::new(arena),
        expr: object,
    });
    assert!(class.template().is_some());
    assert!(class.is_empty());

    let instance = RecordValue::instance_of(&class);
    assert!(instance.template().is_none());
    assert!(instance.parent().is_some_and(|p| p.ptr_eq(&class)));
}
