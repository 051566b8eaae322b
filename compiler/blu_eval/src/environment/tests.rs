#![expect(clippy::unwrap_used, reason = "tests unwrap assignments known to succeed")]

use super::*;
use blu_ir::StringInterner;
use pretty_assertions::assert_eq;

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn test_inner_scope_shadows_and_pops() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::new();
    env.define(x, num(1.0));

    env.push_scope();
    env.define(x, num(2.0));
    assert_eq!(env.lookup(x), Some(num(2.0)));

    env.pop();
    assert_eq!(env.lookup(x), Some(num(1.0)));
}

#[test]
fn test_global_frame_survives_pop_and_truncate() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::new();
    env.define(x, num(1.0));
    env.pop();
    env.truncate(0);
    assert_eq!(env.depth(), 1);
    assert_eq!(env.lookup(x), Some(num(1.0)));
}

#[test]
fn test_assign_updates_innermost_binding() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::new();
    env.define(x, num(1.0));
    env.push_scope();
    env.define(x, num(2.0));

    env.assign(x, num(3.0)).unwrap();
    env.pop();
    assert_eq!(env.lookup(x), Some(num(1.0)));
    assert_eq!(env.assign(interner.intern("missing"), num(0.0)), Err(Unbound));
}

#[test]
fn test_record_frame_exposes_live_properties() {
    let interner = StringInterner::new();
    let (level, other) = (interner.intern("level"), interner.intern("other"));
    let record = RecordValue::from_entries([(level, num(1.0))]);
    let mut env = Environment::new();

    env.push_record(record.clone());
    assert_eq!(env.lookup(level), Some(num(1.0)));
    env.assign(level, num(2.0)).unwrap();
    env.define(other, num(5.0));
    env.pop();

    assert_eq!(record.get(level), Some(num(2.0)));
    assert_eq!(record.get(other), Some(num(5.0)));
    assert_eq!(env.lookup(level), None);
}

#[test]
fn test_active_record_wins_assignment() {
    let interner = StringInterner::new();
    let count = interner.intern("count");
    let mut env = Environment::new();
    env.define(count, num(100.0));

    let record = RecordValue::from_entries([(count, num(0.0))]);
    env.enter_record(record.clone());
    env.push_scope();
    env.assign(count, num(1.0)).unwrap();
    env.pop();
    env.leave_record();

    assert_eq!(record.get(count), Some(num(1.0)));
    assert_eq!(env.lookup(count), Some(num(100.0)));
}

#[test]
fn test_active_record_is_searched_last() {
    let interner = StringInterner::new();
    let (a, b) = (interner.intern("a"), interner.intern("b"));
    let mut env = Environment::new();
    env.define(a, num(1.0));
    env.enter_record(RecordValue::from_entries([(a, num(9.0)), (b, num(2.0))]));

    assert_eq!(env.lookup(a), Some(num(1.0)));
    assert_eq!(env.lookup(b), Some(num(2.0)));
    assert!(env.is_bound(b));
}

#[test]
fn test_globals_snapshot() {
    let interner = StringInterner::new();
    let (g, local) = (interner.intern("g"), interner.intern("local"));
    let mut env = Environment::new();
    env.define(g, num(1.0));
    env.push_scope();
    env.define(local, num(2.0));

    let globals = env.globals();
    assert_eq!(globals.len(), 1);
    assert_eq!(globals.get(&g), Some(&num(1.0)));
}
