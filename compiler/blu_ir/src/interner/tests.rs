use super::*;

#[test]
fn test_intern_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("counter");
    let b = interner.intern("counter");
    assert_eq!(a, b);
    assert_eq!(interner.lookup(a), "counter");
}

#[test]
fn test_distinct_strings_get_distinct_names() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let b = interner.intern("b");
    assert_ne!(a, b);
    assert_eq!(interner.len(), 3);
}

#[test]
fn test_empty_string_is_preinterned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_shared_interner_sees_same_table() {
    let shared = SharedInterner::new();
    let clone = shared.clone();
    let name = shared.intern("main");
    assert_eq!(clone.lookup(name), "main");
}
