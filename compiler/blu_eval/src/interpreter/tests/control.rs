use blu_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{fault, output};

#[test]
fn test_for_counts_half_open_range() {
    assert_eq!(output("for 0 to 3 { print idx; }"), "0\n1\n2\n");
    assert_eq!(output("for 3 to 3 { print idx; }"), "");
    assert_eq!(output("for 5 to 2 { print idx; }"), "");
    assert_eq!(output("for 0.9 to 2.5 { print idx; }"), "0\n1\n");
}

#[test]
fn test_for_body_can_update_outer_bindings() {
    assert_eq!(
        output("let mut total = 0; for 0 to 4 { total <- total + idx; } print total;"),
        "6\n"
    );
}

#[test]
fn test_for_rejects_non_numbers() {
    let err = fault(r#"for "a" to 3 {}"#);
    assert_eq!(err.code(), ErrorCode::E6007);
}

#[test]
fn test_if_branches() {
    assert_eq!(output("if 1 < 2 then { print 1; } else { print 2; }"), "1\n");
    assert_eq!(
        output("if false then { print 1; } else if true then { print 2; }"),
        "2\n"
    );
    assert_eq!(output("print if true then { 1 } else { 2 };"), "1\n");
    assert_eq!(output("print if false then { 1 };"), "nil\n");
}

#[test]
fn test_if_requires_bool() {
    let err = fault("if 1 then { print 1; }");
    assert_eq!(err.code(), ErrorCode::E6006);
}

#[test]
fn test_blocks_do_not_leak_bindings() {
    assert_eq!(
        output("let x = 1; { let x = 2; print x; } print x;"),
        "2\n1\n"
    );
}

proptest! {
    #[test]
    fn for_visits_each_index_once_in_order(start in -20i32..20, end in -20i32..20) {
        let source = format!("for {start} to {end} {{ print idx; }}");
        let expected: String = (start..end).map(|i| format!("{i}\n")).collect();
        prop_assert_eq!(output(&source), expected);
    }
}
