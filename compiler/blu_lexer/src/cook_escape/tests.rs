#![expect(clippy::unwrap_used, reason = "tests unwrap cooked strings")]

use super::*;
use blu_ir::Span;

fn token() -> Token {
    Token::new(Span::DUMMY, 1, 1)
}

#[test]
fn test_plain_content_is_unchanged() {
    assert_eq!(cook("hello world", token()).unwrap(), "hello world");
}

#[test]
fn test_known_escapes() {
    assert_eq!(cook(r#"a\nb\t\\\'\""#, token()).unwrap(), "a\nb\t\\'\"");
}

#[test]
fn test_unknown_escape_is_error() {
    let err = cook(r"bad\q", token()).unwrap_err();
    assert_eq!(
        err,
        LexError::InvalidEscape {
            escape: 'q',
            line: 1,
            column: 1
        }
    );
}
