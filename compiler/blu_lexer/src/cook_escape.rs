//! Escape processing for string literals.
//!
//! Both quote styles accept the same escapes: `\n` `\t` `\r` `\0` `\\`
//! `\"` `\'`.

use blu_ir::Token;

use crate::LexError;

/// Cook the content between the quotes.
pub(crate) fn cook(content: &str, token: Token) -> Result<String, LexError> {
    if !content.contains('\\') {
        return Ok(content.to_owned());
    }

    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            other => {
                return Err(LexError::InvalidEscape {
                    escape: other.unwrap_or(' '),
                    line: token.line,
                    column: token.column,
                })
            }
        };
        out.push(escaped);
    }
    Ok(out)
}

#[cfg(test)]
mod tests;
