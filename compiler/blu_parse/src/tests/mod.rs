#![expect(clippy::unwrap_used, reason = "tests unwrap parse results")]


use crate::{parse_source, ParseOutput, SyntaxError};
use blu_ir::{ExprId, ExprKind, StringInterner};

pub(crate) fn parse_ok(source: &str) -> (ParseOutput, StringInterner) {
    let interner = StringInterner::new();
    let output = parse_source(source, &interner).unwrap();
    (output, interner)
}

pub(crate) fn parse_err(source: &str) -> SyntaxError {
    let interner = StringInterner::new();
    parse_source(source, &interner).unwrap_err()
}

/// Top-level statements of a parsed unit.
pub(crate) fn statements(output: &ParseOutput) -> Vec<ExprId> {
    match &output.arena.get(output.program.body).kind {
        ExprKind::Body(stmts) => stmts.clone(),
        other => panic!("program body is not a block: {other:?}"),
    }
}
