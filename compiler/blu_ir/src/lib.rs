//! Blu IR - shared representation types for the Blu interpreter.
//!
//! - Spans and source tokens for locations
//! - Names for interned identifiers
//! - The expression arena holding the AST
//!
//! The AST is flat: nodes refer to each other through `ExprId` indices into
//! an `ExprArena`. Analysis mutates the arena in place (pipe desugaring), then
//! the arena is frozen into a `SharedArena` that function values carry.

mod arena;
pub mod ast;
mod interner;
mod name;
mod resolver;
mod span;

pub use arena::{ExprArena, SharedArena};
pub use ast::{
    ArithmeticOp, BindingKind, ComparisonOp, EqualityOp, Expr, ExprId, ExprKind, Field, Ident,
    ImportKind, Literal, LogicalOp, Param, Program,
};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use resolver::NameResolver;
pub use span::{Span, Token};

/// Abort on an AST shape that a traversal does not handle.
///
/// The parser never produces such shapes, so reaching this is an internal
/// defect rather than a user error.
#[cold]
#[track_caller]
pub fn unreachable_node(context: &str, kind: &ExprKind) -> ! {
    panic!("unreachable node in {context}: {kind:?}")
}
