//! Blu diagnostics: error codes, diagnostics, a collecting queue and a
//! plain-text renderer.

mod diagnostic;
mod error_code;
mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
