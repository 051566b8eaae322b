//! Blu Eval - tree-walking evaluator for Blu programs.
//!
//! # Architecture
//!
//! - `Value`: the closed set of runtime values, with `RecordValue` as the
//!   only shared mutable aggregate
//! - `Environment`: one explicit scope stack per unit; name lookup is dynamic
//!   (the caller's live frames are visible to the callee)
//! - `CallStack`: diagnostic call frames, independent of the scope stack,
//!   captured into an `EvalBacktrace` when a fault escapes
//! - `Interpreter`: evaluates an analysed unit, delegating `import` to a
//!   `ModuleLoader`
//! - natives: the host functions published under the reserved `blu` binding

mod environment;
pub mod errors;
mod interpreter;
mod loader;
pub mod natives;
mod print_handler;
mod stack;
mod value;

pub use environment::Environment;
pub use errors::{BacktraceFrame, ControlFlow, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use loader::{ImportRequest, ModuleLoader, NoModuleLoader};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use stack::{CallFrame, CallStack, DEFAULT_MAX_CALL_DEPTH};
pub use value::{
    FunctionValue, HostValue, NativeFn, NativeFunction, ObjectTemplate, RecordValue, Value,
    ValueDisplay, WeakRecord,
};
