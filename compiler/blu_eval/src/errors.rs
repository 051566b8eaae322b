//! Runtime errors and control-flow signals.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the data of each fault; the message is its
//! `Display`. Factory functions are the public constructors. Each kind maps
//! to one E6xxx code when the fault is reported as a diagnostic.
//!
//! `return` and `blu.system.exit` unwind through the same `Result` channel as
//! faults, marked by `control_flow`. They never reach the user as errors.

use blu_diagnostic::{Diagnostic, ErrorCode};
use blu_ir::Token;
use std::fmt;

use crate::Value;

/// Backtrace frames shown when a fault is reported.
pub const MAX_BACKTRACE_NOTES: usize = 16;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Non-error unwinding.
#[derive(Clone, Debug)]
pub enum ControlFlow {
    /// `return` out of the innermost function call.
    Return(Value),
    /// `blu.system.exit(code)`: stop the whole program.
    Exit(i32),
}

/// Typed error category for structured diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("Trying to call non-function value of kind {type_name}")]
    NotCallable { type_name: &'static str },

    #[error("Trying to call {name} with {got} arguments, but expected {expected}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Operator '{op}' cannot be applied to {left} and {right}")]
    BinaryTypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("{operation} expects a {expected}, got {got}")]
    WrongOperand {
        operation: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    #[error("Cannot find binding '{name}'")]
    UndefinedBinding { name: String },

    #[error("Index '{index}' out of range of '{len}'")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Cannot operate if on a non-boolean value of kind {got}")]
    NonBoolCondition { got: &'static str },

    #[error("Cannot use {got} values in to range")]
    NonNumericRange { got: &'static str },

    #[error("Record does not contain property '{property}'")]
    PropertyNotFound { property: String },

    #[error("Cannot {operation} a non-record value of kind {got}")]
    NotARecord {
        operation: &'static str,
        got: &'static str,
    },

    #[error("Call depth exceeded the limit of {depth}")]
    StackExhausted { depth: usize },

    #[error("Cannot find file path '{path}'")]
    ImportNotFound { path: String },

    #[error("Failed to import '{path}': {reason}")]
    ImportFailed { path: String, reason: String },

    #[error("Circular import of '{path}'")]
    CircularImport { path: String },

    #[error("{function}: {message}")]
    NativeFailed {
        function: &'static str,
        message: String,
    },

    #[error("Field '{field}' is already defined in this record")]
    DuplicateField { field: String },

    #[error("Cannot {action} a value of kind {got}")]
    InvalidTarget {
        action: &'static str,
        got: &'static str,
    },

    #[error("internal error: {message}")]
    Internal { message: String },

    /// Carrier for `ControlFlow`; never displayed to users.
    #[error("control flow signal")]
    Signal,
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotCallable { .. } => ErrorCode::E6001,
            Self::ArityMismatch { .. } => ErrorCode::E6002,
            Self::BinaryTypeMismatch { .. } | Self::WrongOperand { .. } => ErrorCode::E6003,
            Self::UndefinedBinding { .. } => ErrorCode::E6004,
            Self::IndexOutOfRange { .. } => ErrorCode::E6005,
            Self::NonBoolCondition { .. } => ErrorCode::E6006,
            Self::NonNumericRange { .. } => ErrorCode::E6007,
            Self::PropertyNotFound { .. } | Self::NotARecord { .. } => ErrorCode::E6008,
            Self::StackExhausted { .. } => ErrorCode::E6009,
            Self::ImportNotFound { .. } => ErrorCode::E6010,
            Self::ImportFailed { .. } => ErrorCode::E6011,
            Self::CircularImport { .. } => ErrorCode::E6012,
            Self::NativeFailed { .. } => ErrorCode::E6013,
            Self::InvalidTarget { .. } => ErrorCode::E6014,
            Self::DuplicateField { .. } => ErrorCode::E6015,
            Self::Internal { .. } | Self::Signal => ErrorCode::E9001,
        }
    }
}

/// One frame of a captured backtrace, innermost first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name, `<anonymous>` when the function was never bound.
    pub name: String,
    /// `name = value` for each bound parameter.
    pub args: Vec<String>,
    pub call_site: Option<Token>,
}

impl fmt::Display for BacktraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args.join(", "))?;
        if let Some(token) = self.call_site {
            write!(f, " at {token}")?;
        }
        Ok(())
    }
}

/// Snapshot of the call stack at the point a fault was raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        EvalBacktrace { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {frame}")?;
        }
        Ok(())
    }
}

/// Evaluation error or control-flow signal.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Position of the innermost node that was being evaluated.
    pub token: Option<Token>,
    pub backtrace: Option<EvalBacktrace>,
    pub control_flow: Option<ControlFlow>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            token: None,
            backtrace: None,
            control_flow: None,
        }
    }

    fn signal(flow: ControlFlow) -> Self {
        EvalError {
            control_flow: Some(flow),
            ..Self::from_kind(EvalErrorKind::Signal)
        }
    }

    /// Record where the fault happened, keeping an existing (more precise)
    /// position.
    #[must_use]
    pub fn located_at(mut self, token: Option<Token>) -> Self {
        if self.token.is_none() {
            self.token = token;
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[inline]
    pub fn is_control_flow(&self) -> bool {
        self.control_flow.is_some()
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Diagnostic with one note per backtrace frame, innermost first. Deep
    /// traces are cut after `MAX_BACKTRACE_NOTES` frames.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .at(self.token);
        if let Some(backtrace) = &self.backtrace {
            for frame in backtrace.frames().iter().take(MAX_BACKTRACE_NOTES) {
                diagnostic = diagnostic.with_note(format!("in {frame}"));
            }
            if backtrace.len() > MAX_BACKTRACE_NOTES {
                let omitted = backtrace.len() - MAX_BACKTRACE_NOTES;
                diagnostic = diagnostic.with_note(format!("... {omitted} more frames"));
            }
        }
        diagnostic
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for EvalError {}

// Control flow

pub fn return_signal(value: Value) -> EvalError {
    EvalError::signal(ControlFlow::Return(value))
}

pub fn exit_signal(code: i32) -> EvalError {
    EvalError::signal(ControlFlow::Exit(code))
}

// Calls

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn arity_mismatch(name: impl Into<String>, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.into(),
        expected,
        got,
    })
}

#[cold]
pub fn stack_exhausted(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackExhausted { depth })
}

// Operators

#[cold]
pub fn binary_type_mismatch(op: &'static str, left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch { op, left, right })
}

#[cold]
pub fn wrong_operand(operation: &'static str, expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongOperand {
        operation,
        expected,
        got,
    })
}

#[cold]
pub fn non_bool_condition(got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonBoolCondition { got })
}

#[cold]
pub fn non_numeric_range(got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonNumericRange { got })
}

// Names and access

#[cold]
pub fn undefined_binding(name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedBinding { name: name.into() })
}

#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index, len })
}

#[cold]
pub fn property_not_found(property: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PropertyNotFound {
        property: property.into(),
    })
}

#[cold]
pub fn not_a_record(operation: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotARecord { operation, got })
}

#[cold]
pub fn duplicate_field(field: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateField {
        field: field.into(),
    })
}

#[cold]
pub fn invalid_target(action: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidTarget { action, got })
}

// Modules

#[cold]
pub fn import_not_found(path: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImportNotFound { path: path.into() })
}

#[cold]
pub fn import_failed(path: impl Into<String>, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImportFailed {
        path: path.into(),
        reason: reason.into(),
    })
}

#[cold]
pub fn circular_import(path: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CircularImport { path: path.into() })
}

// Host

#[cold]
pub fn native_failed(function: &'static str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NativeFailed {
        function,
        message: message.into(),
    })
}

#[cold]
pub fn internal(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Internal {
        message: message.into(),
    })
}
