//! Diagnostic call stack.
//!
//! Independent of the scope stack: it records which functions are running and
//! with what arguments, so a fault can report how it was reached. The depth
//! check lives in `push()`.

use blu_ir::{Name, StringInterner, Token};

use crate::errors::{self, BacktraceFrame, EvalBacktrace, EvalError};
use crate::Value;

/// Default bound on nested Blu calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// A running call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Binding the function was first stored in, if any.
    pub name: Option<Name>,
    /// Parameters with the values they were bound to.
    pub params: Vec<(Name, Value)>,
    /// Source location of the call expression.
    pub call_site: Option<Token>,
}

#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame. The frame is not pushed when the limit is reached.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(errors::stack_exhausted(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop() on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Snapshot the live frames, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: frame
                    .name
                    .map_or_else(|| "<anonymous>".to_owned(), |n| interner.lookup(n).to_owned()),
                args: frame
                    .params
                    .iter()
                    .map(|(name, value)| {
                        format!("{} = {}", interner.lookup(*name), value.display(interner))
                    })
                    .collect(),
                call_site: frame.call_site,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the error already has one (it was raised
    /// deeper) or is a control-flow signal.
    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() || err.is_control_flow() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CALL_DEPTH)
    }
}

#[cfg(test)]
mod tests;
