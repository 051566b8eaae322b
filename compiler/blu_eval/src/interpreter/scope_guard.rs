//! RAII scope guards for the interpreter's scope stack.
//!
//! The guard holds `&mut Interpreter` and derefs to it, so evaluation goes
//! through the guard. Dropping it truncates the scope stack back to its
//! depth before the guard was taken, including when evaluation bails out
//! early with `?`.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::RecordValue;

pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
    depth: usize,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.truncate(self.depth);
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'interp> Interpreter<'interp> {
    /// Push a local frame, popped when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'interp> {
        let depth = self.env.depth();
        self.env.push_scope();
        ScopedInterpreter {
            interpreter: self,
            depth,
        }
    }

    /// Push a frame exposing `record`'s properties, popped when the guard
    /// drops.
    pub fn scoped_record(&mut self, record: RecordValue) -> ScopedInterpreter<'_, 'interp> {
        let depth = self.env.depth();
        self.env.push_record(record);
        ScopedInterpreter {
            interpreter: self,
            depth,
        }
    }
}
