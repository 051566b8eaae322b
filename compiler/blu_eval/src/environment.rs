//! Run-time scope stack.
//!
//! One `Environment` per unit. Frames are either plain local maps or record
//! frames that expose a record's live properties (record-bound calls and
//! environment-open blocks). Lookup is dynamic: a callee's frames sit on top
//! of its caller's, so free names resolve against whatever is live.

use blu_ir::{Name, NameResolver};
use rustc_hash::FxHashMap;

use crate::{RecordValue, Value};

#[derive(Debug)]
enum Frame {
    Locals(FxHashMap<Name, Value>),
    Record(RecordValue),
}

/// Assignment found no binding or property with the name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Unbound;

#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
    /// Receivers of the record-bound calls in progress, innermost last.
    active_records: Vec<RecordValue>,
}

impl Environment {
    /// An environment with one (global) frame.
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::Locals(FxHashMap::default())],
            active_records: Vec::new(),
        }
    }

    /// Number of frames, for `truncate`.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_scope(&mut self) {
        self.frames.push(Frame::Locals(FxHashMap::default()));
    }

    /// Expose `record`'s properties as a frame.
    pub fn push_record(&mut self, record: RecordValue) {
        self.frames.push(Frame::Record(record));
    }

    /// Pop the innermost frame. The global frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Drop frames until `depth` remain.
    pub fn truncate(&mut self, depth: usize) {
        self.frames.truncate(depth.max(1));
    }

    pub fn enter_record(&mut self, record: RecordValue) {
        self.active_records.push(record);
    }

    pub fn leave_record(&mut self) {
        self.active_records.pop();
    }

    pub fn active_record(&self) -> Option<&RecordValue> {
        self.active_records.last()
    }

    /// Bind `name` in the innermost frame, overwriting a binding of the same
    /// name there. In a record frame this sets a property.
    pub fn define(&mut self, name: Name, value: Value) {
        match self.frames.last_mut() {
            Some(Frame::Locals(locals)) => {
                locals.insert(name, value);
            }
            Some(Frame::Record(record)) => record.set(name, value),
            None => {
                let mut locals = FxHashMap::default();
                locals.insert(name, value);
                self.frames.push(Frame::Locals(locals));
            }
        }
    }

    /// Innermost frame first, then the active record.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| match frame {
                Frame::Locals(locals) => locals.get(&name).cloned(),
                Frame::Record(record) => record.get(name),
            })
            .or_else(|| self.active_record().and_then(|record| record.get(name)))
    }

    /// Overwrite an existing binding. The active record wins when it has the
    /// name; otherwise the innermost frame that binds it.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), Unbound> {
        if let Some(record) = self.active_record() {
            if record.has(name) {
                record.set(name, value);
                return Ok(());
            }
        }
        for frame in self.frames.iter_mut().rev() {
            match frame {
                Frame::Locals(locals) => {
                    if let Some(slot) = locals.get_mut(&name) {
                        *slot = value;
                        return Ok(());
                    }
                }
                Frame::Record(record) => {
                    if record.has(name) {
                        record.set(name, value);
                        return Ok(());
                    }
                }
            }
        }
        Err(Unbound)
    }

    /// Bindings of the global frame.
    pub fn globals(&self) -> FxHashMap<Name, Value> {
        match self.frames.first() {
            Some(Frame::Locals(locals)) => locals.clone(),
            Some(Frame::Record(record)) => record.entries().into_iter().collect(),
            None => FxHashMap::default(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl NameResolver for Environment {
    type Entry = Value;

    fn resolve(&self, name: Name) -> Option<Value> {
        self.lookup(name)
    }
}

#[cfg(test)]
mod tests;
