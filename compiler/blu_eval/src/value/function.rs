//! Function values.

use blu_ir::{unreachable_node, ExprId, ExprKind, Name, Param, SharedArena};

use super::{RecordValue, Value, WeakRecord};
use crate::EvalError;

/// A user function: a `Function` node in some unit's arena.
///
/// Functions do not capture their defining scope. A function stored in a
/// record remembers that record as its receiver, and calls expose the
/// receiver's properties beneath the parameter frame.
#[derive(Clone, Debug)]
pub struct FunctionValue {
    arena: SharedArena,
    expr: ExprId,
    name: Option<Name>,
    receiver: Option<Receiver>,
}

/// A stored function points back at its record weakly, or the record would
/// own itself. A function read out of a record holds it.
#[derive(Clone, Debug)]
enum Receiver {
    Stored(WeakRecord),
    Held(RecordValue),
}

impl FunctionValue {
    pub fn new(arena: SharedArena, expr: ExprId) -> Self {
        FunctionValue {
            arena,
            expr,
            name: None,
            receiver: None,
        }
    }

    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }

    pub fn name(&self) -> Option<Name> {
        self.name
    }

    /// Name the function after the binding it was first stored in. Later
    /// rebindings keep the first name.
    #[must_use]
    pub fn named(mut self, name: Name) -> Self {
        self.name.get_or_insert(name);
        self
    }

    #[must_use]
    pub fn bound_to(mut self, record: &RecordValue) -> Self {
        self.receiver = Some(Receiver::Stored(record.downgrade()));
        self
    }

    /// Keep the receiver alive for as long as this value is. Used when a
    /// function is read out of a record that may be a temporary.
    #[must_use]
    pub fn holding_receiver(mut self) -> Self {
        if let Some(Receiver::Stored(weak)) = &self.receiver {
            self.receiver = weak.upgrade().map(Receiver::Held);
        }
        self
    }

    /// The record this function was last stored in, if it is still alive.
    pub fn receiver(&self) -> Option<RecordValue> {
        match self.receiver.as_ref()? {
            Receiver::Stored(weak) => weak.upgrade(),
            Receiver::Held(record) => Some(record.clone()),
        }
    }

    pub fn params(&self) -> &[Param] {
        match &self.arena.get(self.expr).kind {
            ExprKind::Function { params, .. } => params,
            other => unreachable_node("function value", other),
        }
    }

    pub fn body(&self) -> ExprId {
        match &self.arena.get(self.expr).kind {
            ExprKind::Function { body, .. } => *body,
            other => unreachable_node("function value", other),
        }
    }

    /// Same node in the same arena, regardless of receiver.
    pub fn same_definition(&self, other: &FunctionValue) -> bool {
        self.expr == other.expr && self.arena.ptr_eq(&other.arena)
    }
}

pub type NativeFn = fn(&[Value]) -> Result<Value, EvalError>;

/// A host function with fixed parameter names.
#[derive(Copy, Clone, Debug)]
pub struct NativeFunction {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub func: NativeFn,
}

impl NativeFunction {
    pub const fn new(name: &'static str, params: &'static [&'static str], func: NativeFn) -> Self {
        NativeFunction { name, params, func }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
