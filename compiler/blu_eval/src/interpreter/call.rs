//! Calls: user functions, natives and records.

use blu_ir::{ExprId, ExprKind, Token};
use smallvec::SmallVec;

use super::Interpreter;
use crate::errors::{self, ControlFlow, EvalError, EvalResult};
use crate::{CallFrame, FunctionValue, NativeFunction, RecordValue, Value};

/// Argument vectors rarely exceed four values.
type Args = SmallVec<[Value; 4]>;

impl Interpreter<'_> {
    /// Evaluate callee then arguments left to right, then call.
    pub(super) fn eval_call(
        &mut self,
        callee: ExprId,
        args: &[ExprId],
        call_site: Option<Token>,
    ) -> EvalResult {
        let callee = self.eval(callee)?;
        let mut values = Args::with_capacity(args.len());
        for &arg in args {
            values.push(self.eval(arg)?);
        }
        self.call_value(&callee, &values, call_site)
    }

    /// Call any callable value.
    ///
    /// A class record builds an instance; any other record is cloned when
    /// called without arguments.
    pub fn call_value(
        &mut self,
        callee: &Value,
        args: &[Value],
        call_site: Option<Token>,
    ) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args, call_site),
            Value::Native(native) => call_native(native, args),
            Value::Record(record) => self.call_record(record, args, call_site),
            other => Err(errors::not_callable(other.type_name())),
        }
    }

    fn call_function(
        &mut self,
        func: &FunctionValue,
        args: &[Value],
        call_site: Option<Token>,
    ) -> EvalResult {
        let params = func.params();
        if params.len() != args.len() {
            let name = func.name().map_or("function", |name| self.text(name));
            return Err(errors::arity_mismatch(name, params.len(), args.len()));
        }

        let bound: Vec<_> = params
            .iter()
            .zip(args)
            .map(|(param, arg)| (param.name, arg.clone()))
            .collect();
        self.call_stack.push(CallFrame {
            name: func.name(),
            params: bound.clone(),
            call_site,
        })?;
        tracing::trace!(
            function = func.name().map_or("<anonymous>", |name| self.text(name)),
            depth = self.call_stack.depth(),
            "call"
        );

        let saved_arena = std::mem::replace(&mut self.arena, func.arena().clone());
        let depth = self.env.depth();
        let receiver = func.receiver();
        if let Some(record) = &receiver {
            self.env.push_record(record.clone());
            self.env.enter_record(record.clone());
        }
        self.env.push_scope();
        for (name, value) in bound {
            self.env.define(name, value);
        }

        let result = self.eval_function_body(func.body());

        self.env.truncate(depth);
        if receiver.is_some() {
            self.env.leave_record();
        }
        self.arena = saved_arena;
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err, self.interner));
        self.call_stack.pop();

        result.or_else(catch_return)
    }

    /// The body runs in the parameter frame; a block body does not get a
    /// frame of its own.
    fn eval_function_body(&mut self, body: ExprId) -> EvalResult {
        let arena = self.arena.clone();
        match &arena.get(body).kind {
            ExprKind::Body(stmts) => self.eval_statements(stmts),
            _ => self.eval(body),
        }
    }

    fn call_record(
        &mut self,
        record: &RecordValue,
        args: &[Value],
        call_site: Option<Token>,
    ) -> EvalResult {
        if let Some(template) = record.template() {
            return self.instantiate(record, &template, args, call_site);
        }
        if !args.is_empty() {
            return Err(errors::arity_mismatch("record", 0, args.len()));
        }
        Ok(Value::Record(record.shallow_clone()))
    }
}

/// A `return` unwinding out of a call becomes the call's value.
fn catch_return(err: EvalError) -> EvalResult {
    match err.control_flow {
        Some(ControlFlow::Return(value)) => Ok(value),
        flow => Err(EvalError {
            control_flow: flow,
            ..err
        }),
    }
}

fn call_native(native: &NativeFunction, args: &[Value]) -> EvalResult {
    if args.len() != native.arity() {
        return Err(errors::arity_mismatch(native.name, native.arity(), args.len()));
    }
    (native.func)(args)
}
