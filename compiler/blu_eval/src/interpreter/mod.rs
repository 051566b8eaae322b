//! Tree-walking interpreter.
//!
//! One `Interpreter` evaluates one analysed unit. It owns that unit's scope
//! stack and call stack; imports go through the `ModuleLoader` it was built
//! with, which evaluates the imported unit in an interpreter of its own.
//!
//! The arena being evaluated changes during a call: a function or class
//! imported from another unit runs against that unit's arena, and the
//! caller's arena is restored afterwards.

mod builder;
mod call;
mod object;
mod operators;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use blu_ir::{
    BindingKind, Expr, ExprId, ExprKind, Field, Ident, ImportKind, Literal, LogicalOp, Name,
    Program, SharedArena, StringInterner,
};
use rustc_hash::FxHashMap;
use std::path::PathBuf;
use std::rc::Rc;

use crate::errors::{self, ControlFlow, EvalError, EvalResult};
use crate::{
    CallStack, Environment, FunctionValue, ImportRequest, ModuleLoader, RecordValue,
    SharedPrintHandler, Value,
};

/// Names the evaluator treats specially.
#[derive(Copy, Clone)]
struct KnownNames {
    main: Name,
    idx: Name,
}

pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    /// Arena of the code currently being evaluated.
    arena: SharedArena,
    env: Environment,
    call_stack: CallStack,
    print_handler: SharedPrintHandler,
    loader: &'a dyn ModuleLoader,
    /// Directory of this unit, for relative imports.
    unit_dir: PathBuf,
    exports: FxHashMap<Name, Value>,
    names: KnownNames,
}

impl<'a> Interpreter<'a> {
    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// Evaluate a unit's top level in the global frame and return its
    /// exports.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, program: Program) -> Result<FxHashMap<Name, Value>, EvalError> {
        let stmts = self.statements(program.body);
        for stmt in stmts {
            match self.eval(stmt) {
                Ok(_) => {}
                // A stray top-level return ends the unit.
                Err(err) if matches!(err.control_flow, Some(ControlFlow::Return(_))) => break,
                Err(err) => {
                    tracing::debug!(error = %err, "unit failed");
                    return Err(err);
                }
            }
        }
        tracing::debug!(exports = self.exports.len(), "unit finished");
        Ok(std::mem::take(&mut self.exports))
    }

    /// Call the top-level `main` if it is a function without parameters.
    /// Returns `Ok(None)` when there is no such function.
    pub fn invoke_main(&mut self) -> Result<Option<Value>, EvalError> {
        let Some(main) = self.env.lookup(self.names.main) else {
            return Ok(None);
        };
        match &main {
            Value::Function(func) if func.params().is_empty() => {
                self.call_value(&main, &[], None).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Evaluate one node.
    pub fn eval(&mut self, id: ExprId) -> EvalResult {
        blu_stack::ensure_sufficient_stack(|| {
            let arena = self.arena.clone();
            let expr = arena.get(id);
            self.eval_expr(id, expr).map_err(|err| {
                if err.is_control_flow() {
                    err
                } else {
                    err.located_at(expr.token)
                }
            })
        })
    }

    fn text(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Statements of a body node; any other node is a one-statement body.
    fn statements(&self, id: ExprId) -> Vec<ExprId> {
        match &self.arena.get(id).kind {
            ExprKind::Body(stmts) => stmts.clone(),
            _ => vec![id],
        }
    }

    /// Evaluate statements in the current frame; the last value is the
    /// result.
    fn eval_statements(&mut self, stmts: &[ExprId]) -> EvalResult {
        let mut last = Value::Nil;
        for &stmt in stmts {
            last = self.eval(stmt)?;
        }
        Ok(last)
    }

    fn eval_expr(&mut self, id: ExprId, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Body(stmts) => self.scoped().eval_statements(stmts),
            ExprKind::Binding { name, kind, value, .. } => self.eval_binding(*name, *kind, *value),
            ExprKind::Function { .. } => {
                Ok(Value::Function(FunctionValue::new(self.arena.clone(), id)))
            }
            ExprKind::Call { callee, args } => self.eval_call(*callee, args, expr.token),
            ExprKind::Ident(name) => self
                .env
                .lookup(*name)
                .ok_or_else(|| errors::undefined_binding(self.text(*name))),
            ExprKind::Literal(literal) => Ok(self.eval_literal(*literal)),
            ExprKind::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for &item in items {
                    values.push(self.eval(item)?);
                }
                Ok(Value::list(values))
            }
            ExprKind::Record(fields) => self.eval_record_literal(fields),
            ExprKind::Index { target, index } => self.eval_index(*target, *index),
            ExprKind::Property { target, name } => {
                let target = self.eval(*target)?;
                let Value::Record(record) = &target else {
                    return Err(errors::not_a_record("access a property of", target.type_name()));
                };
                match record.get(*name) {
                    // The record may be a temporary, e.g. `Point(1, 2).sum()`.
                    Some(Value::Function(func)) => Ok(Value::Function(func.holding_receiver())),
                    Some(value) => Ok(value),
                    None => Err(errors::property_not_found(self.text(*name))),
                }
            }
            ExprKind::Len(target) => {
                let target = self.eval(*target)?;
                let len = match &target {
                    Value::List(items) => items.len(),
                    Value::Str(s) => s.chars().count(),
                    other => return Err(errors::invalid_target("take the length of", other.type_name())),
                };
                Ok(Value::Number(usize_to_f64(len)))
            }
            ExprKind::For { start, end, body } => self.eval_for(*start, *end, *body),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.eval(*cond)?;
                match cond {
                    Value::Bool(true) => self.eval(*then_branch),
                    Value::Bool(false) => match else_branch {
                        Some(else_branch) => self.eval(*else_branch),
                        None => Ok(Value::Nil),
                    },
                    other => Err(errors::non_bool_condition(other.type_name())),
                }
            }
            ExprKind::Assign { target, value } => self.eval_assign(*target, *value),
            ExprKind::Logical { op, lhs, rhs } => self.eval_logical(*op, *lhs, *rhs),
            ExprKind::Equality { op, lhs, rhs } => {
                let lhs = self.eval(*lhs)?;
                let rhs = self.eval(*rhs)?;
                operators::equality(*op, &lhs, &rhs)
            }
            ExprKind::Comparison { op, lhs, rhs } => {
                let lhs = self.eval(*lhs)?;
                let rhs = self.eval(*rhs)?;
                operators::comparison(*op, &lhs, &rhs)
            }
            ExprKind::Arithmetic { op, lhs, rhs } => {
                let lhs = self.eval(*lhs)?;
                let rhs = self.eval(*rhs)?;
                operators::arithmetic(*op, &lhs, &rhs)
            }
            ExprKind::Negate(operand) => {
                let operand = self.eval(*operand)?;
                operators::negate(&operand)
            }
            ExprKind::Prepend { item, list } => {
                let item = self.eval(*item)?;
                let list = self.eval(*list)?;
                operators::prepend(item, &list)
            }
            ExprKind::Pipe { rhs, desugared, .. } => {
                if *desugared {
                    self.eval(*rhs)
                } else {
                    Err(errors::internal("pipe reached evaluation without being desugared"))
                }
            }
            ExprKind::Object {
                params,
                composed,
                members,
            } => self.eval_object(id, params.is_some(), composed, members),
            ExprKind::Clone(target) => Ok(match self.eval(*target)? {
                Value::Record(record) => Value::Record(record.shallow_clone()),
                Value::List(items) => Value::List(Rc::new(items.as_ref().clone())),
                other => other,
            }),
            ExprKind::EnvOpen { target, body } => {
                let target = self.eval(*target)?;
                let Value::Record(record) = target else {
                    return Err(errors::not_a_record("open", target.type_name()));
                };
                self.scoped_record(record).eval(*body)
            }
            ExprKind::Import { kind, path } => self.eval_import(*kind, path),
            ExprKind::Export(names) => self.eval_export(names),
            ExprKind::Print(args) => {
                let mut line = String::new();
                for &arg in args {
                    let value = self.eval(arg)?;
                    line.push_str(&value.display(self.interner).to_string());
                }
                self.print_handler.println(&line);
                Ok(Value::Nil)
            }
            ExprKind::Return(value) => {
                let value = match value {
                    Some(value) => self.eval(*value)?,
                    None => Value::Nil,
                };
                Err(errors::return_signal(value))
            }
        }
    }

    fn eval_literal(&self, literal: Literal) -> Value {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Bool(b) => Value::Bool(b),
            Literal::Number(n) => Value::Number(n),
            Literal::Str(name) => Value::string(self.text(name)),
        }
    }

    /// Binds in the innermost frame and yields the bound value. A recursive
    /// binding exists (as nil) while its initializer runs.
    fn eval_binding(&mut self, name: Name, kind: BindingKind, value: ExprId) -> EvalResult {
        if kind == BindingKind::Recursive {
            self.env.define(name, Value::Nil);
        }
        let value = name_function(self.eval(value)?, name);
        self.env.define(name, value.clone());
        Ok(value)
    }

    fn eval_record_literal(&mut self, fields: &[Field]) -> EvalResult {
        let record = RecordValue::new();
        for field in fields {
            let value = self.eval(field.value)?;
            if record.has(field.name) {
                return Err(errors::duplicate_field(self.text(field.name)).located_at(field.token));
            }
            record.set(field.name, name_function(value, field.name));
        }
        Ok(Value::Record(record))
    }

    fn eval_index(&mut self, target: ExprId, index: ExprId) -> EvalResult {
        let target = self.eval(target)?;
        let index = self.eval(index)?;
        let Value::Number(n) = index else {
            return Err(errors::wrong_operand("index", "number", index.type_name()));
        };
        let i = truncate(n);
        match &target {
            Value::List(items) => usize::try_from(i)
                .ok()
                .and_then(|i| items.get(i).cloned())
                .ok_or_else(|| errors::index_out_of_range(i, items.len())),
            Value::Str(s) => usize::try_from(i)
                .ok()
                .and_then(|i| s.chars().nth(i))
                .map(Value::Char)
                .ok_or_else(|| errors::index_out_of_range(i, s.chars().count())),
            other => Err(errors::invalid_target("index", other.type_name())),
        }
    }

    /// `for start to end`: the half-open integer range, with a fresh `idx`
    /// frame per iteration.
    fn eval_for(&mut self, start: ExprId, end: ExprId, body: ExprId) -> EvalResult {
        let start = self.eval(start)?;
        let end = self.eval(end)?;
        let (start, end) = match (&start, &end) {
            (Value::Number(s), Value::Number(e)) => (truncate(*s), truncate(*e)),
            (Value::Number(_), other) | (other, _) => {
                return Err(errors::non_numeric_range(other.type_name()))
            }
        };
        let idx = self.names.idx;
        for i in start..end {
            let mut scoped = self.scoped();
            scoped.env.define(idx, Value::Number(i64_to_f64(i)));
            scoped.eval(body)?;
        }
        Ok(Value::Nil)
    }

    fn eval_assign(&mut self, target: ExprId, value: ExprId) -> EvalResult {
        let value = self.eval(value)?;
        let arena = self.arena.clone();
        match &arena.get(target).kind {
            ExprKind::Ident(name) => {
                self.env
                    .assign(*name, value.clone())
                    .map_err(|_| errors::undefined_binding(self.text(*name)))?;
            }
            ExprKind::Property { target, name } => {
                let target = self.eval(*target)?;
                let Value::Record(record) = target else {
                    return Err(errors::not_a_record("assign a property of", target.type_name()));
                };
                record.set(*name, value.clone());
            }
            other => return Err(errors::invalid_target("assign to", expr_kind_name(other))),
        }
        Ok(value)
    }

    /// Short-circuiting; both operands must be booleans when evaluated.
    fn eval_logical(&mut self, op: LogicalOp, lhs: ExprId, rhs: ExprId) -> EvalResult {
        let operation = match op {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        };
        let lhs = self.eval(lhs)?;
        let Some(lhs) = lhs.as_bool() else {
            return Err(errors::wrong_operand(operation, "bool", lhs.type_name()));
        };
        match (op, lhs) {
            (LogicalOp::And, false) => return Ok(Value::Bool(false)),
            (LogicalOp::Or, true) => return Ok(Value::Bool(true)),
            _ => {}
        }
        let rhs = self.eval(rhs)?;
        rhs.as_bool()
            .map(Value::Bool)
            .ok_or_else(|| errors::wrong_operand(operation, "bool", rhs.type_name()))
    }

    fn eval_import(&mut self, kind: ImportKind, path: &[Name]) -> EvalResult {
        let dotted = path
            .iter()
            .map(|name| self.text(*name))
            .collect::<Vec<_>>()
            .join(".");
        let request = ImportRequest {
            kind,
            path,
            dotted: &dotted,
            from_dir: &self.unit_dir,
        };
        self.loader.load(&request)
    }

    fn eval_export(&mut self, names: &[Ident]) -> EvalResult {
        for ident in names {
            let value = self
                .env
                .lookup(ident.name)
                .ok_or_else(|| errors::undefined_binding(self.text(ident.name)).located_at(ident.token))?;
            self.exports.insert(ident.name, value);
        }
        Ok(Value::Nil)
    }
}

/// A function stored under a name for the first time takes that name.
fn name_function(value: Value, name: Name) -> Value {
    match value {
        Value::Function(func) => Value::Function(func.named(name)),
        other => other,
    }
}

/// Numbers used as indices and range bounds are truncated toward zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero is the language rule; out-of-range saturates"
)]
fn truncate(n: f64) -> i64 {
    n.trunc() as i64
}

#[expect(clippy::cast_precision_loss, reason = "loop counters and lengths are far below 2^53")]
fn i64_to_f64(n: i64) -> f64 {
    n as f64
}

#[expect(clippy::cast_precision_loss, reason = "lengths are far below 2^53")]
fn usize_to_f64(n: usize) -> f64 {
    n as f64
}

fn expr_kind_name(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Call { .. } => "call",
        ExprKind::Index { .. } => "index",
        ExprKind::Literal(_) => "literal",
        _ => "expression",
    }
}

#[cfg(test)]
mod tests;
