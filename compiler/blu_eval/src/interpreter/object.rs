//! Object literals, classes and instance construction.
//!
//! Construction order:
//! 1. constructor parameters, bound to the call arguments, become properties
//! 2. composed records are merged in listed order, later ones overwriting
//! 3. member bindings are evaluated in source order and stored
//! 4. function properties point at the new record (done by `RecordValue::set`)

use blu_ir::{unreachable_node, BindingKind, ExprId, ExprKind, Ident, Param, Token};

use super::{name_function, Interpreter};
use crate::errors::{self, EvalError, EvalResult};
use crate::{ObjectTemplate, RecordValue, Value};

impl Interpreter<'_> {
    /// A templated object evaluates to a class record; a plain one is built
    /// right away.
    pub(super) fn eval_object(
        &mut self,
        id: ExprId,
        is_class: bool,
        composed: &[Ident],
        members: &[ExprId],
    ) -> EvalResult {
        if is_class {
            return Ok(Value::Record(RecordValue::class(ObjectTemplate {
                arena: self.arena.clone(),
                expr: id,
            })));
        }
        let record = RecordValue::new();
        self.construct(&record, &[], &[], composed, members)?;
        Ok(Value::Record(record))
    }

    /// Run a class's template against `args`.
    pub(super) fn instantiate(
        &mut self,
        class: &RecordValue,
        template: &ObjectTemplate,
        args: &[Value],
        call_site: Option<Token>,
    ) -> EvalResult {
        let ExprKind::Object {
            params,
            composed,
            members,
        } = &template.arena.get(template.expr).kind
        else {
            unreachable_node("class template", &template.arena.get(template.expr).kind);
        };
        let params = params.as_deref().unwrap_or_default();
        if params.len() != args.len() {
            return Err(errors::arity_mismatch("constructor", params.len(), args.len())
                .located_at(call_site));
        }

        let instance = RecordValue::instance_of(class);
        let saved_arena = std::mem::replace(&mut self.arena, template.arena.clone());
        let result = self.construct(&instance, params, args, composed, members);
        self.arena = saved_arena;
        result.map(|()| Value::Record(instance))
    }

    fn construct(
        &mut self,
        record: &RecordValue,
        params: &[Param],
        args: &[Value],
        composed: &[Ident],
        members: &[ExprId],
    ) -> Result<(), EvalError> {
        for (param, arg) in params.iter().zip(args) {
            record.set(param.name, arg.clone());
        }

        for source in composed {
            let value = self.env.lookup(source.name).ok_or_else(|| {
                errors::undefined_binding(self.text(source.name)).located_at(source.token)
            })?;
            let Value::Record(from) = value else {
                return Err(errors::not_a_record("compose with", value.type_name())
                    .located_at(source.token));
            };
            for (name, value) in from.entries() {
                record.set(name, value);
            }
        }

        // Members see the parameters and earlier members through the
        // record frame.
        let mut scoped = self.scoped_record(record.clone());
        for &member in members {
            let arena = scoped.arena.clone();
            let expr = arena.get(member);
            let ExprKind::Binding { name, kind, value, .. } = &expr.kind else {
                unreachable_node("object body", &expr.kind);
            };
            if *kind == BindingKind::Recursive {
                record.set(*name, Value::Nil);
            }
            let value = scoped.eval(*value)?;
            record.set(*name, name_function(value, *name));
        }
        Ok(())
    }
}
