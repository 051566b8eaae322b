//! Binary and unary operators on values.
//!
//! Operands must be of the same kind. Numbers get the usual arithmetic and
//! ordering; strings and lists concatenate with `+` and order by length;
//! lists are equal only when they are the same list. Records compare by
//! property count, see `weak_record_order`.

use blu_ir::{ArithmeticOp, ComparisonOp, EqualityOp};
use std::cmp::Ordering;
use std::rc::Rc;

use crate::errors::{self, EvalResult};
use crate::{RecordValue, Value};

pub(super) fn arithmetic(op: ArithmeticOp, lhs: &Value, rhs: &Value) -> EvalResult {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(match op {
            ArithmeticOp::Add => a + b,
            ArithmeticOp::Sub => a - b,
            ArithmeticOp::Mul => a * b,
            ArithmeticOp::Div => a / b,
        })),
        (Value::Str(a), Value::Str(b)) if op == ArithmeticOp::Add => {
            Ok(Value::Str(Rc::from(format!("{a}{b}"))))
        }
        (Value::List(a), Value::List(b)) if op == ArithmeticOp::Add => {
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend(a.iter().cloned());
            items.extend(b.iter().cloned());
            Ok(Value::list(items))
        }
        _ => Err(errors::binary_type_mismatch(
            op.as_symbol(),
            lhs.type_name(),
            rhs.type_name(),
        )),
    }
}

pub(super) fn equality(op: EqualityOp, lhs: &Value, rhs: &Value) -> EvalResult {
    let equal = values_equal(lhs, rhs).ok_or_else(|| {
        errors::binary_type_mismatch(op.as_symbol(), lhs.type_name(), rhs.type_name())
    })?;
    Ok(Value::Bool(match op {
        EqualityOp::Eq => equal,
        EqualityOp::NotEq => !equal,
    }))
}

/// `None` when the pair cannot be compared.
#[allow(clippy::float_cmp, reason = "language equality on numbers is exact")]
fn values_equal(lhs: &Value, rhs: &Value) -> Option<bool> {
    Some(match (lhs, rhs) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Char(a), Value::Char(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
        (Value::Record(a), Value::Record(b)) => weak_record_order(a, b) == Ordering::Equal,
        _ => return None,
    })
}

pub(super) fn comparison(op: ComparisonOp, lhs: &Value, rhs: &Value) -> EvalResult {
    let ordering = match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.chars().count().cmp(&b.chars().count())),
        (Value::List(a), Value::List(b)) => Some(a.len().cmp(&b.len())),
        (Value::Record(a), Value::Record(b)) => Some(weak_record_order(a, b)),
        _ => {
            return Err(errors::binary_type_mismatch(
                op.as_symbol(),
                lhs.type_name(),
                rhs.type_name(),
            ))
        }
    };
    // NaN is unordered: every comparison with it is false.
    let holds = ordering.is_some_and(|ordering| match op {
        ComparisonOp::Lt => ordering.is_lt(),
        ComparisonOp::LtEq => ordering.is_le(),
        ComparisonOp::Gt => ordering.is_gt(),
        ComparisonOp::GtEq => ordering.is_ge(),
    });
    Ok(Value::Bool(holds))
}

/// Records are ordered, and equal, by how many properties they have. Two
/// different records with the same number of properties are `==`.
fn weak_record_order(lhs: &RecordValue, rhs: &RecordValue) -> Ordering {
    lhs.len().cmp(&rhs.len())
}

pub(super) fn negate(operand: &Value) -> EvalResult {
    match operand {
        Value::Number(n) => Ok(Value::Number(-n)),
        other => Err(errors::wrong_operand("-", "number", other.type_name())),
    }
}

/// `item @ list`: a new list with `item` in front.
pub(super) fn prepend(item: Value, list: &Value) -> EvalResult {
    let Value::List(items) = list else {
        return Err(errors::wrong_operand("@", "list", list.type_name()));
    };
    let mut prepended = Vec::with_capacity(items.len() + 1);
    prepended.push(item);
    prepended.extend(items.iter().cloned());
    Ok(Value::list(prepended))
}
