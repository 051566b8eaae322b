//! `blu.system`: process and clock access.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use super::{arity, expect_number, expect_str};
use crate::errors;
use crate::{EvalResult, HostValue, NativeFunction, Value};

pub(super) const FUNCTIONS: &[NativeFunction] =
    &[ASSERT, CLOCK, NOW, ELAPSED, ENV, TYPE_OF, EXIT];

const ASSERT: NativeFunction = NativeFunction::new("system.assert", &["cond", "msg"], assert);
const CLOCK: NativeFunction = NativeFunction::new("system.clock", &[], clock);
const NOW: NativeFunction = NativeFunction::new("system.now", &[], now);
const ELAPSED: NativeFunction = NativeFunction::new("system.elapsed", &["start"], elapsed);
const ENV: NativeFunction = NativeFunction::new("system.env", &["name"], env);
const TYPE_OF: NativeFunction = NativeFunction::new("system.type_of", &["value"], type_of);
const EXIT: NativeFunction = NativeFunction::new("system.exit", &["code"], exit);

fn assert(args: &[Value]) -> EvalResult {
    let [cond, msg] = args else {
        return Err(arity(&ASSERT, args.len()));
    };
    let Some(holds) = cond.as_bool() else {
        return Err(errors::wrong_operand(ASSERT.name, "bool", cond.type_name()));
    };
    if holds {
        return Ok(Value::Nil);
    }
    let msg = expect_str(ASSERT.name, msg)?;
    Err(errors::native_failed(ASSERT.name, format!("assertion failed: {msg}")))
}

/// Seconds since the Unix epoch.
fn clock(args: &[Value]) -> EvalResult {
    if !args.is_empty() {
        return Err(arity(&CLOCK, args.len()));
    }
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| errors::native_failed(CLOCK.name, err.to_string()))?
        .as_secs_f64();
    Ok(Value::Number(seconds))
}

fn now(args: &[Value]) -> EvalResult {
    if !args.is_empty() {
        return Err(arity(&NOW, args.len()));
    }
    Ok(Value::Opaque(HostValue::Instant(Instant::now())))
}

/// Seconds since an instant produced by `now()`.
fn elapsed(args: &[Value]) -> EvalResult {
    let [start] = args else {
        return Err(arity(&ELAPSED, args.len()));
    };
    match start {
        Value::Opaque(HostValue::Instant(instant)) => {
            Ok(Value::Number(instant.elapsed().as_secs_f64()))
        }
        other => Err(errors::wrong_operand(ELAPSED.name, "instant", other.type_name())),
    }
}

/// Value of an environment variable, nil when unset.
fn env(args: &[Value]) -> EvalResult {
    let [name] = args else {
        return Err(arity(&ENV, args.len()));
    };
    let name = expect_str(ENV.name, name)?;
    Ok(std::env::var(name).map_or(Value::Nil, |value| Value::string(&value)))
}

fn type_of(args: &[Value]) -> EvalResult {
    let [value] = args else {
        return Err(arity(&TYPE_OF, args.len()));
    };
    Ok(Value::string(value.type_name()))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "exit codes are small integers; the fraction is dropped"
)]
fn exit(args: &[Value]) -> EvalResult {
    let [code] = args else {
        return Err(arity(&EXIT, args.len()));
    };
    let code = expect_number(EXIT.name, code)?;
    Err(errors::exit_signal(code as i32))
}
