//! Host functions published under the reserved `blu` binding.
//!
//! Grouped into modules: `blu.io` and `blu.system`. Each native declares its
//! parameter names; the interpreter checks arity before calling, and every
//! native destructures its arguments with a slice pattern.

mod io;
mod system;

use blu_ir::StringInterner;

use crate::errors;
use crate::{EvalError, NativeFunction, RecordValue, Value};

/// A named group of natives.
struct NativeModule {
    name: &'static str,
    functions: &'static [NativeFunction],
}

const MODULES: &[NativeModule] = &[
    NativeModule {
        name: "io",
        functions: io::FUNCTIONS,
    },
    NativeModule {
        name: "system",
        functions: system::FUNCTIONS,
    },
];

/// Build the `blu` namespace record.
pub fn namespace(interner: &StringInterner) -> RecordValue {
    RecordValue::from_entries(MODULES.iter().map(|module| {
        let functions = RecordValue::from_entries(module.functions.iter().map(|native| {
            let short = native.name.rsplit('.').next().unwrap_or(native.name);
            (interner.intern(short), Value::Native(*native))
        }));
        (interner.intern(module.name), Value::Record(functions))
    }))
}

/// Every native, for listings and tests.
pub fn all() -> impl Iterator<Item = &'static NativeFunction> {
    MODULES.iter().flat_map(|module| module.functions.iter())
}

fn expect_str<'v>(function: &'static str, value: &'v Value) -> Result<&'v str, EvalError> {
    value
        .as_str()
        .ok_or_else(|| errors::wrong_operand(function, "string", value.type_name()))
}

fn expect_number(function: &'static str, value: &Value) -> Result<f64, EvalError> {
    value
        .as_number()
        .ok_or_else(|| errors::wrong_operand(function, "number", value.type_name()))
}

#[cold]
fn arity(native: &NativeFunction, got: usize) -> EvalError {
    errors::arity_mismatch(native.name, native.arity(), got)
}
