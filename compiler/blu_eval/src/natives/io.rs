//! `blu.io`: file access.

use std::path::Path;

use super::{arity, expect_str};
use crate::errors;
use crate::{EvalResult, NativeFunction, Value};

pub(super) const FUNCTIONS: &[NativeFunction] = &[READ, WRITE, EXISTS];

const READ: NativeFunction = NativeFunction::new("io.read", &["path"], read);
const WRITE: NativeFunction = NativeFunction::new("io.write", &["path", "content"], write);
const EXISTS: NativeFunction = NativeFunction::new("io.exists", &["path"], exists);

fn read(args: &[Value]) -> EvalResult {
    let [path] = args else {
        return Err(arity(&READ, args.len()));
    };
    let path = expect_str(READ.name, path)?;
    std::fs::read_to_string(path)
        .map(|content| Value::string(&content))
        .map_err(|err| errors::native_failed(READ.name, format!("cannot read '{path}': {err}")))
}

fn write(args: &[Value]) -> EvalResult {
    let [path, content] = args else {
        return Err(arity(&WRITE, args.len()));
    };
    let path = expect_str(WRITE.name, path)?;
    let content = expect_str(WRITE.name, content)?;
    std::fs::write(path, content)
        .map(|()| Value::Nil)
        .map_err(|err| errors::native_failed(WRITE.name, format!("cannot write '{path}': {err}")))
}

fn exists(args: &[Value]) -> EvalResult {
    let [path] = args else {
        return Err(arity(&EXISTS, args.len()));
    };
    let path = expect_str(EXISTS.name, path)?;
    Ok(Value::Bool(Path::new(path).exists()))
}
