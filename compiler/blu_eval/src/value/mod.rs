//! Runtime values.
//!
//! `Value` is cheap to clone: strings and lists are reference counted and
//! never mutated in place, records are shared handles. A record's property
//! map is the only aggregate that changes after creation.

mod function;
mod record;

pub use function::{FunctionValue, NativeFn, NativeFunction};
pub use record::{ObjectTemplate, RecordValue, WeakRecord};

use blu_ir::StringInterner;
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// Host objects that Blu code can hold and pass back to natives but not
/// inspect.
#[derive(Clone, Debug, PartialEq)]
pub enum HostValue {
    /// Produced by `blu.system.now()`.
    Instant(Instant),
}

impl HostValue {
    pub fn describe(&self) -> &'static str {
        match self {
            HostValue::Instant(_) => "instant",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Char(char),
    Str(Rc<str>),
    List(Rc<Vec<Value>>),
    Function(FunctionValue),
    Native(NativeFunction),
    Record(RecordValue),
    Opaque(HostValue),
}

impl Value {
    pub fn string(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(items))
    }

    /// Kind name used in runtime error messages and by `type_of`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Native(_) => "native",
            Value::Record(_) => "record",
            Value::Opaque(_) => "opaque",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Display adapter; record keys are interned so printing needs the
    /// interner.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> ValueDisplay<'a> {
        ValueDisplay {
            value: self,
            interner,
        }
    }
}

/// Structural equality for host code and tests. Records and functions
/// compare by identity. This is not the language's `==`, which lives in the
/// interpreter's operator module.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.same_definition(b),
            (Value::Native(a), Value::Native(b)) => a.name == b.name,
            (Value::Record(a), Value::Record(b)) => a.ptr_eq(b),
            (Value::Opaque(a), Value::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

/// `Display` for a value, resolving record keys through the interner.
pub struct ValueDisplay<'a> {
    value: &'a Value,
    interner: &'a StringInterner,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut open_records = SmallVec::<[usize; 8]>::new();
        write_value(f, self.value, self.interner, &mut open_records)
    }
}

/// Records that (indirectly) contain themselves print as `{...}` on the
/// second visit.
fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    interner: &StringInterner,
    open_records: &mut SmallVec<[usize; 8]>,
) -> fmt::Result {
    match value {
        Value::Nil => write!(f, "nil"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => write!(f, "{n}"),
        Value::Char(c) => write!(f, "{c}"),
        Value::Str(s) => write!(f, "{s}"),
        Value::List(items) => {
            write!(f, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_value(f, item, interner, open_records)?;
            }
            write!(f, "]")
        }
        Value::Function(func) => match func.name() {
            Some(name) => write!(f, "<fun {}>", interner.lookup(name)),
            None => write!(f, "<fun>"),
        },
        Value::Native(native) => write!(f, "<native {}>", native.name),
        Value::Record(record) => {
            let id = record.identity();
            if open_records.contains(&id) {
                return write!(f, "{{...}}");
            }
            open_records.push(id);
            let mut entries = record.entries();
            entries.sort_by_key(|(name, _)| interner.lookup(*name));
            write!(f, "{{")?;
            for (i, (name, item)) in entries.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: ", interner.lookup(*name))?;
                write_value(f, item, interner, open_records)?;
            }
            open_records.pop();
            write!(f, "}}")
        }
        Value::Opaque(host) => write!(f, "<{}>", host.describe()),
    }
}
