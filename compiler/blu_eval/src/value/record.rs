//! Records: objects, classes, module namespaces and record literals.

use blu_ir::{ExprId, Name, SharedArena};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::Value;

/// Constructor of a class record: the `object(params) ...` node it was
/// declared by.
#[derive(Clone, Debug)]
pub struct ObjectTemplate {
    pub arena: SharedArena,
    pub expr: ExprId,
}

struct RecordData {
    template: Option<ObjectTemplate>,
    properties: FxHashMap<Name, Value>,
    parent: Option<RecordValue>,
}

/// Shared, mutable record handle. Cloning the handle shares the record;
/// `shallow_clone` copies it.
#[derive(Clone)]
pub struct RecordValue(Rc<RefCell<RecordData>>);

/// Non-owning handle, held by functions pointing back at their record.
#[derive(Clone, Debug)]
pub struct WeakRecord(Weak<RefCell<RecordData>>);

impl WeakRecord {
    pub fn upgrade(&self) -> Option<RecordValue> {
        self.0.upgrade().map(RecordValue)
    }
}

impl RecordValue {
    fn from_data(data: RecordData) -> Self {
        RecordValue(Rc::new(RefCell::new(data)))
    }

    /// An empty record with no constructor.
    pub fn new() -> Self {
        Self::from_data(RecordData {
            template: None,
            properties: FxHashMap::default(),
            parent: None,
        })
    }

    /// A class: calling it runs `template` to build an instance.
    pub fn class(template: ObjectTemplate) -> Self {
        Self::from_data(RecordData {
            template: Some(template),
            properties: FxHashMap::default(),
            parent: None,
        })
    }

    /// An empty instance of `class`.
    pub fn instance_of(class: &RecordValue) -> Self {
        Self::from_data(RecordData {
            template: None,
            properties: FxHashMap::default(),
            parent: Some(class.clone()),
        })
    }

    /// A record holding `entries` in order; later duplicates overwrite.
    pub fn from_entries(entries: impl IntoIterator<Item = (Name, Value)>) -> Self {
        let record = Self::new();
        for (name, value) in entries {
            record.set(name, value);
        }
        record
    }

    pub fn template(&self) -> Option<ObjectTemplate> {
        self.0.borrow().template.clone()
    }

    /// The class this record was constructed from.
    pub fn parent(&self) -> Option<RecordValue> {
        self.0.borrow().parent.clone()
    }

    pub fn get(&self, name: Name) -> Option<Value> {
        self.0.borrow().properties.get(&name).cloned()
    }

    pub fn has(&self, name: Name) -> bool {
        self.0.borrow().properties.contains_key(&name)
    }

    /// Insert or overwrite a property. Function values are rebound to this
    /// record so that calling them sees its properties.
    pub fn set(&self, name: Name, value: Value) {
        let value = match value {
            Value::Function(func) => Value::Function(func.bound_to(self)),
            other => other,
        };
        self.0.borrow_mut().properties.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().properties.is_empty()
    }

    /// Snapshot of the properties, in no particular order.
    pub fn entries(&self) -> Vec<(Name, Value)> {
        self.0
            .borrow()
            .properties
            .iter()
            .map(|(name, value)| (*name, value.clone()))
            .collect()
    }

    /// Copy the property map into a new record. Nested records are shared;
    /// functions are rebound to the copy. The copy keeps the constructor.
    #[must_use]
    pub fn shallow_clone(&self) -> RecordValue {
        let data = self.0.borrow();
        let copy = Self::from_data(RecordData {
            template: data.template.clone(),
            properties: FxHashMap::default(),
            parent: data.parent.clone(),
        });
        for (name, value) in &data.properties {
            copy.set(*name, value.clone());
        }
        copy
    }

    pub fn ptr_eq(&self, other: &RecordValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address-based identity, stable while the record is alive.
    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    pub fn downgrade(&self) -> WeakRecord {
        WeakRecord(Rc::downgrade(&self.0))
    }
}

impl Default for RecordValue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Properties may point back at this record; print the shape only.
        let data = self.0.borrow();
        f.debug_struct("RecordValue")
            .field("properties", &data.properties.len())
            .field("is_class", &data.template.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
