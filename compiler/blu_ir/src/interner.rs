//! String interner for identifiers and string literals.
//!
//! Interned strings are leaked to get a `'static` lifetime; a session interns
//! a bounded vocabulary (identifiers and literals of the loaded units), so the
//! leak is bounded by program size.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

struct InternTable {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Interner with O(1) lookup in both directions.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create an interner with the empty string pre-interned as `Name::EMPTY`.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert("", 0);
        StringInterner {
            table: RwLock::new(InternTable {
                map,
                strings: vec![""],
            }),
        }
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        // Fast path: already interned
        if let Some(&index) = self.table.read().map.get(s) {
            return Name::from_raw(index);
        }

        let mut table = self.table.write();
        // Double-check after acquiring write lock
        if let Some(&index) = table.map.get(s) {
            return Name::from_raw(index);
        }

        let index = u32::try_from(table.strings.len())
            .unwrap_or_else(|_| panic!("string interner exceeded u32::MAX entries"));
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.map.insert(leaked, index);
        Name::from_raw(index)
    }

    /// Look up the string for a Name.
    ///
    /// # Panics
    /// Panics if the Name did not come from this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        let table = self.table.read();
        table
            .strings
            .get(name.index())
            .copied()
            .unwrap_or_else(|| panic!("{name:?} was not interned by this interner"))
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared interner, one per session.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests;
