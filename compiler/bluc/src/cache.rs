//! Per-session module cache.
//!
//! Keyed by canonical path. A module's exports record is created once and
//! handed to every importer, so two imports of one file see the same record.
//! Modules still being loaded are tracked to turn import cycles into a fault.

use blu_eval::errors;
use blu_eval::{EvalError, RecordValue};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct CacheState {
    modules: FxHashMap<PathBuf, RecordValue>,
    /// Units whose evaluation is in progress, outermost first.
    loading: Vec<PathBuf>,
}

#[derive(Default)]
pub struct ModuleCache {
    state: RefCell<CacheState>,
}

impl ModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<RecordValue> {
        self.state.borrow().modules.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().modules.is_empty()
    }

    /// Cached exports of `path`, or the result of `load` (cached on success).
    ///
    /// `load` may re-enter the cache for nested imports; no borrow is held
    /// while it runs.
    pub fn get_or_load(
        &self,
        path: &Path,
        load: impl FnOnce() -> Result<RecordValue, EvalError>,
    ) -> Result<RecordValue, EvalError> {
        {
            let mut state = self.state.borrow_mut();
            if let Some(record) = state.modules.get(path) {
                tracing::debug!(path = %path.display(), "module cache hit");
                return Ok(record.clone());
            }
            if state.loading.iter().any(|loading| loading == path) {
                return Err(errors::circular_import(path.display().to_string()));
            }
            state.loading.push(path.to_path_buf());
        }
        tracing::debug!(path = %path.display(), "module cache miss");

        let result = load();

        let mut state = self.state.borrow_mut();
        state.loading.retain(|loading| loading != path);
        if let Ok(record) = &result {
            state.modules.insert(path.to_path_buf(), record.clone());
        }
        result
    }

    /// Mark the entry unit as loading, so a module importing it is reported
    /// as a cycle.
    pub fn begin_entry(&self, path: &Path) {
        self.state.borrow_mut().loading.push(path.to_path_buf());
    }

    pub fn end_entry(&self, path: &Path) {
        self.state
            .borrow_mut()
            .loading
            .retain(|loading| loading != path);
    }
}
