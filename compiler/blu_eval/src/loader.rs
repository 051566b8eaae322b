//! Import seam between the evaluator and whoever owns the module cache.

use blu_ir::{ImportKind, Name};
use std::path::Path;

use crate::errors;
use crate::EvalResult;

/// An `import` as the evaluator sees it.
#[derive(Copy, Clone, Debug)]
pub struct ImportRequest<'a> {
    pub kind: ImportKind,
    /// Path components, e.g. `[lib, math]`.
    pub path: &'a [Name],
    /// The path as written, `lib.math`.
    pub dotted: &'a str,
    /// Directory of the importing unit.
    pub from_dir: &'a Path,
}

/// Resolves an import to the module's namespace record.
pub trait ModuleLoader {
    fn load(&self, request: &ImportRequest<'_>) -> EvalResult;
}

/// Loader for interpreters without a session: every import fails.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoModuleLoader;

impl ModuleLoader for NoModuleLoader {
    fn load(&self, request: &ImportRequest<'_>) -> EvalResult {
        Err(errors::import_failed(
            request.dotted,
            "no module loader is configured",
        ))
    }
}
