//! Import paths to files.
//!
//! `import a.b.c` names the file `a/b/c.blu` under one of three roots:
//! the importing unit's directory, the entry unit's directory (`base`), or
//! the standard library directory (`std`).

use blu_eval::errors;
use blu_eval::EvalError;
use blu_ir::ImportKind;
use std::path::{Path, PathBuf};

pub const MODULE_EXTENSION: &str = "blu";

/// Roots that do not depend on the importing unit.
#[derive(Clone, Debug)]
pub struct SearchRoots {
    pub base_dir: PathBuf,
    pub std_dir: PathBuf,
}

/// The (not yet canonical) file an import refers to.
pub fn module_file(
    kind: ImportKind,
    segments: &[&str],
    from_dir: &Path,
    roots: &SearchRoots,
) -> PathBuf {
    let root = match kind {
        ImportKind::Relative => from_dir,
        ImportKind::Base => &roots.base_dir,
        ImportKind::Std => &roots.std_dir,
    };
    let mut path = root.to_path_buf();
    path.extend(segments);
    path.set_extension(MODULE_EXTENSION);
    path
}

/// Absolute, symlink-free form of `path`, the module cache key. Two import
/// spellings of one file canonicalize to the same key.
pub fn canonical_module_path(path: &Path) -> Result<PathBuf, EvalError> {
    path.canonicalize().map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => errors::import_not_found(path.display().to_string()),
        _ => errors::import_failed(path.display().to_string(), err.to_string()),
    })
}
