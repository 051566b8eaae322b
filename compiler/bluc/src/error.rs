//! Failures that stop a unit from producing exports.

use blu_eval::EvalError;
use blu_parse::SyntaxError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error in '{}': {error}", path.display())]
    Syntax { path: PathBuf, error: SyntaxError },

    #[error("analysis of '{}' failed with {count} error(s)", path.display())]
    Analysis { path: PathBuf, count: usize },

    #[error("runtime error in '{}': {error}", path.display())]
    Runtime { path: PathBuf, error: EvalError },
}

impl LoadError {
    /// The unit that failed.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Read { path, .. }
            | LoadError::Syntax { path, .. }
            | LoadError::Analysis { path, .. }
            | LoadError::Runtime { path, .. } => path,
        }
    }

    /// Short cause, without the path, for wrapping into an import fault.
    pub fn reason(&self) -> String {
        match self {
            LoadError::Read { source, .. } => source.to_string(),
            LoadError::Syntax { error, .. } => error.to_string(),
            LoadError::Analysis { count, .. } => format!("{count} analysis error(s)"),
            LoadError::Runtime { error, .. } => error.to_string(),
        }
    }
}
