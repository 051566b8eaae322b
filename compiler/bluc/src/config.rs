//! Session configuration.
//!
//! Read from the environment by the CLI; tests build it directly.
//!
//! - `BLU_STDLIB`: standard library root (default `<entry dir>/library`)
//! - `BLU_MAX_CALL_DEPTH`: bound on nested calls (default 10 000)

use blu_eval::DEFAULT_MAX_CALL_DEPTH;
use std::path::{Path, PathBuf};

/// Standard library directory name next to the entry unit.
pub const DEFAULT_STD_DIR_NAME: &str = "library";

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// `None` means `<entry dir>/library`.
    pub std_dir: Option<PathBuf>,
    pub max_call_depth: usize,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup. Unparseable values fall back to the
    /// default with a warning.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = SessionConfig::default();
        if let Some(dir) = var("BLU_STDLIB").filter(|dir| !dir.is_empty()) {
            config.std_dir = Some(PathBuf::from(dir));
        }
        if let Some(depth) = var("BLU_MAX_CALL_DEPTH") {
            match depth.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_call_depth = depth,
                _ => tracing::warn!(value = %depth, "ignoring invalid BLU_MAX_CALL_DEPTH"),
            }
        }
        config
    }

    #[must_use]
    pub fn with_std_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.std_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Standard library root for a program whose entry unit lives in
    /// `entry_dir`.
    pub fn std_dir_for(&self, entry_dir: &Path) -> PathBuf {
        self.std_dir
            .clone()
            .unwrap_or_else(|| entry_dir.join(DEFAULT_STD_DIR_NAME))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            std_dir: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests;
