//! One source file on its way to evaluation.

use blu_analysis::UnitRole;
use blu_diagnostic::DiagnosticQueue;
use blu_ir::{Program, SharedArena, StringInterner};
use std::path::{Path, PathBuf};

use crate::LoadError;

/// A parsed and analysed unit, ready to run.
///
/// Analysis rewrites the arena (pipes are desugared in place), so the arena
/// is only shared once analysis has succeeded.
#[derive(Debug)]
pub struct CompilationUnit {
    path: PathBuf,
    source: String,
    role: UnitRole,
    arena: SharedArena,
    program: Program,
}

impl CompilationUnit {
    /// Parse and analyse `source`. Diagnostics, including warnings, are
    /// pushed to `queue`; any error stops the unit here.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn compile(
        path: &Path,
        source: String,
        role: UnitRole,
        interner: &StringInterner,
        queue: &mut DiagnosticQueue,
    ) -> Result<Self, LoadError> {
        let parsed = blu_parse::parse_source(&source, interner).map_err(|error| {
            LoadError::Syntax {
                path: path.to_path_buf(),
                error,
            }
        })?;
        let mut arena = parsed.arena;
        let errors_before = queue.error_count();
        if blu_analysis::analyse(&mut arena, parsed.program, interner, role, queue) {
            return Err(LoadError::Analysis {
                path: path.to_path_buf(),
                count: queue.error_count() - errors_before,
            });
        }
        Ok(CompilationUnit {
            path: path.to_path_buf(),
            source,
            role,
            arena: SharedArena::new(arena),
            program: parsed.program,
        })
    }

    /// Read and compile a file.
    pub fn load(
        path: &Path,
        role: UnitRole,
        interner: &StringInterner,
        queue: &mut DiagnosticQueue,
    ) -> Result<Self, LoadError> {
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::compile(path, source, role, interner, queue)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory relative imports resolve against.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn role(&self) -> UnitRole {
        self.role
    }

    pub fn is_entry(&self) -> bool {
        self.role == UnitRole::Entry
    }

    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }

    pub fn program(&self) -> Program {
        self.program
    }
}
