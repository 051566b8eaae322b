//! One program run: the entry unit and every module it imports.

use blu_analysis::UnitRole;
use blu_diagnostic::DiagnosticQueue;
use blu_eval::errors;
use blu_eval::{
    ControlFlow, EvalError, EvalResult, ImportRequest, Interpreter, InterpreterBuilder,
    ModuleLoader, RecordValue, SharedPrintHandler, Value,
};
use blu_ir::StringInterner;
use std::cell::RefCell;
use std::path::Path;

use crate::resolve::{self, SearchRoots};
use crate::{CompilationUnit, LoadError, ModuleCache, SessionConfig};

/// How an entry unit finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// The program called `blu.system.exit`.
    Exited(i32),
}

/// Shared state for a program run.
///
/// Implements `ModuleLoader`: every interpreter it creates imports through
/// it, so all units share one interner and one module cache.
pub struct Session {
    interner: StringInterner,
    config: SessionConfig,
    cache: ModuleCache,
    print_handler: SharedPrintHandler,
    /// Set once the entry unit is known.
    roots: RefCell<Option<SearchRoots>>,
}

impl Session {
    pub fn new(config: SessionConfig, print_handler: SharedPrintHandler) -> Self {
        Session {
            interner: StringInterner::new(),
            config,
            cache: ModuleCache::new(),
            print_handler,
            roots: RefCell::new(None),
        }
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn cache(&self) -> &ModuleCache {
        &self.cache
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Parse and analyse a file without running it. `role` decides whether
    /// `export` is allowed.
    pub fn check(&self, path: &Path, role: UnitRole) -> Result<(), LoadError> {
        let mut queue = DiagnosticQueue::new();
        let unit = CompilationUnit::load(path, role, &self.interner, &mut queue);
        self.emit(&mut queue, path);
        unit.map(|_| ())
    }

    /// Run an entry unit, then its `main`.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn run_entry(&self, path: &Path) -> Result<RunStatus, LoadError> {
        let path = path.canonicalize().map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut queue = DiagnosticQueue::new();
        let unit = CompilationUnit::load(&path, UnitRole::Entry, &self.interner, &mut queue);
        self.emit(&mut queue, &path);
        let unit = unit?;

        let base_dir = unit.dir().to_path_buf();
        *self.roots.borrow_mut() = Some(SearchRoots {
            std_dir: self.config.std_dir_for(&base_dir),
            base_dir,
        });

        self.cache.begin_entry(&path);
        let mut interpreter = self.interpreter(&unit);
        let result = interpreter
            .run(unit.program())
            .and_then(|_| interpreter.invoke_main());
        self.cache.end_entry(&path);

        match result {
            Ok(_) => Ok(RunStatus::Completed),
            Err(EvalError {
                control_flow: Some(ControlFlow::Exit(code)),
                ..
            }) => Ok(RunStatus::Exited(code)),
            Err(error) => Err(LoadError::Runtime { path, error }),
        }
    }

    /// Print a failure the way the CLI shows it.
    pub fn report(&self, err: &LoadError) {
        let file = err.path().display().to_string();
        let rendered = match err {
            LoadError::Read { .. } => format!("error: {err}"),
            LoadError::Syntax { error, .. } => error.to_diagnostic().render(&file),
            LoadError::Analysis { count, .. } => {
                format!("error: could not run '{file}' due to {count} previous error(s)")
            }
            LoadError::Runtime { error, .. } => error.to_diagnostic().render(&file),
        };
        self.print_handler.println(&rendered);
    }

    fn emit(&self, queue: &mut DiagnosticQueue, path: &Path) {
        let file = path.display().to_string();
        for diagnostic in queue.flush() {
            self.print_handler.println(&diagnostic.render(&file));
        }
    }

    fn interpreter(&self, unit: &CompilationUnit) -> Interpreter<'_> {
        InterpreterBuilder::new(&self.interner, unit.arena().clone())
            .print_handler(self.print_handler.clone())
            .loader(self)
            .unit_dir(unit.dir())
            .max_call_depth(self.config.max_call_depth)
            .build()
    }

    /// Without an entry unit, `base` imports resolve like relative ones.
    fn search_roots(&self, from_dir: &Path) -> SearchRoots {
        self.roots.borrow().clone().unwrap_or_else(|| SearchRoots {
            base_dir: from_dir.to_path_buf(),
            std_dir: self.config.std_dir_for(from_dir),
        })
    }

    /// Compile and run a module, returning its exports as a record. A
    /// failure is reported here and reaches the importer as an import fault.
    fn load_module(&self, path: &Path, dotted: &str) -> Result<RecordValue, EvalError> {
        tracing::debug!(module = dotted, path = %path.display(), "loading module");
        let mut queue = DiagnosticQueue::new();
        let unit = CompilationUnit::load(path, UnitRole::Module, &self.interner, &mut queue);
        self.emit(&mut queue, path);
        let unit = unit.map_err(|err| self.import_failure(dotted, &err))?;

        let mut interpreter = self.interpreter(&unit);
        match interpreter.run(unit.program()) {
            Ok(exports) => Ok(RecordValue::from_entries(exports)),
            Err(error) if error.is_control_flow() => Err(error),
            Err(error) => {
                let err = LoadError::Runtime {
                    path: path.to_path_buf(),
                    error,
                };
                Err(self.import_failure(dotted, &err))
            }
        }
    }

    fn import_failure(&self, dotted: &str, err: &LoadError) -> EvalError {
        self.report(err);
        errors::import_failed(dotted, err.reason())
    }
}

impl ModuleLoader for Session {
    fn load(&self, request: &ImportRequest<'_>) -> EvalResult {
        let segments: Vec<&str> = request
            .path
            .iter()
            .map(|name| self.interner.lookup(*name))
            .collect();
        let roots = self.search_roots(request.from_dir);
        let file = resolve::module_file(request.kind, &segments, request.from_dir, &roots);
        let path = resolve::canonical_module_path(&file)?;
        let record = self
            .cache
            .get_or_load(&path, || self.load_module(&path, request.dotted))?;
        Ok(Value::Record(record))
    }
}
