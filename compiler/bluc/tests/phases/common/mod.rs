//! Shared test utilities for phase tests.

use blu_eval::{buffer_handler, SharedPrintHandler};
use bluc::{LoadError, RunStatus, Session, SessionConfig, UnitRole};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway project directory.
pub struct Project {
    dir: TempDir,
}

/// Result of a run plus everything it printed, diagnostics included.
pub struct Run {
    pub result: Result<RunStatus, LoadError>,
    pub output: String,
}

impl Run {
    /// Output of a run that must succeed.
    pub fn expect_ok(self) -> String {
        match self.result {
            Ok(RunStatus::Completed) => self.output,
            Ok(status) => panic!("program ended with {status:?}\n{}", self.output),
            Err(err) => panic!("program failed: {err}\n{}", self.output),
        }
    }

    /// The runtime fault of a run that must fail at run time.
    pub fn expect_runtime_error(&self) -> &blu_eval::EvalError {
        match &self.result {
            Err(LoadError::Runtime { error, .. }) => error,
            Err(err) => panic!("expected a runtime error, got: {err}\n{}", self.output),
            Ok(status) => panic!("expected a runtime error, program ended with {status:?}"),
        }
    }
}

impl Project {
    pub fn new() -> Self {
        Project {
            dir: tempfile::tempdir().expect("create temp project"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `source` to `relative`, creating directories on the way.
    pub fn file(&self, relative: &str, source: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create module directory");
        }
        std::fs::write(&path, source).expect("write module");
        path
    }

    pub fn session(&self) -> (Session, SharedPrintHandler) {
        self.session_with(SessionConfig::default())
    }

    pub fn session_with(&self, config: SessionConfig) -> (Session, SharedPrintHandler) {
        let output = buffer_handler();
        (Session::new(config, output.clone()), output)
    }

    /// Run `entry` and report a failure the way the CLI does.
    pub fn run(&self, entry: &str) -> Run {
        self.run_with(entry, SessionConfig::default())
    }

    pub fn run_with(&self, entry: &str, config: SessionConfig) -> Run {
        let (session, output) = self.session_with(config);
        let result = session.run_entry(&self.dir.path().join(entry));
        if let Err(err) = &result {
            session.report(err);
        }
        Run {
            result,
            output: output.get_output(),
        }
    }

    /// Analyse `entry` as a program entry point without running it.
    pub fn check(&self, entry: &str) -> (Result<(), LoadError>, String) {
        self.check_as(entry, UnitRole::Entry)
    }

    pub fn check_as(&self, file: &str, role: UnitRole) -> (Result<(), LoadError>, String) {
        let (session, output) = self.session();
        let result = session.check(&self.dir.path().join(file), role);
        (result, output.get_output())
    }
}

/// Number of output lines mentioning `code`.
pub fn count_code(output: &str, code: &str) -> usize {
    output
        .lines()
        .filter(|line| line.contains(&format!("[{code}]")))
        .count()
}
