//! `InterpreterBuilder` for creating Interpreter instances.

use blu_ir::{SharedArena, StringInterner};
use rustc_hash::FxHashMap;
use std::path::PathBuf;

use super::{Interpreter, KnownNames};
use crate::{
    natives, stdout_handler, CallStack, Environment, ModuleLoader, NoModuleLoader,
    SharedPrintHandler, Value, DEFAULT_MAX_CALL_DEPTH,
};

pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    arena: SharedArena,
    print_handler: Option<SharedPrintHandler>,
    loader: &'a dyn ModuleLoader,
    unit_dir: PathBuf,
    max_call_depth: usize,
}

impl<'a> InterpreterBuilder<'a> {
    /// Defaults: stdout printing, no imports, current directory, default
    /// call depth.
    pub fn new(interner: &'a StringInterner, arena: SharedArena) -> Self {
        InterpreterBuilder {
            interner,
            arena,
            print_handler: None,
            loader: &NoModuleLoader,
            unit_dir: PathBuf::from("."),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn loader(mut self, loader: &'a dyn ModuleLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Directory that relative imports resolve against.
    #[must_use]
    pub fn unit_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.unit_dir = dir.into();
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Build the interpreter with `blu` bound in the global frame.
    pub fn build(self) -> Interpreter<'a> {
        let mut env = Environment::new();
        env.define(
            self.interner.intern("blu"),
            Value::Record(natives::namespace(self.interner)),
        );
        Interpreter {
            interner: self.interner,
            arena: self.arena,
            env,
            call_stack: CallStack::new(self.max_call_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            loader: self.loader,
            unit_dir: self.unit_dir,
            exports: FxHashMap::default(),
            names: KnownNames {
                main: self.interner.intern("main"),
                idx: self.interner.intern("idx"),
            },
        }
    }
}
