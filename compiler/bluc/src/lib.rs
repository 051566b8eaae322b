//! Blu interpreter driver.
//!
//! # Architecture
//!
//! ```text
//! source file
//!     │
//!     ▼
//! CompilationUnit::compile ──► parse + analyse (diagnostics gate evaluation)
//!     │
//!     ▼
//! Interpreter::run ──► import ──► Session (ModuleLoader)
//!                                     │
//!                                     ▼
//!                               ModuleCache ──► compile + run the module
//! ```
//!
//! A `Session` owns the interner, the module cache and the configuration for
//! one program run. Every unit it loads shares them.

mod cache;
mod config;
mod error;
mod resolve;
mod session;
mod tracing_setup;
mod unit;

pub use blu_analysis::UnitRole;
pub use cache::ModuleCache;
pub use config::{SessionConfig, DEFAULT_STD_DIR_NAME};
pub use error::LoadError;
pub use resolve::{canonical_module_path, module_file, SearchRoots, MODULE_EXTENSION};
pub use session::{RunStatus, Session};
pub use tracing_setup::init_tracing;
pub use unit::CompilationUnit;
