//! Static scope analysis for Blu.
//!
//! A single pass over a unit's AST that checks identifier existence,
//! rebinding and mutability rules and export legality, desugars pipes in
//! place, and tracks the named environment tree used by environment-open
//! blocks. Every problem becomes a diagnostic in the caller's queue; the pass
//! always runs to completion.

mod analyser;
mod environment;
mod symbol;

pub use analyser::{analyse, Analyser, UnitRole};
pub use environment::{EnvId, EnvNode, EnvTree, ScopeView, ShadowsFinal};
pub use symbol::{BindingSymbol, ScopeFrame};
