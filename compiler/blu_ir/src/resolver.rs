//! Name resolution seam.

use crate::Name;

/// Something that maps a name to what it is bound to.
///
/// Implemented by the analyser's scope stack (symbols) and the evaluator's
/// environment (values). The two are independent: the analysis-time view and
/// the run-time view of a name can disagree, most visibly around
/// environment-open blocks.
pub trait NameResolver {
    type Entry;

    /// Innermost binding of `name`, if any.
    fn resolve(&self, name: Name) -> Option<Self::Entry>;

    /// Whether `name` resolves at all.
    fn is_bound(&self, name: Name) -> bool {
        self.resolve(name).is_some()
    }
}
