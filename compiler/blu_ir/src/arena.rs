//! Expression arena.

use crate::{Expr, ExprId};
use std::ops::Deref;
use std::rc::Rc;

/// Flat storage for the AST of one unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its id.
    ///
    /// # Panics
    /// Panics if the arena holds more than `u32::MAX` nodes.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let index = u32::try_from(self.exprs.len())
            .unwrap_or_else(|_| panic!("expression arena exceeded u32::MAX nodes"));
        self.exprs.push(expr);
        ExprId::new(index)
    }

    /// # Panics
    /// Panics if `id` was allocated by a different arena.
    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

/// Frozen arena shared between a unit and the function values created from
/// it. Functions imported from another unit keep that unit's arena alive.
#[derive(Clone, Debug)]
pub struct SharedArena(Rc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Rc::new(arena))
    }

    /// Whether two handles refer to the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &ExprArena {
        &self.0
    }
}
