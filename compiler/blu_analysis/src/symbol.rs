//! Binding symbols and scope frames.

use blu_ir::{Name, Token};

/// A declared name. Never mutated after creation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BindingSymbol {
    pub name: Name,
    /// `None` for implicit declarations such as `idx` or the `blu` namespace.
    pub token: Option<Token>,
    pub is_final: bool,
    pub is_mutable: bool,
}

impl BindingSymbol {
    pub fn new(name: Name, token: Option<Token>, is_final: bool, is_mutable: bool) -> Self {
        BindingSymbol {
            name,
            token,
            is_final,
            is_mutable,
        }
    }
}

/// Symbols of one lexical scope, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeFrame {
    symbols: Vec<BindingSymbol>,
}

impl ScopeFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Innermost (latest) declaration of `name` in this frame.
    pub fn find(&self, name: Name) -> Option<&BindingSymbol> {
        self.symbols.iter().rev().find(|sym| sym.name == name)
    }

    pub fn push(&mut self, symbol: BindingSymbol) {
        self.symbols.push(symbol);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
