//! Named environment tree.
//!
//! Each environment owns a stack of scope frames. The root (`MAIN`) holds the
//! unit's top-level scope; a child is created when a binding's initializer is
//! an object literal and keeps that object's scope after the binding is
//! analysed, so a later environment-open block can bring it back in.
//!
//! Symbol lookup walks the frames of an environment innermost first, then
//! continues in its parent.

use blu_ir::{Name, NameResolver};

use crate::{BindingSymbol, ScopeFrame};

/// Index of an environment in its tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnvId(u32);

impl EnvId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub struct EnvNode {
    pub name: Name,
    pub parent: Option<EnvId>,
    pub children: Vec<EnvId>,
    pub frames: Vec<ScopeFrame>,
}

/// A final symbol of the same name already lives in the target frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShadowsFinal {
    pub existing: BindingSymbol,
}

/// Arena-backed environment tree. Parents are plain indices, children are
/// owned by the tree.
#[derive(Clone, Debug)]
pub struct EnvTree {
    nodes: Vec<EnvNode>,
}

impl EnvTree {
    pub const ROOT: EnvId = EnvId(0);

    /// Tree with a root environment holding one empty frame.
    pub fn new(root_name: Name) -> Self {
        EnvTree {
            nodes: vec![EnvNode {
                name: root_name,
                parent: None,
                children: Vec::new(),
                frames: vec![ScopeFrame::new()],
            }],
        }
    }

    pub fn node(&self, id: EnvId) -> &EnvNode {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: EnvId) -> &mut EnvNode {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A fresh child environment of `parent` with one empty frame.
    ///
    /// The child is registered under `parent` only when no sibling of the
    /// same name exists, so `find_env` keeps returning the first one. An
    /// unregistered child still resolves through its parent.
    pub fn push_environment(&mut self, parent: EnvId, name: Name) -> EnvId {
        let id = EnvId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(EnvNode {
            name,
            parent: Some(parent),
            children: Vec::new(),
            frames: vec![ScopeFrame::new()],
        });
        let registered = self
            .node(parent)
            .children
            .iter()
            .any(|&child| self.node(child).name == name);
        if !registered {
            self.node_mut(parent).children.push(id);
        }
        tracing::trace!(?name, ?parent, registered, "created environment");
        id
    }

    /// Find an environment by name: `from` itself, then its descendants
    /// depth-first, then the same search from each ancestor.
    pub fn find_env(&self, from: EnvId, name: Name) -> Option<EnvId> {
        let mut current = Some(from);
        while let Some(env) = current {
            if let Some(found) = self.find_in_subtree(env, name) {
                return Some(found);
            }
            current = self.node(env).parent;
        }
        None
    }

    fn find_in_subtree(&self, env: EnvId, name: Name) -> Option<EnvId> {
        if self.node(env).name == name {
            return Some(env);
        }
        self.node(env)
            .children
            .iter()
            .find_map(|&child| self.find_in_subtree(child, name))
    }

    /// Innermost visible declaration of `name` from `env`.
    pub fn find_symbol(&self, env: EnvId, name: Name) -> Option<&BindingSymbol> {
        let mut current = Some(env);
        while let Some(id) = current {
            let node = self.node(id);
            if let Some(sym) = node.frames.iter().rev().find_map(|frame| frame.find(name)) {
                return Some(sym);
            }
            current = node.parent;
        }
        None
    }

    /// Declare `symbol` in the top frame of `env`. Redeclaring a final symbol
    /// in the same frame is refused; anything else is allowed.
    pub fn define(&mut self, env: EnvId, symbol: BindingSymbol) -> Result<(), ShadowsFinal> {
        let node = self.node_mut(env);
        if node.frames.is_empty() {
            node.frames.push(ScopeFrame::new());
        }
        let top = node.frames.len() - 1;
        let frame = &mut node.frames[top];
        if let Some(&existing) = frame.find(symbol.name) {
            if existing.is_final {
                return Err(ShadowsFinal { existing });
            }
        }
        frame.push(symbol);
        Ok(())
    }

    pub fn push_frame(&mut self, env: EnvId) {
        self.node_mut(env).frames.push(ScopeFrame::new());
    }

    pub fn pop_frame(&mut self, env: EnvId) {
        self.node_mut(env).frames.pop();
    }

    pub fn frame_count(&self, env: EnvId) -> usize {
        self.node(env).frames.len()
    }

    /// Append copies of `source`'s frames to `target`'s frame stack.
    pub fn bring_into_scope(&mut self, target: EnvId, source: EnvId) {
        let frames = self.node(source).frames.clone();
        self.node_mut(target).frames.extend(frames);
    }

    /// Drop frames of `env` above `len`.
    pub fn truncate_frames(&mut self, env: EnvId, len: usize) {
        self.node_mut(env).frames.truncate(len);
    }

    /// Resolver view of the scope visible from `env`.
    pub fn view(&self, env: EnvId) -> ScopeView<'_> {
        ScopeView { tree: self, env }
    }
}

/// Analysis-time name resolution from one environment.
#[derive(Copy, Clone)]
pub struct ScopeView<'a> {
    tree: &'a EnvTree,
    env: EnvId,
}

impl NameResolver for ScopeView<'_> {
    type Entry = BindingSymbol;

    fn resolve(&self, name: Name) -> Option<BindingSymbol> {
        self.tree.find_symbol(self.env, name).copied()
    }
}
