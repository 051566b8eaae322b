//! The analysis pass.

use blu_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use blu_ir::{
    unreachable_node, BindingKind, ExprArena, ExprId, ExprKind, Field, Ident, Name,
    NameResolver, Param, Program, StringInterner, Token,
};
use rustc_hash::FxHashSet;

use crate::{BindingSymbol, EnvId, EnvTree, ScopeView};

/// Whether a unit is the program entry point or an imported module.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnitRole {
    Entry,
    Module,
}

/// Names the analyser treats specially.
#[derive(Copy, Clone)]
struct KnownNames {
    main: Name,
    idx: Name,
}

/// Scope analyser for one unit.
///
/// Owns the environment tree for the duration of the pass; the tree is
/// dropped with the analyser.
pub struct Analyser<'a> {
    arena: &'a mut ExprArena,
    interner: &'a StringInterner,
    queue: &'a mut DiagnosticQueue,
    role: UnitRole,
    tree: EnvTree,
    current: EnvId,
    in_function: bool,
    errors: usize,
    names: KnownNames,
}

/// Analyse a unit. Returns `true` if any error (not warning) was reported.
pub fn analyse(
    arena: &mut ExprArena,
    program: Program,
    interner: &StringInterner,
    role: UnitRole,
    queue: &mut DiagnosticQueue,
) -> bool {
    Analyser::new(arena, interner, role, queue).analyse(program)
}

impl<'a> Analyser<'a> {
    pub fn new(
        arena: &'a mut ExprArena,
        interner: &'a StringInterner,
        role: UnitRole,
        queue: &'a mut DiagnosticQueue,
    ) -> Self {
        let mut tree = EnvTree::new(interner.intern("MAIN"));
        // The host namespace is always in scope and cannot be redeclared.
        let blu = BindingSymbol::new(interner.intern("blu"), None, true, false);
        let _ = tree.define(EnvTree::ROOT, blu);

        Analyser {
            arena,
            interner,
            queue,
            role,
            tree,
            current: EnvTree::ROOT,
            in_function: false,
            errors: 0,
            names: KnownNames {
                main: interner.intern("main"),
                idx: interner.intern("idx"),
            },
        }
    }

    /// Run the pass over the whole program.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn analyse(mut self, program: Program) -> bool {
        // The top level shares the root environment's initial frame.
        let stmts = self.body_statements(program.body);
        self.visit_statements(&stmts);
        tracing::debug!(
            errors = self.errors,
            environments = self.tree.len(),
            "analysis finished"
        );
        self.errors > 0
    }

    fn view(&self) -> ScopeView<'_> {
        self.tree.view(self.current)
    }

    fn text(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    fn error(&mut self, code: ErrorCode, message: String, token: Option<Token>) {
        self.errors += 1;
        self.queue
            .push(Diagnostic::error(code).with_message(message).at(token));
    }

    fn warning(&mut self, code: ErrorCode, message: String, token: Option<Token>) {
        self.queue
            .push(Diagnostic::warning(code).with_message(message).at(token));
    }

    fn declare(&mut self, symbol: BindingSymbol) {
        if self.tree.define(self.current, symbol).is_err() {
            let message = format!(
                "Cannot overwrite '{}' in current scope, as it's marked as final",
                self.text(symbol.name)
            );
            self.error(ErrorCode::E2007, message, symbol.token);
        }
    }

    /// Statements of a body node. Any other node is treated as a one-element
    /// body.
    fn body_statements(&self, id: ExprId) -> Vec<ExprId> {
        match &self.arena.get(id).kind {
            ExprKind::Body(stmts) => stmts.clone(),
            _ => vec![id],
        }
    }

    fn visit_statements(&mut self, stmts: &[ExprId]) {
        for &stmt in stmts {
            self.visit(stmt);
        }
    }

    fn visit(&mut self, id: ExprId) {
        blu_stack::ensure_sufficient_stack(|| self.visit_node(id));
    }

    fn visit_node(&mut self, id: ExprId) {
        let expr = self.arena.get(id);
        let token = expr.token;
        match expr.kind.clone() {
            ExprKind::Body(stmts) => {
                self.tree.push_frame(self.current);
                self.visit_statements(&stmts);
                self.tree.pop_frame(self.current);
            }
            ExprKind::Binding {
                name,
                kind,
                is_final,
                value,
            } => self.visit_binding(name, kind, is_final, value, token),
            ExprKind::Function { params, body } => self.visit_function(&params, body),
            ExprKind::Call { callee, args } => self.visit_call(callee, &args, token),
            ExprKind::Ident(name) => self.visit_ident(name, token),
            ExprKind::Literal(_) | ExprKind::Import { .. } => {}
            ExprKind::List(items) | ExprKind::Print(items) => self.visit_statements(&items),
            ExprKind::Record(fields) => self.visit_record_literal(&fields),
            ExprKind::Index { target, index } => {
                self.visit(target);
                self.visit(index);
            }
            ExprKind::Property { target, .. }
            | ExprKind::Len(target)
            | ExprKind::Negate(target)
            | ExprKind::Clone(target) => self.visit(target),
            ExprKind::For { start, end, body } => self.visit_for(start, end, body),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.visit(cond);
                self.visit(then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit(else_branch);
                }
            }
            ExprKind::Assign { target, value } => self.visit_assign(target, value),
            ExprKind::Logical { lhs, rhs, .. }
            | ExprKind::Equality { lhs, rhs, .. }
            | ExprKind::Comparison { lhs, rhs, .. }
            | ExprKind::Arithmetic { lhs, rhs, .. }
            | ExprKind::Prepend {
                item: lhs,
                list: rhs,
            } => {
                self.visit(lhs);
                self.visit(rhs);
            }
            ExprKind::Pipe {
                lhs,
                rhs,
                desugared,
            } => self.visit_pipe(id, lhs, rhs, desugared),
            ExprKind::Object {
                params,
                composed,
                members,
            } => {
                self.tree.push_frame(self.current);
                self.visit_object(params.as_deref(), &composed, &members);
                self.tree.pop_frame(self.current);
            }
            ExprKind::EnvOpen { target, body } => self.visit_env_open(target, body),
            ExprKind::Export(names) => self.visit_export(&names, token),
            ExprKind::Return(value) => {
                if !self.in_function {
                    self.error(
                        ErrorCode::E2009,
                        "Cannot use return outside of functions".to_owned(),
                        token,
                    );
                }
                if let Some(value) = value {
                    self.visit(value);
                }
            }
        }
    }

    fn visit_binding(
        &mut self,
        name: Name,
        kind: BindingKind,
        is_final: bool,
        value: ExprId,
        token: Option<Token>,
    ) {
        let symbol = BindingSymbol::new(name, token, is_final, kind == BindingKind::Mutable);
        if kind == BindingKind::Recursive {
            self.declare(symbol);
            self.visit_binding_value(name, value);
        } else {
            self.visit_binding_value(name, value);
            self.declare(symbol);
        }

        if name == self.names.main
            && !is_final
            && self.current == EnvTree::ROOT
            && self.tree.frame_count(EnvTree::ROOT) == 1
        {
            self.warning(
                ErrorCode::E2103,
                "main should be marked as final".to_owned(),
                token,
            );
        }
    }

    /// An object bound to a name gets its own child environment, which keeps
    /// the object's scope for later environment-open blocks.
    fn visit_binding_value(&mut self, name: Name, value: ExprId) {
        let ExprKind::Object {
            params,
            composed,
            members,
        } = self.arena.get(value).kind.clone()
        else {
            self.visit(value);
            return;
        };

        let parent = self.current;
        self.current = self.tree.push_environment(parent, name);
        self.visit_object(params.as_deref(), &composed, &members);
        self.current = parent;
    }

    fn visit_function(&mut self, params: &[Param], body: ExprId) {
        let was_in_function = std::mem::replace(&mut self.in_function, true);
        self.tree.push_frame(self.current);

        let mut seen = FxHashSet::default();
        for param in params {
            if !seen.insert(param.name) {
                let message = format!(
                    "Parameter '{}' has already been defined",
                    self.text(param.name)
                );
                self.error(ErrorCode::E2004, message, param.token);
                continue;
            }
            self.declare(BindingSymbol::new(param.name, param.token, true, false));
        }

        // A block body opens its own frame, so it may shadow parameters.
        self.visit(body);

        self.tree.pop_frame(self.current);
        self.in_function = was_in_function;
    }

    fn visit_call(&mut self, callee: ExprId, args: &[ExprId], token: Option<Token>) {
        if matches!(self.arena.get(callee).kind, ExprKind::Object { .. }) {
            self.error(
                ErrorCode::E2011,
                "Cannot call an object literal".to_owned(),
                token,
            );
        }
        self.visit(callee);
        self.visit_statements(args);
    }

    fn visit_ident(&mut self, name: Name, token: Option<Token>) {
        if !self.view().is_bound(name) {
            let message = format!("Identifier '{}' does not exist", self.text(name));
            self.error(ErrorCode::E2001, message, token);
        }
    }

    fn visit_record_literal(&mut self, fields: &[Field]) {
        let mut seen = FxHashSet::default();
        for field in fields {
            if !seen.insert(field.name) {
                let message = format!(
                    "Field '{}' is already defined in this record",
                    self.text(field.name)
                );
                self.error(ErrorCode::E2008, message, field.token);
            }
            self.visit(field.value);
        }
    }

    fn visit_for(&mut self, start: ExprId, end: ExprId, body: ExprId) {
        self.visit(start);
        self.visit(end);

        self.tree.push_frame(self.current);
        self.declare(BindingSymbol::new(self.names.idx, None, true, false));
        self.visit(body);
        self.tree.pop_frame(self.current);
    }

    fn visit_assign(&mut self, target: ExprId, value: ExprId) {
        let target_expr = self.arena.get(target);
        let (target_kind, target_token) = (target_expr.kind.clone(), target_expr.token);
        self.visit(value);

        let ExprKind::Ident(name) = target_kind else {
            self.visit(target);
            return;
        };
        match self.view().resolve(name) {
            None => {
                let message = format!(
                    "Binding '{}' does not exist in any scope",
                    self.text(name)
                );
                self.error(ErrorCode::E2006, message, target_token);
            }
            Some(symbol) if !symbol.is_mutable => {
                let message = format!("Binding '{}' is not mutable", self.text(name));
                self.error(ErrorCode::E2005, message, target_token);
            }
            Some(_) => {}
        }
    }

    /// Splice the left operand into the right-hand call as its last
    /// argument, or into the first call of a chained pipe. The node is
    /// marked so a second pass over the same arena does not splice again.
    fn visit_pipe(&mut self, id: ExprId, lhs: ExprId, rhs: ExprId, desugared: bool) {
        if desugared {
            self.visit(rhs);
            return;
        }

        let call = match &self.arena.get(rhs).kind {
            ExprKind::Call { .. } => Some(rhs),
            ExprKind::Pipe { lhs: inner, .. }
                if matches!(self.arena.get(*inner).kind, ExprKind::Call { .. }) =>
            {
                Some(*inner)
            }
            _ => None,
        };

        let Some(call) = call else {
            self.visit(lhs);
            let token = self.arena.get(rhs).token;
            self.error(
                ErrorCode::E2010,
                "Right-hand side of a pipe must be a function call".to_owned(),
                token,
            );
            return;
        };

        if let ExprKind::Call { args, .. } = &mut self.arena.get_mut(call).kind {
            args.push(lhs);
        }
        if let ExprKind::Pipe { desugared, .. } = &mut self.arena.get_mut(id).kind {
            *desugared = true;
        }
        self.visit(rhs);
    }

    fn visit_object(&mut self, params: Option<&[Param]>, composed: &[Ident], members: &[ExprId]) {
        if let Some(params) = params {
            let mut seen = FxHashSet::default();
            for param in params {
                if !seen.insert(param.name) {
                    let message = format!(
                        "Record constructor already contains '{}'",
                        self.text(param.name)
                    );
                    self.warning(ErrorCode::E2101, message, param.token);
                    continue;
                }
                self.declare(BindingSymbol::new(
                    param.name,
                    param.token,
                    true,
                    param.is_mutable,
                ));
            }
        }

        let mut seen = FxHashSet::default();
        for source in composed {
            if !self.view().is_bound(source.name) {
                let message = format!(
                    "Cannot compose with '{}' as it does not exist",
                    self.text(source.name)
                );
                self.error(ErrorCode::E2012, message, source.token);
            }
            if !seen.insert(source.name) {
                let message = format!(
                    "Already composing object with '{}'",
                    self.text(source.name)
                );
                self.warning(ErrorCode::E2102, message, source.token);
            }
        }

        let mut fields = FxHashSet::default();
        for &member in members {
            let expr = self.arena.get(member);
            let ExprKind::Binding { name, .. } = expr.kind else {
                unreachable_node("object body", &expr.kind);
            };
            let token = expr.token;
            if !fields.insert(name) {
                let message = format!(
                    "Field '{}' is already defined in this record",
                    self.text(name)
                );
                self.error(ErrorCode::E2008, message, token);
            }
            self.visit(member);
        }
    }

    /// Bring the scope of the environment named by `target` into the body.
    /// `return` inside the body is not a function return.
    fn visit_env_open(&mut self, target: ExprId, body: ExprId) {
        let was_in_function = std::mem::replace(&mut self.in_function, false);
        let saved_frames = self.tree.frame_count(self.current);

        self.tree.push_frame(self.current);
        self.visit(target);
        if let ExprKind::Ident(name) = self.arena.get(target).kind {
            if let Some(env) = self.tree.find_env(self.current, name) {
                self.tree.bring_into_scope(self.current, env);
            }
        }
        self.visit(body);

        self.tree.truncate_frames(self.current, saved_frames);
        self.in_function = was_in_function;
    }

    fn visit_export(&mut self, names: &[Ident], token: Option<Token>) {
        if self.role == UnitRole::Entry {
            self.error(
                ErrorCode::E2003,
                "Cannot export from the entry unit".to_owned(),
                token,
            );
        }

        let mut exported = FxHashSet::default();
        for ident in names {
            if !self.view().is_bound(ident.name) {
                let message = format!(
                    "Cannot export item '{}' which does not exist",
                    self.text(ident.name)
                );
                self.error(ErrorCode::E2013, message, ident.token);
            }
            if !exported.insert(ident.name) {
                let message = format!(
                    "Item '{}' has already been exported",
                    self.text(ident.name)
                );
                self.error(ErrorCode::E2002, message, ident.token);
            }
        }
    }
}
