//! AST node kinds.
//!
//! Every node is an `Expr` in the arena. Statements and expressions share one
//! closed enum; statement-only forms (`export`, `return`, `print`) evaluate to
//! nil when they do not unwind.

use crate::{Name, Token};

/// Index of an expression in an `ExprArena`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node with its optional leading token.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub token: Option<Token>,
}

impl Expr {
    pub fn new(kind: ExprKind, token: Option<Token>) -> Self {
        Expr { kind, token }
    }
}

/// A parsed unit: the top-level body block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub body: ExprId,
}

/// How a `let` introduces its name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindingKind {
    /// Immutable; declared after the initializer.
    None,
    /// Reassignable; declared after the initializer.
    Mutable,
    /// Declared before the initializer so it can refer to itself.
    Recursive,
}

/// Function or constructor parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: Name,
    pub token: Option<Token>,
    /// Only constructor parameters may be `mut`.
    pub is_mutable: bool,
}

/// A bare name with its position (export lists, compose lists).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub name: Name,
    pub token: Option<Token>,
}

/// `name: value` entry of a record literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: Name,
    pub token: Option<Token>,
    pub value: ExprId,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Name),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EqualityOp {
    Eq,
    NotEq,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ComparisonOp {
    Lt,
    LtEq,
    Gt,
    GtEq,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl EqualityOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            EqualityOp::Eq => "==",
            EqualityOp::NotEq => "<>",
        }
    }
}

impl ComparisonOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            ComparisonOp::Lt => "<",
            ComparisonOp::LtEq => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::GtEq => ">=",
        }
    }
}

impl ArithmeticOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
        }
    }
}

/// Where an import path is rooted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportKind {
    /// Directory of the importing unit.
    Relative,
    /// Directory of the entry unit.
    Base,
    /// Standard library root.
    Std,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// `{ stmt; stmt }`; also the program's top level.
    Body(Vec<ExprId>),
    /// `let [final] [mut|rec] name = value`
    Binding {
        name: Name,
        kind: BindingKind,
        is_final: bool,
        value: ExprId,
    },
    /// `fun(a, b) { body }`
    Function { params: Vec<Param>, body: ExprId },
    Call { callee: ExprId, args: Vec<ExprId> },
    Ident(Name),
    Literal(Literal),
    List(Vec<ExprId>),
    /// `{ a: 1, b: 2 }`
    Record(Vec<Field>),
    Index { target: ExprId, index: ExprId },
    Property { target: ExprId, name: Name },
    Len(ExprId),
    /// `for start to end { body }`, binding `idx` per iteration.
    For {
        start: ExprId,
        end: ExprId,
        body: ExprId,
    },
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },
    /// `target <- value`; target is an identifier or property access.
    Assign { target: ExprId, value: ExprId },
    Logical {
        op: LogicalOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Equality {
        op: EqualityOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Comparison {
        op: ComparisonOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Arithmetic {
        op: ArithmeticOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Negate(ExprId),
    /// `item @ list`
    Prepend { item: ExprId, list: ExprId },
    /// `lhs |> call`. After analysis `rhs` holds the spliced call and
    /// `desugared` is set.
    Pipe {
        lhs: ExprId,
        rhs: ExprId,
        desugared: bool,
    },
    /// `object(params) +Composed { members }`. `params` is `None` for a
    /// plain object literal and `Some` for a constructor template.
    Object {
        params: Option<Vec<Param>>,
        composed: Vec<Ident>,
        members: Vec<ExprId>,
    },
    Clone(ExprId),
    /// `target.{ body }`
    EnvOpen { target: ExprId, body: ExprId },
    Import { kind: ImportKind, path: Vec<Name> },
    Export(Vec<Ident>),
    Print(Vec<ExprId>),
    Return(Option<ExprId>),
}
