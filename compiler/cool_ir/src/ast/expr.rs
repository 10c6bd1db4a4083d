//! Expression Types
//!
//! Core expression node and its variants. Every expression carries an
//! inferred-type slot that is empty after construction and filled in by a
//! later phase (or by decoding a document that records it).

use std::fmt;

use super::items::Case;
use super::operators::{BinaryOp, UnaryOp};
use crate::{IdSymbol, IntSymbol, Lined, StrSymbol};

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: u32,
    /// Inferred type; `None` until set.
    ty: Option<IdSymbol>,
}

/// Expression variants.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// `name <- value`
    Assign { name: IdSymbol, value: Box<Expr> },

    /// `receiver@type_name.method(args)`
    StaticDispatch {
        receiver: Box<Expr>,
        type_name: IdSymbol,
        method: IdSymbol,
        args: Vec<Expr>,
    },

    /// `receiver.method(args)`; implicit `self` receivers are explicit here.
    Dispatch {
        receiver: Box<Expr>,
        method: IdSymbol,
        args: Vec<Expr>,
    },

    /// `if pred then then_branch else else_branch fi`
    Cond {
        pred: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    /// `while pred loop body pool`
    Loop { pred: Box<Expr>, body: Box<Expr> },

    /// `case scrutinee of cases esac`
    TypCase {
        scrutinee: Box<Expr>,
        cases: Vec<Case>,
    },

    /// `{ e1; e2; ... }`
    Block { body: Vec<Expr> },

    /// `let name : type_decl <- init in body`, one binding per node.
    Let {
        name: IdSymbol,
        type_decl: IdSymbol,
        init: Box<Expr>,
        body: Box<Expr>,
    },

    /// `lhs op rhs`
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// `op operand`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// `isvoid e`
    IsVoid(Box<Expr>),

    /// Integer literal (interned text)
    IntConst(IntSymbol),

    /// `true` / `false`
    BoolConst(bool),

    /// String literal (interned, unescaped)
    StringConst(StrSymbol),

    /// `new T`
    New(IdSymbol),

    /// Placeholder for an absent optional expression.
    NoExpr,

    /// Identifier reference
    Object(IdSymbol),
}

impl ExprKind {
    /// Node tag in the external representation.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "assign",
            Self::StaticDispatch { .. } => "static_dispatch",
            Self::Dispatch { .. } => "dispatch",
            Self::Cond { .. } => "cond",
            Self::Loop { .. } => "loop",
            Self::TypCase { .. } => "typcase",
            Self::Block { .. } => "block",
            Self::Let { .. } => "let",
            Self::Binary { op, .. } => op.tag(),
            Self::Unary { op, .. } => op.tag(),
            Self::IsVoid(_) => "isvoid",
            Self::IntConst(_) => "int_const",
            Self::BoolConst(_) => "bool_const",
            Self::StringConst(_) => "string_const",
            Self::New(_) => "new_",
            Self::NoExpr => "no_expr",
            Self::Object(_) => "object",
        }
    }
}

impl Expr {
    pub fn new(line: u32, kind: ExprKind) -> Self {
        Expr {
            kind,
            line,
            ty: None,
        }
    }

    /// Inferred type, if one has been set.
    pub fn ty(&self) -> Option<IdSymbol> {
        self.ty
    }

    pub fn set_type(&mut self, ty: IdSymbol) -> &mut Self {
        self.ty = Some(ty);
        self
    }

    /// Builder form of [`set_type`](Self::set_type).
    #[must_use]
    pub fn with_type(mut self, ty: Option<IdSymbol>) -> Self {
        self.ty = ty;
        self
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn is_no_expr(&self) -> bool {
        matches!(self.kind, ExprKind::NoExpr)
    }

    pub fn assign(line: u32, name: IdSymbol, value: Expr) -> Self {
        Self::new(
            line,
            ExprKind::Assign {
                name,
                value: Box::new(value),
            },
        )
    }

    pub fn static_dispatch(
        line: u32,
        receiver: Expr,
        type_name: IdSymbol,
        method: IdSymbol,
        args: Vec<Expr>,
    ) -> Self {
        Self::new(
            line,
            ExprKind::StaticDispatch {
                receiver: Box::new(receiver),
                type_name,
                method,
                args,
            },
        )
    }

    pub fn dispatch(line: u32, receiver: Expr, method: IdSymbol, args: Vec<Expr>) -> Self {
        Self::new(
            line,
            ExprKind::Dispatch {
                receiver: Box::new(receiver),
                method,
                args,
            },
        )
    }

    pub fn cond(line: u32, pred: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Self::new(
            line,
            ExprKind::Cond {
                pred: Box::new(pred),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
        )
    }

    pub fn loop_(line: u32, pred: Expr, body: Expr) -> Self {
        Self::new(
            line,
            ExprKind::Loop {
                pred: Box::new(pred),
                body: Box::new(body),
            },
        )
    }

    pub fn typcase(line: u32, scrutinee: Expr, cases: Vec<Case>) -> Self {
        Self::new(
            line,
            ExprKind::TypCase {
                scrutinee: Box::new(scrutinee),
                cases,
            },
        )
    }

    pub fn block(line: u32, body: Vec<Expr>) -> Self {
        Self::new(line, ExprKind::Block { body })
    }

    pub fn let_(line: u32, name: IdSymbol, type_decl: IdSymbol, init: Expr, body: Expr) -> Self {
        Self::new(
            line,
            ExprKind::Let {
                name,
                type_decl,
                init: Box::new(init),
                body: Box::new(body),
            },
        )
    }

    pub fn binary(line: u32, op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::new(
            line,
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
        )
    }

    pub fn plus(line: u32, lhs: Expr, rhs: Expr) -> Self {
        Self::binary(line, BinaryOp::Plus, lhs, rhs)
    }

    pub fn sub(line: u32, lhs: Expr, rhs: Expr) -> Self {
        Self::binary(line, BinaryOp::Sub, lhs, rhs)
    }

    pub fn mul(line: u32, lhs: Expr, rhs: Expr) -> Self {
        Self::binary(line, BinaryOp::Mul, lhs, rhs)
    }

    pub fn divide(line: u32, lhs: Expr, rhs: Expr) -> Self {
        Self::binary(line, BinaryOp::Divide, lhs, rhs)
    }

    pub fn lt(line: u32, lhs: Expr, rhs: Expr) -> Self {
        Self::binary(line, BinaryOp::Lt, lhs, rhs)
    }

    pub fn equal(line: u32, lhs: Expr, rhs: Expr) -> Self {
        Self::binary(line, BinaryOp::Eq, lhs, rhs)
    }

    pub fn leq(line: u32, lhs: Expr, rhs: Expr) -> Self {
        Self::binary(line, BinaryOp::Leq, lhs, rhs)
    }

    pub fn unary(line: u32, op: UnaryOp, operand: Expr) -> Self {
        Self::new(
            line,
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
        )
    }

    pub fn neg(line: u32, operand: Expr) -> Self {
        Self::unary(line, UnaryOp::Neg, operand)
    }

    pub fn comp(line: u32, operand: Expr) -> Self {
        Self::unary(line, UnaryOp::Comp, operand)
    }

    pub fn isvoid(line: u32, operand: Expr) -> Self {
        Self::new(line, ExprKind::IsVoid(Box::new(operand)))
    }

    pub fn int_const(line: u32, token: IntSymbol) -> Self {
        Self::new(line, ExprKind::IntConst(token))
    }

    pub fn bool_const(line: u32, value: bool) -> Self {
        Self::new(line, ExprKind::BoolConst(value))
    }

    pub fn string_const(line: u32, token: StrSymbol) -> Self {
        Self::new(line, ExprKind::StringConst(token))
    }

    pub fn new_(line: u32, type_name: IdSymbol) -> Self {
        Self::new(line, ExprKind::New(type_name))
    }

    pub fn no_expr(line: u32) -> Self {
        Self::new(line, ExprKind::NoExpr)
    }

    pub fn object(line: u32, name: IdSymbol) -> Self {
        Self::new(line, ExprKind::Object(name))
    }
}

impl Lined for Expr {
    fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ line {}", self.kind, self.line)?;
        if let Some(ty) = self.ty {
            write!(f, " : {ty:?}")?;
        }
        Ok(())
    }
}
