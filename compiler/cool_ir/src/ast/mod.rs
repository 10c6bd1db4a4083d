//! Owned AST for Cool programs.
//!
//! Every node exclusively owns its children; symbols are shared handles into
//! [`SymbolTables`](crate::SymbolTables). The tree has no back-references, so
//! `Clone` is a full deep copy.
//!
//! # Module Structure
//!
//! - `items`: Program, Class, Feature, Formal and Case nodes
//! - `expr`: expressions and their inferred-type slot
//! - `operators`: binary and unary operators

mod expr;
mod items;
mod operators;

pub use expr::{Expr, ExprKind};
pub use items::{Case, Class, Feature, FeatureKind, Formal, Program};
pub use operators::{BinaryOp, UnaryOp};

/// One-element sequence, for grammar reductions like `class_list: class`.
pub fn single<T>(node: T) -> Vec<T> {
    vec![node]
}

/// Concatenate two sequences preserving order, for `list: list item`.
pub fn append<T>(mut first: Vec<T>, second: Vec<T>) -> Vec<T> {
    first.extend(second);
    first
}
