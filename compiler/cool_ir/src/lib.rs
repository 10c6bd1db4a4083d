//! Cool IR - Intermediate Representation Types
//!
//! This crate contains the core data structures shared by every phase of
//! the Cool pipeline:
//! - Symbol tables for identifiers, integer literals and string literals
//! - The owned AST (Program, Class, Feature, Formal, Case, Expr)
//! - Token kinds and tokens as handed to the parser engine
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifier and literal text lives in a
//!   [`SymbolTable`]; nodes hold copyable [`Symbol`] handles compared by
//!   identity.
//! - **Closed Node Set**: every node family is an enum, so codecs are
//!   exhaustive matches.
//! - **Explicit Context**: line numbers and symbol tables are passed in,
//!   never read from globals.

pub mod ast;
pub mod symbol;
mod token;
mod traits;

pub use ast::{
    BinaryOp, Case, Class, Expr, ExprKind, Feature, FeatureKind, Formal, Program, UnaryOp,
};
pub use symbol::{
    Entry, IdSymbol, Ident, IntLit, IntSymbol, StrLit, StrSymbol, Symbol, SymbolError,
    SymbolTable, SymbolTables, TableKind,
};
pub use token::{Token, TokenKind, TokenValue};
pub use traits::{Lined, Named};
