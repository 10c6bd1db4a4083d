//! Tokens as handed to the parser engine.
//!
//! [`TokenKind`] is the closed set of token kinds together with the integer
//! codes the LALR engine consumes. The textual names are the ones used in
//! token documents (`"CLASS"`, `"OBJECTID"`, `"+"`, ...).

use std::fmt;

use crate::{IdSymbol, IntSymbol, StrSymbol};

/// Token kinds with their engine codes.
///
/// Keywords and literal classes use the codes `258..=283`; single-character
/// punctuation uses its character code. `Eof` is `0` and `Malformed` is the
/// engine's error-token code `256`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u16)]
pub enum TokenKind {
    Eof = 0,
    Malformed = 256,

    Class = 258,
    Else = 259,
    Fi = 260,
    If = 261,
    In = 262,
    Inherits = 263,
    Let = 264,
    Loop = 265,
    Pool = 266,
    Then = 267,
    While = 268,
    Case = 269,
    Esac = 270,
    Of = 271,
    DArrow = 272, // =>
    New = 273,
    IsVoid = 274,
    StrConst = 275,
    IntConst = 276,
    BoolConst = 277,
    TypeId = 278,
    ObjectId = 279,
    Assign = 280, // <-
    Not = 281,
    Le = 282, // <=
    Error = 283,

    Plus = b'+' as u16,
    Slash = b'/' as u16,
    Minus = b'-' as u16,
    Star = b'*' as u16,
    Eq = b'=' as u16,
    Lt = b'<' as u16,
    Dot = b'.' as u16,
    Tilde = b'~' as u16,
    Comma = b',' as u16,
    Semicolon = b';' as u16,
    Colon = b':' as u16,
    LParen = b'(' as u16,
    RParen = b')' as u16,
    At = b'@' as u16,
    LBrace = b'{' as u16,
    RBrace = b'}' as u16,
}

impl TokenKind {
    /// Every kind, in code order within each group.
    pub const ALL: [TokenKind; 44] = [
        TokenKind::Eof,
        TokenKind::Malformed,
        TokenKind::Class,
        TokenKind::Else,
        TokenKind::Fi,
        TokenKind::If,
        TokenKind::In,
        TokenKind::Inherits,
        TokenKind::Let,
        TokenKind::Loop,
        TokenKind::Pool,
        TokenKind::Then,
        TokenKind::While,
        TokenKind::Case,
        TokenKind::Esac,
        TokenKind::Of,
        TokenKind::DArrow,
        TokenKind::New,
        TokenKind::IsVoid,
        TokenKind::StrConst,
        TokenKind::IntConst,
        TokenKind::BoolConst,
        TokenKind::TypeId,
        TokenKind::ObjectId,
        TokenKind::Assign,
        TokenKind::Not,
        TokenKind::Le,
        TokenKind::Error,
        TokenKind::Plus,
        TokenKind::Slash,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Eq,
        TokenKind::Lt,
        TokenKind::Dot,
        TokenKind::Tilde,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::Colon,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::At,
        TokenKind::LBrace,
        TokenKind::RBrace,
    ];

    /// Integer code consumed by the parser engine.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<TokenKind> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Name used in token documents and debug output.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Malformed => "<Invalid Token>",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::Fi => "FI",
            TokenKind::If => "IF",
            TokenKind::In => "IN",
            TokenKind::Inherits => "INHERITS",
            TokenKind::Let => "LET",
            TokenKind::Loop => "LOOP",
            TokenKind::Pool => "POOL",
            TokenKind::Then => "THEN",
            TokenKind::While => "WHILE",
            TokenKind::Case => "CASE",
            TokenKind::Esac => "ESAC",
            TokenKind::Of => "OF",
            TokenKind::DArrow => "DARROW",
            TokenKind::New => "NEW",
            TokenKind::IsVoid => "ISVOID",
            TokenKind::StrConst => "STR_CONST",
            TokenKind::IntConst => "INT_CONST",
            TokenKind::BoolConst => "BOOL_CONST",
            TokenKind::TypeId => "TYPEID",
            TokenKind::ObjectId => "OBJECTID",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Not => "NOT",
            TokenKind::Le => "LE",
            TokenKind::Error => "ERROR",
            TokenKind::Plus => "+",
            TokenKind::Slash => "/",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Eq => "=",
            TokenKind::Lt => "<",
            TokenKind::Dot => ".",
            TokenKind::Tilde => "~",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::At => "@",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
        }
    }

    /// Look up a kind by its document name.
    ///
    /// The malformed marker has no document name and is never returned.
    pub fn from_name(name: &str) -> Option<TokenKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| *kind != TokenKind::Malformed)
            .find(|kind| kind.name() == name)
    }

    /// Single-character punctuation.
    pub const fn is_punctuation(self) -> bool {
        (self as u16) < 256 && !matches!(self, TokenKind::Eof)
    }

    /// Kinds whose token carries an interned `symbol` payload.
    pub const fn has_symbol(self) -> bool {
        matches!(
            self,
            TokenKind::StrConst | TokenKind::IntConst | TokenKind::TypeId | TokenKind::ObjectId
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic value attached to a token.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TokenValue {
    #[default]
    None,
    /// `TYPEID` / `OBJECTID`
    Ident(IdSymbol),
    /// `INT_CONST`
    Int(IntSymbol),
    /// `STR_CONST`, already unescaped
    Str(StrSymbol),
    /// `BOOL_CONST`
    Bool(bool),
    /// `ERROR` message
    Error(String),
}

/// A token pulled by the parser engine.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub value: TokenValue,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, line: u32, value: TokenValue) -> Self {
        Token { kind, line, value }
    }

    /// A token with no semantic value.
    #[inline]
    pub fn bare(kind: TokenKind, line: u32) -> Self {
        Token::new(kind, line, TokenValue::None)
    }

    /// End-of-input marker.
    pub fn eof(line: u32) -> Self {
        Token::bare(TokenKind::Eof, line)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Integer code consumed by the parser engine.
    pub fn code(&self) -> u16 {
        self.kind.code()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ line {}", self.kind, self.line)?;
        if self.value != TokenValue::None {
            write!(f, " = {:?}", self.value)?;
        }
        Ok(())
    }
}
