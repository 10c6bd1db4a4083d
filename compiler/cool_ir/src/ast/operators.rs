//! Binary and Unary Operators
//!
//! Each operator corresponds to one wire tag of the external representation.

/// Binary arithmetic and comparison operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Plus,
    Sub,
    Mul,
    Divide,

    // Comparison
    Lt,
    Eq,
    Leq,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 7] = [
        Self::Plus,
        Self::Sub,
        Self::Mul,
        Self::Divide,
        Self::Lt,
        Self::Eq,
        Self::Leq,
    ];

    /// Node tag in the external representation.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Divide => "divide",
            Self::Lt => "lt",
            Self::Eq => "eq",
            Self::Leq => "leq",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tag() == tag)
    }

    /// Source-level symbol, for diagnostics.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Divide => "/",
            Self::Lt => "<",
            Self::Eq => "=",
            Self::Leq => "<=",
        }
    }

    /// True for `<`, `=` and `<=`, whose result is `Bool`.
    pub const fn is_comparison(self) -> bool {
        matches!(self, Self::Lt | Self::Eq | Self::Leq)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// Integer negation: `~e`
    Neg,
    /// Boolean complement: `not e`
    Comp,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 2] = [Self::Neg, Self::Comp];

    /// Node tag in the external representation.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Neg => "neg",
            Self::Comp => "comp",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tag() == tag)
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "~",
            Self::Comp => "not",
        }
    }
}
