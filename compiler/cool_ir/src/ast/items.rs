//! Program structure nodes: classes, features, formals and case branches.

use super::Expr;
use crate::{IdSymbol, Lined, Named, StrSymbol};

/// Root of a parsed program: the classes in source order.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Program {
    pub classes: Vec<Class>,
    pub line: u32,
}

impl Program {
    pub fn new(line: u32, classes: Vec<Class>) -> Self {
        Program { classes, line }
    }
}

/// A class declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Class {
    pub name: IdSymbol,
    /// Declared parent; `Object` when the source has no `inherits` clause.
    pub parent: IdSymbol,
    pub features: Vec<Feature>,
    /// Source file the class was read from.
    pub filename: StrSymbol,
    pub line: u32,
}

impl Class {
    pub fn new(
        line: u32,
        name: IdSymbol,
        parent: IdSymbol,
        features: Vec<Feature>,
        filename: StrSymbol,
    ) -> Self {
        Class {
            name,
            parent,
            features,
            filename,
            line,
        }
    }

    pub fn parent(&self) -> IdSymbol {
        self.parent
    }

    pub fn filename(&self) -> StrSymbol {
        self.filename
    }

    pub fn methods(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| f.is_method())
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| !f.is_method())
    }
}

/// A class member.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Feature {
    pub kind: FeatureKind,
    pub line: u32,
}

/// Feature variants.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FeatureKind {
    /// `name(formals) : return_type { body }`
    Method {
        name: IdSymbol,
        formals: Vec<Formal>,
        return_type: IdSymbol,
        body: Box<Expr>,
    },
    /// `name : type_decl <- init`; `init` is `no_expr` when absent.
    Attr {
        name: IdSymbol,
        type_decl: IdSymbol,
        init: Box<Expr>,
    },
}

impl Feature {
    pub fn method(
        line: u32,
        name: IdSymbol,
        formals: Vec<Formal>,
        return_type: IdSymbol,
        body: Expr,
    ) -> Self {
        Feature {
            kind: FeatureKind::Method {
                name,
                formals,
                return_type,
                body: Box::new(body),
            },
            line,
        }
    }

    pub fn attr(line: u32, name: IdSymbol, type_decl: IdSymbol, init: Expr) -> Self {
        Feature {
            kind: FeatureKind::Attr {
                name,
                type_decl,
                init: Box::new(init),
            },
            line,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, FeatureKind::Method { .. })
    }

    /// Node tag in the external representation.
    pub fn tag(&self) -> &'static str {
        match self.kind {
            FeatureKind::Method { .. } => "method",
            FeatureKind::Attr { .. } => "attr",
        }
    }
}

/// A method parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Formal {
    pub name: IdSymbol,
    pub type_decl: IdSymbol,
    pub line: u32,
}

impl Formal {
    pub fn new(line: u32, name: IdSymbol, type_decl: IdSymbol) -> Self {
        Formal {
            name,
            type_decl,
            line,
        }
    }
}

/// One branch of a `case` expression: `name : type_decl => expr`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Case {
    pub name: IdSymbol,
    pub type_decl: IdSymbol,
    pub expr: Box<Expr>,
    pub line: u32,
}

impl Case {
    pub fn branch(line: u32, name: IdSymbol, type_decl: IdSymbol, expr: Expr) -> Self {
        Case {
            name,
            type_decl,
            expr: Box::new(expr),
            line,
        }
    }
}

macro_rules! impl_lined {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Lined for $ty {
                fn line(&self) -> u32 {
                    self.line
                }
            }
        )*
    };
}

impl_lined!(Program, Class, Feature, Formal, Case);

impl Named for Class {
    fn name(&self) -> IdSymbol {
        self.name
    }
}

impl Named for Feature {
    fn name(&self) -> IdSymbol {
        match &self.kind {
            FeatureKind::Method { name, .. } | FeatureKind::Attr { name, .. } => *name,
        }
    }
}

impl Named for Formal {
    fn name(&self) -> IdSymbol {
        self.name
    }
}

impl Named for Case {
    fn name(&self) -> IdSymbol {
        self.name
    }
}
