use serde_yaml::Value;
use tracing::trace;

use cool_ir::symbol::names;
use cool_ir::{BinaryOp, Case, Class, Expr, ExprKind, Feature, Formal, Program, UnaryOp};

use super::{Decode, Decoder, Fields};
use crate::error::CodecError;

impl Decode for Program {
    const PHYLUM: &'static str = "Program";

    fn decode(node: &Value, cx: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let f = cx.open(node, Self::PHYLUM)?;
        if f.tag != "program" {
            return Err(f.unknown(Self::PHYLUM));
        }
        let classes = cx.list(&f, "classes")?;
        Ok(Program::new(f.line, classes))
    }
}

impl Decode for Class {
    const PHYLUM: &'static str = "Class_";

    fn decode(node: &Value, cx: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let f = cx.open(node, Self::PHYLUM)?;
        if f.tag != "class_" {
            return Err(f.unknown(Self::PHYLUM));
        }
        let name = cx.ident(&f, "name")?;
        let parent = cx.ident(&f, "parent")?;
        let features = cx.list(&f, "features")?;
        let filename = cx.tables().strings.intern(&f.text("filename")?);
        trace!(line = f.line, name = cx.tables().idents.resolve(name), "decoded class");
        Ok(Class::new(f.line, name, parent, features, filename))
    }
}

impl Decode for Feature {
    const PHYLUM: &'static str = "Feature";

    fn decode(node: &Value, cx: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let f = cx.open(node, Self::PHYLUM)?;
        match &*f.tag {
            "method" => {
                let name = cx.ident(&f, "name")?;
                let formals = cx.list(&f, "formals")?;
                let return_type = cx.ident(&f, "return_type")?;
                let body = cx.child(&f, "expr")?;
                Ok(Feature::method(f.line, name, formals, return_type, body))
            }
            "attr" => {
                let name = cx.ident(&f, "name")?;
                let type_decl = cx.ident(&f, "type_decl")?;
                let init = cx.child(&f, "init")?;
                Ok(Feature::attr(f.line, name, type_decl, init))
            }
            _ => Err(f.unknown(Self::PHYLUM)),
        }
    }
}

impl Decode for Formal {
    const PHYLUM: &'static str = "Formal";

    fn decode(node: &Value, cx: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let f = cx.open(node, Self::PHYLUM)?;
        if f.tag != "formal" {
            return Err(f.unknown(Self::PHYLUM));
        }
        let name = cx.ident(&f, "name")?;
        let type_decl = cx.ident(&f, "type_decl")?;
        Ok(Formal::new(f.line, name, type_decl))
    }
}

impl Decode for Case {
    const PHYLUM: &'static str = "Case";

    fn decode(node: &Value, cx: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let f = cx.open(node, Self::PHYLUM)?;
        if f.tag != "branch" {
            return Err(f.unknown(Self::PHYLUM));
        }
        let name = cx.ident(&f, "name")?;
        let type_decl = cx.ident(&f, "type_decl")?;
        let expr = cx.child(&f, "expr")?;
        Ok(Case::branch(f.line, name, type_decl, expr))
    }
}

impl Decode for Expr {
    const PHYLUM: &'static str = "Expression";

    fn decode(node: &Value, cx: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let f = cx.open(node, Self::PHYLUM)?;
        let kind = decode_expr_kind(&f, cx)?;

        // The type is read after the node is built, and `type` is mandatory.
        let ty = match &*f.text("type")? {
            names::NO_TYPE => None,
            text => Some(cx.tables().idents.intern(text)),
        };
        Ok(Expr::new(f.line, kind).with_type(ty))
    }
}

fn decode_expr_kind(f: &Fields<'_>, cx: &mut Decoder<'_>) -> Result<ExprKind, CodecError> {
    let tag = &*f.tag;

    if let Some(op) = BinaryOp::from_tag(tag) {
        return Ok(ExprKind::Binary {
            op,
            lhs: Box::new(cx.child(f, "e1")?),
            rhs: Box::new(cx.child(f, "e2")?),
        });
    }
    if let Some(op) = UnaryOp::from_tag(tag) {
        return Ok(ExprKind::Unary {
            op,
            operand: Box::new(cx.child(f, "e1")?),
        });
    }

    let kind = match tag {
        "assign" => ExprKind::Assign {
            name: cx.ident(f, "name")?,
            value: Box::new(cx.child(f, "expr")?),
        },
        "static_dispatch" => ExprKind::StaticDispatch {
            receiver: Box::new(cx.child(f, "expr")?),
            type_name: cx.ident(f, "type_name")?,
            method: cx.ident(f, "name")?,
            args: cx.list(f, "actual")?,
        },
        "dispatch" => ExprKind::Dispatch {
            receiver: Box::new(cx.child(f, "expr")?),
            method: cx.ident(f, "name")?,
            args: cx.list(f, "actual")?,
        },
        "cond" => ExprKind::Cond {
            pred: Box::new(cx.child(f, "pred")?),
            then_branch: Box::new(cx.child(f, "then_exp")?),
            else_branch: Box::new(cx.child(f, "else_exp")?),
        },
        "loop" => ExprKind::Loop {
            pred: Box::new(cx.child(f, "pred")?),
            body: Box::new(cx.child(f, "body")?),
        },
        "typcase" => ExprKind::TypCase {
            scrutinee: Box::new(cx.child(f, "expr")?),
            cases: cx.list(f, "cases")?,
        },
        "block" => ExprKind::Block {
            body: cx.list(f, "body")?,
        },
        "let" => ExprKind::Let {
            name: cx.ident(f, "identifier")?,
            type_decl: cx.ident(f, "type_decl")?,
            init: Box::new(cx.child(f, "init")?),
            body: Box::new(cx.child(f, "body")?),
        },
        "isvoid" => ExprKind::IsVoid(Box::new(cx.child(f, "e1")?)),
        "int_const" => ExprKind::IntConst(cx.tables().ints.intern(&f.text("token")?)),
        "bool_const" => ExprKind::BoolConst(f.text("val")? == "1"),
        "string_const" => ExprKind::StringConst(cx.tables().strings.intern(&f.text("token")?)),
        "new_" => ExprKind::New(cx.ident(f, "type_name")?),
        "no_expr" => ExprKind::NoExpr,
        "object" => ExprKind::Object(cx.ident(f, "name")?),
        _ => return Err(f.unknown(Expr::PHYLUM)),
    };
    Ok(kind)
}
