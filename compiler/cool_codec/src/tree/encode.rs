use serde_yaml::{Mapping, Value};

use cool_ir::symbol::names;
use cool_ir::{
    Case, Class, Expr, ExprKind, Feature, FeatureKind, Formal, IdSymbol, Program, SymbolTables,
};
use cool_stack::ensure_sufficient_stack;

use super::Encode;
use crate::list::encode_list;

/// Map under construction, keys kept in insertion order.
struct Node<'t> {
    map: Mapping,
    tables: &'t SymbolTables,
}

impl<'t> Node<'t> {
    /// `lineno`, optionally `type`, then `class`.
    fn new(tables: &'t SymbolTables, line: u32, ty: Option<Option<IdSymbol>>, tag: &str) -> Self {
        let mut node = Node {
            map: Mapping::new(),
            tables,
        };
        node.put("lineno", line.into());
        if let Some(ty) = ty {
            let text = ty.map_or(names::NO_TYPE, |ty| tables.idents.resolve(ty));
            node.put("type", text.into());
        }
        node.put("class", tag.into());
        node
    }

    fn put(&mut self, key: &str, value: Value) -> &mut Self {
        self.map.insert(key.into(), value);
        self
    }

    fn ident(&mut self, key: &str, sym: IdSymbol) -> &mut Self {
        let text = self.tables.idents.resolve(sym);
        self.put(key, text.into())
    }

    fn child(&mut self, key: &str, child: &impl Encode) -> &mut Self {
        let value = child.encode(self.tables);
        self.put(key, value)
    }

    fn list<T: Encode>(&mut self, key: &str, items: &[T]) -> &mut Self {
        let tables = self.tables;
        self.put(key, encode_list(items, |item| item.encode(tables)))
    }

    fn finish(&mut self) -> Value {
        Value::Mapping(std::mem::take(&mut self.map))
    }
}

impl Encode for Program {
    fn encode(&self, tables: &SymbolTables) -> Value {
        Node::new(tables, self.line, None, "program")
            .list("classes", &self.classes)
            .finish()
    }
}

impl Encode for Class {
    fn encode(&self, tables: &SymbolTables) -> Value {
        Node::new(tables, self.line, None, "class_")
            .ident("name", self.name)
            .ident("parent", self.parent)
            .list("features", &self.features)
            .put("filename", tables.strings.resolve(self.filename).into())
            .finish()
    }
}

impl Encode for Feature {
    fn encode(&self, tables: &SymbolTables) -> Value {
        let mut node = Node::new(tables, self.line, None, self.tag());
        match &self.kind {
            FeatureKind::Method {
                name,
                formals,
                return_type,
                body,
            } => node
                .ident("name", *name)
                .list("formals", formals)
                .ident("return_type", *return_type)
                .child("expr", &**body),
            FeatureKind::Attr {
                name,
                type_decl,
                init,
            } => node
                .ident("name", *name)
                .ident("type_decl", *type_decl)
                .child("init", &**init),
        };
        node.finish()
    }
}

impl Encode for Formal {
    fn encode(&self, tables: &SymbolTables) -> Value {
        Node::new(tables, self.line, None, "formal")
            .ident("name", self.name)
            .ident("type_decl", self.type_decl)
            .finish()
    }
}

impl Encode for Case {
    fn encode(&self, tables: &SymbolTables) -> Value {
        Node::new(tables, self.line, None, "branch")
            .ident("name", self.name)
            .ident("type_decl", self.type_decl)
            .child("expr", &*self.expr)
            .finish()
    }
}

impl Encode for Expr {
    fn encode(&self, tables: &SymbolTables) -> Value {
        ensure_sufficient_stack(|| encode_expr(self, tables))
    }
}

fn encode_expr(expr: &Expr, tables: &SymbolTables) -> Value {
    let mut node = Node::new(tables, expr.line, Some(expr.ty()), expr.tag());
    match &expr.kind {
        ExprKind::Assign { name, value } => node.ident("name", *name).child("expr", &**value),
        ExprKind::StaticDispatch {
            receiver,
            type_name,
            method,
            args,
        } => node
            .child("expr", &**receiver)
            .ident("type_name", *type_name)
            .ident("name", *method)
            .list("actual", args),
        ExprKind::Dispatch {
            receiver,
            method,
            args,
        } => node
            .child("expr", &**receiver)
            .ident("name", *method)
            .list("actual", args),
        ExprKind::Cond {
            pred,
            then_branch,
            else_branch,
        } => node
            .child("pred", &**pred)
            .child("then_exp", &**then_branch)
            .child("else_exp", &**else_branch),
        ExprKind::Loop { pred, body } => node.child("pred", &**pred).child("body", &**body),
        ExprKind::TypCase { scrutinee, cases } => {
            node.child("expr", &**scrutinee).list("cases", cases)
        }
        ExprKind::Block { body } => node.list("body", body),
        ExprKind::Let {
            name,
            type_decl,
            init,
            body,
        } => node
            .ident("identifier", *name)
            .ident("type_decl", *type_decl)
            .child("init", &**init)
            .child("body", &**body),
        ExprKind::Binary { lhs, rhs, .. } => node.child("e1", &**lhs).child("e2", &**rhs),
        ExprKind::Unary { operand, .. } | ExprKind::IsVoid(operand) => {
            node.child("e1", &**operand)
        }
        ExprKind::IntConst(token) => node.put("token", tables.ints.resolve(*token).into()),
        ExprKind::BoolConst(val) => node.put("val", u8::from(*val).into()),
        ExprKind::StringConst(token) => node.put("token", tables.strings.resolve(*token).into()),
        ExprKind::New(type_name) => node.ident("type_name", *type_name),
        ExprKind::NoExpr => &mut node,
        ExprKind::Object(name) => node.ident("name", *name),
    };
    node.finish()
}
