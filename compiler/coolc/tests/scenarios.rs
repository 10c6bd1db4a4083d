//! End-to-end scenarios through the driver entry points.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use serde_yaml::Value;

use cool_codec::{emit_yaml, parse_yaml};
use cool_ir::symbol::names;
use cool_ir::{Class, Expr, Feature, Program, SymbolTables, Token, TokenKind, TokenValue};
use cool_lexer::{StreamDiagnostic, TokenStream};
use coolc::commands::{run_ast, run_tokens};
use coolc::DriverError;

const MINIMAL_CLASS_TOKENS: &str = "\
name: main.cl
tokens:
  - {kind: CLASS, lineno: 1}
  - {kind: TYPEID, lineno: 1, symbol: Main}
  - {kind: '{', lineno: 1}
  - {kind: '}', lineno: 1}
  - {kind: ';', lineno: 1}
";

/// Parser engine stand-in that accepts exactly `class TYPEID { };`.
fn parse_empty_class(stream: &mut TokenStream<'_, &[u8]>, tables: &SymbolTables) -> Program {
    let mut next = || stream.next_token().unwrap();

    let class = next();
    assert_eq!(class.kind, TokenKind::Class);
    let TokenValue::Ident(name) = next().value else {
        panic!("expected a type name");
    };
    assert_eq!(next().kind, TokenKind::LBrace);
    assert_eq!(next().kind, TokenKind::RBrace);
    assert_eq!(next().kind, TokenKind::Semicolon);
    assert!(next().is_eof());

    let filename = tables.strings.intern(stream.filename());
    let class = Class::new(class.line, name, tables.object(), Vec::new(), filename);
    Program::new(class.line, vec![class])
}

fn yaml(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap()
}

#[test]
fn minimal_class() {
    let tables = SymbolTables::new();
    let mut stream = TokenStream::new(MINIMAL_CLASS_TOKENS.as_bytes(), &tables);
    let program = parse_empty_class(&mut stream, &tables);
    assert!(stream.diagnostics().is_empty());

    let [class] = program.classes.as_slice() else {
        panic!("expected one class");
    };
    assert_eq!(tables.idents.resolve(class.name), "Main");
    assert_eq!(tables.idents.resolve(class.parent()), names::OBJECT);
    assert!(class.features.is_empty());
    assert_eq!(tables.strings.resolve(class.filename()), "main.cl");

    let encoded = yaml(&emit_yaml(&program, &tables).unwrap());
    let class_node = &encoded["classes"][0];
    assert_eq!(class_node["class"], yaml("class_"));
    assert_eq!(class_node["name"], yaml("Main"));
    assert_eq!(class_node["parent"], yaml("Object"));
    assert_eq!(class_node["features"], Value::Sequence(Vec::new()));
    assert_eq!(class_node["filename"], yaml("main.cl"));
}

#[test]
fn minimal_class_token_dump() {
    let tables = SymbolTables::new();
    let mut out = Vec::new();
    let dump = run_tokens(MINIMAL_CLASS_TOKENS.as_bytes(), &tables, &mut out).unwrap();

    assert_eq!(dump.filename, "main.cl");
    assert_eq!(dump.count, 5);
    assert!(dump.diagnostics.is_empty());
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "#name \"main.cl\"\n\
         #1 CLASS\n\
         #1 TYPEID = Main\n\
         #1 '{'\n\
         #1 '}'\n\
         #1 ';'\n"
    );
}

#[test]
fn malformed_token() {
    let doc = "\
name: bad.cl
tokens:
  - {kind: OBJECTID, lineno: 3, symbol: x}
  - {kind: BOGUS, lineno: 4}
  - {kind: INT_CONST, lineno: 5, symbol: '42'}
";
    let tables = SymbolTables::new();
    let mut stream = TokenStream::new(doc.as_bytes(), &tables);

    let first = stream.next_token().unwrap();
    assert_eq!(first.kind, TokenKind::ObjectId);

    let bogus = stream.next_token().unwrap();
    assert_eq!(bogus, Token::bare(TokenKind::Malformed, 3));
    assert_eq!(bogus.code(), 256);
    assert_eq!(stream.current_line(), 3);

    let int = stream.next_token().unwrap();
    assert_eq!(int.kind, TokenKind::IntConst);
    assert_eq!(int.line, 5);
    assert_eq!(int.value, TokenValue::Int(tables.ints.lookup_by_text("42").unwrap()));
    assert_eq!(stream.current_line(), 5);

    assert!(stream.next_token().unwrap().is_eof());
    assert_eq!(
        stream.diagnostics(),
        &[StreamDiagnostic::InvalidKind {
            position: 1,
            found: "BOGUS".to_owned(),
        }]
    );
}

#[test]
fn malformed_token_dump() {
    let doc = "\
name: bad.cl
tokens:
  - {kind: BOGUS, lineno: 4}
  - {kind: NOT, lineno: 6}
";
    let tables = SymbolTables::new();
    let mut out = Vec::new();
    let dump = run_tokens(doc.as_bytes(), &tables, &mut out).unwrap();

    assert_eq!(dump.count, 2);
    assert_eq!(dump.diagnostics.len(), 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "#name \"bad.cl\"\n#0 <Invalid Token>\n#6 NOT\n"
    );
}

#[test]
fn bad_string_escape_is_fatal() {
    let doc = "\
name: s.cl
tokens:
  - {kind: STR_CONST, lineno: 2, symbol: 'ends with \\'}
";
    let tables = SymbolTables::new();
    let err = run_tokens(doc.as_bytes(), &tables, Vec::new()).unwrap_err();
    assert!(matches!(err, DriverError::Stream(_)));
}

#[test]
fn unset_expression_type() {
    let tables = SymbolTables::new();
    let main = tables.idents.intern("Main");
    let x = tables.idents.intern("x");
    let int = tables.idents.intern("Int");
    let filename = tables.strings.intern("t.cl");

    let init = Expr::int_const(2, tables.ints.intern_int(7));
    assert_eq!(init.ty(), None);
    let attr = Feature::attr(2, x, int, init);
    let program = Program::new(1, vec![Class::new(1, main, tables.object(), vec![attr], filename)]);

    let text = emit_yaml(&program, &tables).unwrap();
    let encoded = yaml(&text);
    let init_node = &encoded["classes"][0]["features"][0]["init"];
    assert_eq!(init_node["type"], yaml(names::NO_TYPE));

    let fresh = SymbolTables::new();
    let decoded = parse_yaml(&text, &fresh).unwrap();
    let cool_ir::FeatureKind::Attr { init, .. } = &decoded.value.classes[0].features[0].kind else {
        panic!("expected an attribute");
    };
    assert_eq!(init.ty(), None);
    assert!(fresh.idents.lookup_by_text(names::NO_TYPE).is_err());
}

#[test]
fn ast_round_trip_through_driver() {
    let tables = SymbolTables::new();
    let main = tables.idents.intern("Main");
    let int = tables.idents.intern("Int");
    let method = tables.idents.intern("main");
    let filename = tables.strings.intern("main.cl");

    let mut body = Expr::plus(
        3,
        Expr::int_const(3, tables.ints.intern_int(1)),
        Expr::int_const(3, tables.ints.intern_int(2)),
    );
    body.set_type(int);
    let feature = Feature::method(2, method, Vec::new(), int, body);
    let program = Program::new(1, vec![Class::new(1, main, tables.object(), vec![feature], filename)]);
    let text = emit_yaml(&program, &tables).unwrap();

    let mut out = Vec::new();
    let warnings = run_ast(text.as_bytes(), &SymbolTables::new(), &mut out).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(String::from_utf8(out).unwrap(), text);
}

#[test]
fn ast_warnings_are_returned() {
    let doc = "\
lineno: 1
class: program
classes:
  - lineno: 1
    class: class_
    name: Main
    parent: Object
    features: ~
    filename: a.cl
";
    let tables = SymbolTables::new();
    let mut out = Vec::new();
    let warnings = run_ast(doc.as_bytes(), &tables, &mut out).unwrap();
    assert_eq!(warnings.len(), 1);

    let encoded = yaml(&String::from_utf8(out).unwrap());
    assert_eq!(encoded["classes"][0]["features"], Value::Sequence(Vec::new()));
}

#[test]
fn ast_unknown_class_is_fatal() {
    let doc = "{lineno: 1, class: programme, classes: []}";
    let tables = SymbolTables::new();
    let err = run_ast(doc.as_bytes(), &tables, Vec::new()).unwrap_err();
    assert!(matches!(err, DriverError::Codec(_)));
    assert!(err.to_string().contains("programme"));
}

#[test]
fn deep_ast_through_driver() {
    let tables = SymbolTables::new();
    let a = tables.idents.intern("a");
    let mut sum = Expr::object(4, a);
    for _ in 0..200 {
        sum = Expr::plus(4, sum, Expr::object(4, a));
    }
    let feature = Feature::method(3, tables.idents.intern("f"), Vec::new(), a, sum);
    let main = tables.idents.intern("Main");
    let filename = tables.strings.intern("deep.cl");
    let program = Program::new(1, vec![Class::new(1, main, tables.object(), vec![feature], filename)]);
    let text = emit_yaml(&program, &tables).unwrap();

    let mut out = Vec::new();
    let warnings = run_ast(text.as_bytes(), &SymbolTables::new(), &mut out).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(String::from_utf8(out).unwrap(), text);
}

#[test]
fn latin1_string_token_dump() {
    let doc = r"
name: latin1.cl
tokens:
  - {kind: STR_CONST, lineno: 1, symbol: 'caf\351'}
  - {kind: ';', lineno: 1}
";
    let tables = SymbolTables::new();
    let mut out = Vec::new();
    let dump = run_tokens(doc.as_bytes(), &tables, &mut out).unwrap();
    assert_eq!(dump.count, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "#name \"latin1.cl\"\n#1 STR_CONST = \"caf\\351\"\n#1 ';'\n"
    );
}
