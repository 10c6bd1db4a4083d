#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn stream<'t>(text: &'static str, tables: &'t SymbolTables) -> TokenStream<'t, &'static [u8]> {
    TokenStream::new(text.as_bytes(), tables)
}

fn kinds(text: &'static str) -> Vec<TokenKind> {
    let tables = SymbolTables::new();
    stream(text, &tables)
        .map(|t| t.unwrap().kind)
        .collect()
}

const MINIMAL_CLASS: &str = "\
name: a.cl
tokens:
  - {kind: CLASS, lineno: 1}
  - {kind: TYPEID, lineno: 1, symbol: Main}
  - {kind: '{', lineno: 1}
  - {kind: '}', lineno: 1}
  - {kind: ';', lineno: 1}
";

#[test]
fn minimal_class_tokens() {
    let tables = SymbolTables::new();
    let mut tokens = stream(MINIMAL_CLASS, &tables);

    let expected = [
        TokenKind::Class,
        TokenKind::TypeId,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::Semicolon,
    ];
    for kind in expected {
        let token = tokens.next_token().unwrap();
        assert_eq!(token.kind, kind);
        assert_eq!(token.line, 1);
    }
    assert_eq!(tokens.filename(), "a.cl");
    assert!(tokens.next_token().unwrap().is_eof());
    assert!(tokens.is_exhausted());
    assert!(tokens.diagnostics().is_empty());

    let main = tables.idents.lookup_by_text("Main").unwrap();
    assert_eq!(tables.idents.resolve(main), "Main");
}

#[test]
fn identifier_payload_is_interned() {
    let tables = SymbolTables::new();
    let mut tokens = stream(MINIMAL_CLASS, &tables);
    tokens.next_token().unwrap();
    let typeid = tokens.next_token().unwrap();
    assert_eq!(
        typeid.value,
        TokenValue::Ident(tables.idents.lookup_by_text("Main").unwrap())
    );
}

#[test]
fn eof_repeats_after_exhaustion() {
    let tables = SymbolTables::new();
    let mut tokens = stream("{name: a.cl, tokens: []}", &tables);
    for _ in 0..3 {
        let token = tokens.next_token().unwrap();
        assert!(token.is_eof());
        assert_eq!(token.code(), 0);
    }
}

#[test]
fn malformed_lineno_yields_error_code() {
    let tables = SymbolTables::new();
    let mut tokens = stream(
        "\
name: a.cl
tokens:
  - {kind: CLASS, lineno: 4}
  - {kind: CLASS, lineno: x}
  - {kind: CLASS, lineno: 6}
",
        &tables,
    );

    assert_eq!(tokens.next_token().unwrap().kind, TokenKind::Class);
    let bad = tokens.next_token().unwrap();
    assert_eq!(bad.kind, TokenKind::Malformed);
    assert_eq!(bad.code(), 256);
    // The line only moves on well-formed tokens.
    assert_eq!(tokens.current_line(), 4);

    assert_eq!(
        tokens.diagnostics(),
        &[StreamDiagnostic::InvalidLineno {
            position: 1,
            found: "x".to_owned(),
        }]
    );

    let next = tokens.next_token().unwrap();
    assert_eq!((next.kind, next.line), (TokenKind::Class, 6));
    assert_eq!(tokens.current_line(), 6);
}

#[test]
fn negative_lineno_is_malformed() {
    assert_eq!(
        kinds("{name: a, tokens: [{kind: CLASS, lineno: -1}]}"),
        vec![TokenKind::Malformed]
    );
}

#[test]
fn unknown_kind_is_malformed() {
    let tables = SymbolTables::new();
    let mut tokens = stream("{name: a, tokens: [{kind: BOGUS, lineno: 2}]}", &tables);
    assert_eq!(tokens.next_token().unwrap().kind, TokenKind::Malformed);
    assert_eq!(
        tokens.diagnostics(),
        &[StreamDiagnostic::InvalidKind {
            position: 0,
            found: "BOGUS".to_owned(),
        }]
    );
    assert_eq!(
        tokens.diagnostics()[0].to_string(),
        "invalid kind at token #0; expected a kind, got \"BOGUS\""
    );
}

#[test]
fn non_map_token_is_malformed() {
    assert_eq!(
        kinds("{name: a, tokens: [CLASS, {kind: FI, lineno: 1}]}"),
        vec![TokenKind::Malformed, TokenKind::Fi]
    );
}

#[test]
fn missing_symbol_reads_as_empty() {
    let tables = SymbolTables::new();
    let text = "\
name: a
tokens:
  - {kind: OBJECTID, lineno: 1}
  - {kind: INT_CONST, lineno: 2}
  - {kind: STR_CONST, lineno: 3}
";
    let tokens: Vec<Token> = stream(text, &tables).map(Result::unwrap).collect();

    let ident = tables.idents.lookup_by_text("").unwrap();
    let int = tables.ints.lookup_by_text("").unwrap();
    let string = tables.strings.lookup_by_text("").unwrap();
    let values: Vec<_> = tokens.into_iter().map(|t| t.value).collect();
    assert_eq!(
        values,
        vec![
            TokenValue::Ident(ident),
            TokenValue::Int(int),
            TokenValue::Str(string),
        ]
    );
}

#[test]
fn missing_symbol_has_no_diagnostic() {
    let tables = SymbolTables::new();
    let mut tokens = stream("{name: a, tokens: [{kind: TYPEID, lineno: 4}]}", &tables);
    let token = tokens.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::TypeId);
    assert_eq!(tokens.current_line(), 4);
    assert!(tokens.diagnostics().is_empty());
}

#[test]
fn high_octal_escapes_keep_raw_bytes() {
    let tables = SymbolTables::new();
    let text = r"
name: latin1.cl
tokens:
  - {kind: STR_CONST, lineno: 1, symbol: 'caf\351'}
  - {kind: OBJECTID, lineno: 2, symbol: y}
";
    let mut tokens = stream(text, &tables);

    let token = tokens.next_token().unwrap();
    let TokenValue::Str(sym) = token.value else {
        panic!("expected a string literal, got {token:?}");
    };
    assert_eq!(tables.strings.resolve_bytes(sym), b"caf\xe9");

    let next = tokens.next_token().unwrap();
    assert_eq!(next.kind, TokenKind::ObjectId);
    assert_eq!(next.line, 2);
    assert!(tokens.next_token().unwrap().is_eof());
    assert!(tokens.diagnostics().is_empty());
}

#[test]
fn literals_route_to_their_tables() {
    let tables = SymbolTables::new();
    let text = r#"
name: lit.cl
tokens:
  - {kind: INT_CONST, lineno: 1, symbol: 42}
  - {kind: STR_CONST, lineno: 2, symbol: 'tab\there'}
  - {kind: BOOL_CONST, lineno: 3, boolean: true}
  - {kind: BOOL_CONST, lineno: 3, boolean: false}
  - {kind: OBJECTID, lineno: 4, symbol: x}
"#;
    let tokens: Vec<Token> = stream(text, &tables).map(Result::unwrap).collect();

    let int = tables.ints.lookup_by_text("42").unwrap();
    let string = tables.strings.lookup_by_text("tab\there").unwrap();
    let x = tables.idents.lookup_by_text("x").unwrap();
    let values: Vec<_> = tokens.into_iter().map(|t| t.value).collect();
    assert_eq!(
        values,
        vec![
            TokenValue::Int(int),
            TokenValue::Str(string),
            TokenValue::Bool(true),
            TokenValue::Bool(false),
            TokenValue::Ident(x),
        ]
    );
    assert!(tables.ints.lookup_by_text("x").is_err());
    assert_eq!(tables.idents.len(), 1);
}

#[test]
fn error_token_carries_message() {
    let tables = SymbolTables::new();
    let mut tokens = stream(
        r"{name: a, tokens: [{kind: ERROR, lineno: 9, symbol: 'bad\000'}]}",
        &tables,
    );
    let token = tokens.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Error);
    assert_eq!(token.value, TokenValue::Error("bad\0".to_owned()));
}

#[test]
fn bad_string_escape_is_fatal() {
    let tables = SymbolTables::new();
    let mut tokens = stream(
        r"{name: a, tokens: [{kind: STR_CONST, lineno: 3, symbol: 'a\q'}]}",
        &tables,
    );
    let err = tokens.next_token().unwrap_err();
    assert!(matches!(
        err,
        StreamError::Escape {
            position: 0,
            line: 3,
            source: EscapeError::InvalidEscape { .. },
        }
    ));
    assert!(tokens.next_token().unwrap().is_eof());
}

#[test]
fn non_map_root_yields_eof() {
    let tables = SymbolTables::new();
    let mut tokens = stream("- just\n- a list\n", &tables);
    assert!(tokens.next_token().unwrap().is_eof());
    assert!(matches!(
        tokens.diagnostics(),
        [StreamDiagnostic::MalformedDocument { .. }]
    ));
    assert!(tokens.is_exhausted());
}

#[test]
fn yaml_syntax_error_yields_eof() {
    let tables = SymbolTables::new();
    let mut tokens = stream("name: [unclosed", &tables);
    assert!(tokens.next_token().unwrap().is_eof());
    assert_eq!(tokens.diagnostics().len(), 1);
}

#[test]
fn missing_tokens_is_malformed_document() {
    let tables = SymbolTables::new();
    let mut tokens = stream("name: a.cl", &tables);
    assert!(tokens.next_token().unwrap().is_eof());
    assert_eq!(
        tokens.diagnostics(),
        &[StreamDiagnostic::MalformedDocument {
            reason: "missing `tokens`".to_owned(),
        }]
    );
    assert_eq!(tokens.filename(), "a.cl");
}

#[test]
fn missing_name_defaults_to_stdin() {
    let tables = SymbolTables::new();
    let mut tokens = stream("tokens: [{kind: CLASS, lineno: 1}]", &tables);
    assert_eq!(tokens.next_token().unwrap().kind, TokenKind::Class);
    assert_eq!(tokens.filename(), DEFAULT_FILENAME);
    assert_eq!(tokens.diagnostics(), &[StreamDiagnostic::MissingName]);
}

#[test]
fn nothing_is_read_before_first_pull() {
    let tables = SymbolTables::new();
    let tokens = stream(MINIMAL_CLASS, &tables);
    assert_eq!(tokens.filename(), DEFAULT_FILENAME);
    assert_eq!(tokens.current_line(), 0);
    assert!(!tokens.is_exhausted());
}

#[test]
fn emitted_documents_stream_back() {
    let tables = SymbolTables::new();
    let written = vec![
        Token::bare(TokenKind::Let, 1),
        Token::new(TokenKind::ObjectId, 1, TokenValue::Ident(tables.idents.intern("s"))),
        Token::bare(TokenKind::Colon, 1),
        Token::new(TokenKind::TypeId, 1, TokenValue::Ident(tables.idents.intern("String"))),
        Token::bare(TokenKind::Assign, 1),
        Token::new(
            TokenKind::StrConst,
            2,
            TokenValue::Str(tables.strings.intern("quote\" and \\ slash\u{1}")),
        ),
        Token::new(TokenKind::BoolConst, 3, TokenValue::Bool(true)),
    ];
    let text = crate::emit_token_document("e.cl", &written, &tables).unwrap();

    let mut source = TokenStream::new(text.as_bytes(), &tables);
    let read: Vec<Token> = source.by_ref().map(Result::unwrap).collect();
    assert_eq!(read, written);
    assert_eq!(source.filename(), "e.cl");
}

#[test]
fn streams_are_deterministic() {
    let first = SymbolTables::new();
    let second = SymbolTables::new();
    let a: Vec<Token> = stream(MINIMAL_CLASS, &first).map(Result::unwrap).collect();
    let b: Vec<Token> = stream(MINIMAL_CLASS, &second).map(Result::unwrap).collect();
    assert_eq!(a, b);
    assert_eq!(first.idents.entries(), second.idents.entries());
}
