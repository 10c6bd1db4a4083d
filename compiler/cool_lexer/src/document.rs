//! Token documents: the YAML form a lexer writes and [`TokenStream`] reads.
//!
//! [`TokenStream`]: crate::TokenStream

use serde_yaml::{Mapping, Value};

use cool_ir::{SymbolTables, Token, TokenValue};

use crate::escape::{escape_bytes, escape_string};

/// Encode one token as a document entry.
///
/// Keys are `kind`, `lineno`, then `symbol` for literal and identifier
/// kinds (string payloads escaped) or `boolean` for `BOOL_CONST`.
pub fn encode_token(token: &Token, tables: &SymbolTables) -> Value {
    let mut map = Mapping::new();
    map.insert("kind".into(), token.kind.name().into());
    map.insert("lineno".into(), token.line.into());

    let payload: Option<(&str, Value)> = match &token.value {
        TokenValue::Ident(sym) => Some(("symbol", tables.idents.resolve(*sym).into())),
        TokenValue::Int(sym) => Some(("symbol", tables.ints.resolve(*sym).into())),
        TokenValue::Str(sym) => {
            let escaped = escape_bytes(tables.strings.resolve_bytes(*sym));
            Some(("symbol", escaped.into()))
        }
        TokenValue::Bool(b) => Some(("boolean", Value::Bool(*b))),
        // An empty lexer error message marks a NUL in the input.
        TokenValue::Error(msg) if msg.is_empty() => Some(("symbol", "\\000".into())),
        TokenValue::Error(msg) => Some(("symbol", escape_string(msg).into())),
        TokenValue::None => None,
    };
    if let Some((key, value)) = payload {
        map.insert(key.into(), value);
    }

    Value::Mapping(map)
}

/// Build a whole token document.
pub fn token_document(name: &str, tokens: &[Token], tables: &SymbolTables) -> Value {
    let mut root = Mapping::new();
    root.insert("name".into(), name.into());
    root.insert(
        "tokens".into(),
        Value::Sequence(tokens.iter().map(|t| encode_token(t, tables)).collect()),
    );
    Value::Mapping(root)
}

/// Render a whole token document as YAML text.
pub fn emit_token_document(
    name: &str,
    tokens: &[Token],
    tables: &SymbolTables,
) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&token_document(name, tokens, tables))
}

/// Human-readable form of a token, as printed by token dumps.
///
/// Single-character kinds are quoted (`'+'`); payload-carrying kinds append
/// ` = value`.
pub fn describe_token(token: &Token, tables: &SymbolTables) -> String {
    let name = token.kind.name();
    let head = if token.kind.is_punctuation() {
        format!("'{name}'")
    } else {
        name.to_owned()
    };

    match &token.value {
        TokenValue::Str(sym) => {
            format!("{head} = \"{}\"", escape_bytes(tables.strings.resolve_bytes(*sym)))
        }
        TokenValue::Int(sym) => format!("{head} = {}", tables.ints.resolve(*sym)),
        TokenValue::Ident(sym) => format!("{head} = {}", tables.idents.resolve(*sym)),
        TokenValue::Bool(b) => format!("{head} = {b}"),
        TokenValue::Error(msg) => format!("{head} = {}", escape_string(msg)),
        TokenValue::None => head,
    }
}
