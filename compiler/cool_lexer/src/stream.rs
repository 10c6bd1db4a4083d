//! Token stream adapter.
//!
//! Turns a materialized token document
//! (`{name, tokens: [{kind, lineno, symbol?, boolean?}]}`) into the pull
//! interface the parser engine drives. The first pull reads and parses the
//! whole source; each later pull validates one token, interns its payload
//! into the injected [`SymbolTables`], and hands it back.
//!
//! Malformed tokens are soft: the adapter records a [`StreamDiagnostic`],
//! skips the token and yields [`TokenKind::Malformed`] so the engine's error
//! recovery can run. Only I/O failures and bad escapes in string payloads are
//! fatal.

use std::io::Read;

use serde_yaml::Value;
use tracing::{debug, trace, warn};

use cool_codec::scalar_text;
use cool_ir::{SymbolTables, Token, TokenKind, TokenValue};

use crate::escape::{unescape_bytes, unescape_string, EscapeError};

/// Filename used when a document has no `name`.
pub const DEFAULT_FILENAME: &str = "<stdin>";

/// Fatal adapter errors.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("failed to read token document: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad string literal at token #{position} (line {line}): {source}")]
    Escape {
        position: usize,
        line: u32,
        #[source]
        source: EscapeError,
    },
}

/// Soft problems found while streaming. The adapter keeps going after each.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StreamDiagnostic {
    #[error("failed to parse the input; expected a YAML token stream ({reason})")]
    MalformedDocument { reason: String },
    #[error("token stream has no name; using <stdin>")]
    MissingName,
    #[error("invalid token at token #{position}; expected a map")]
    NotAMap { position: usize },
    #[error("invalid lineno at token #{position}; expected an unsigned number, got {found:?}")]
    InvalidLineno { position: usize, found: String },
    #[error("invalid kind at token #{position}; expected a kind, got {found:?}")]
    InvalidKind { position: usize, found: String },
}

enum State {
    Uninitialized,
    Streaming { tokens: Vec<Value>, pos: usize },
    Exhausted,
}

/// Pull-based token source over a YAML token document.
pub struct TokenStream<'t, R> {
    source: Option<R>,
    tables: &'t SymbolTables,
    state: State,
    filename: String,
    line: u32,
    diagnostics: Vec<StreamDiagnostic>,
}

impl<'t, R: Read> TokenStream<'t, R> {
    pub fn new(source: R, tables: &'t SymbolTables) -> Self {
        TokenStream {
            source: Some(source),
            tables,
            state: State::Uninitialized,
            filename: DEFAULT_FILENAME.to_owned(),
            line: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Line of the most recent well-formed token.
    pub fn current_line(&self) -> u32 {
        self.line
    }

    /// Source filename from the document's `name`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn diagnostics(&self) -> &[StreamDiagnostic] {
        &self.diagnostics
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }

    /// Pull the next token. Yields `Eof` forever once the stream is done.
    pub fn next_token(&mut self) -> Result<Token, StreamError> {
        if let State::Uninitialized = self.state {
            // A failed read leaves nothing to retry.
            self.state = State::Exhausted;
            self.state = self.load()?;
        }

        let State::Streaming { tokens, pos } = &mut self.state else {
            return Ok(Token::eof(self.line));
        };

        let Some(node) = tokens.get(*pos) else {
            debug!(filename = %self.filename, "token stream exhausted");
            self.state = State::Exhausted;
            return Ok(Token::eof(self.line));
        };

        let position = *pos;
        *pos += 1;

        match Self::convert(node, position, self.tables) {
            Ok(token) => {
                self.line = token.line;
                trace!(pos = position, kind = %token.kind, line = token.line, "token");
                Ok(token)
            }
            Err(Bad::Soft(diagnostic)) => Ok(self.malformed(diagnostic)),
            Err(Bad::Fatal(err)) => {
                self.state = State::Exhausted;
                Err(err)
            }
        }
    }

    fn malformed(&mut self, diagnostic: StreamDiagnostic) -> Token {
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
        Token::bare(TokenKind::Malformed, self.line)
    }

    /// Read and parse the whole source, producing the next state.
    fn load(&mut self) -> Result<State, StreamError> {
        let mut content = String::new();
        if let Some(mut source) = self.source.take() {
            source.read_to_string(&mut content)?;
        }

        let mut root = match serde_yaml::from_str::<Value>(&content) {
            Ok(Value::Mapping(root)) => root,
            Ok(_) => return Ok(self.give_up("root is not a map".to_owned())),
            Err(e) => return Ok(self.give_up(e.to_string())),
        };

        match root.get("name").and_then(scalar_text) {
            Some(name) => self.filename = name.into_owned(),
            None => {
                warn!("{}", StreamDiagnostic::MissingName);
                self.diagnostics.push(StreamDiagnostic::MissingName);
            }
        }

        match root.remove("tokens") {
            Some(Value::Sequence(tokens)) => {
                debug!(
                    filename = %self.filename,
                    count = tokens.len(),
                    "token document loaded"
                );
                Ok(State::Streaming { tokens, pos: 0 })
            }
            Some(_) => Ok(self.give_up("`tokens` is not a sequence".to_owned())),
            None => Ok(self.give_up("missing `tokens`".to_owned())),
        }
    }

    fn give_up(&mut self, reason: String) -> State {
        let diagnostic = StreamDiagnostic::MalformedDocument { reason };
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
        State::Exhausted
    }

    /// Validate one token node and intern its payload.
    fn convert(node: &Value, position: usize, tables: &SymbolTables) -> Result<Token, Bad> {
        let Value::Mapping(map) = node else {
            return Err(Bad::Soft(StreamDiagnostic::NotAMap { position }));
        };

        let lineno = map.get("lineno").and_then(scalar_text);
        let line = lineno
            .as_deref()
            .and_then(|text| text.parse::<u32>().ok())
            .ok_or_else(|| {
                Bad::Soft(StreamDiagnostic::InvalidLineno {
                    position,
                    found: lineno.as_deref().unwrap_or_default().to_owned(),
                })
            })?;

        let kind_text = map.get("kind").and_then(scalar_text);
        let kind = kind_text
            .as_deref()
            .and_then(TokenKind::from_name)
            .ok_or_else(|| {
                Bad::Soft(StreamDiagnostic::InvalidKind {
                    position,
                    found: kind_text.as_deref().unwrap_or_default().to_owned(),
                })
            })?;

        // An absent symbol reads as the empty string.
        let symbol = map.get("symbol").and_then(scalar_text);
        let symbol = symbol.as_deref().unwrap_or_default();

        let value = match kind {
            TokenKind::TypeId | TokenKind::ObjectId => {
                TokenValue::Ident(tables.idents.intern(symbol))
            }
            TokenKind::IntConst => TokenValue::Int(tables.ints.intern(symbol)),
            TokenKind::StrConst => {
                let bytes = unescape_bytes(symbol).map_err(|source| {
                    Bad::Fatal(StreamError::Escape {
                        position,
                        line,
                        source,
                    })
                })?;
                TokenValue::Str(tables.strings.intern_bytes(&bytes))
            }
            TokenKind::BoolConst => {
                let boolean = map.get("boolean").and_then(scalar_text);
                TokenValue::Bool(boolean.as_deref() == Some("true"))
            }
            TokenKind::Error => {
                TokenValue::Error(unescape_string(symbol).unwrap_or_else(|_| symbol.to_owned()))
            }
            _ => TokenValue::None,
        };

        Ok(Token::new(kind, line, value))
    }
}

enum Bad {
    Soft(StreamDiagnostic),
    Fatal(StreamError),
}

impl<R: Read> Iterator for TokenStream<'_, R> {
    type Item = Result<Token, StreamError>;

    /// Yields tokens up to, not including, `Eof`.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) if token.is_eof() => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests;
