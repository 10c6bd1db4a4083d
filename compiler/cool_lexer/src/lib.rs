//! Token-side plumbing between a Cool lexer and the parser engine.
//!
//! - [`escape`]: the escaped form of string payloads in token documents
//! - [`TokenStream`]: pull adapter over a YAML token document
//! - [`encode_token`] / [`emit_token_document`]: write token documents
//! - [`describe_token`]: one-line debug rendering of a token

pub mod escape;

mod document;
mod stream;

pub use document::{describe_token, emit_token_document, encode_token, token_document};
pub use escape::{escape_string, unescape_string, EscapeError};
pub use stream::{StreamDiagnostic, StreamError, TokenStream, DEFAULT_FILENAME};
