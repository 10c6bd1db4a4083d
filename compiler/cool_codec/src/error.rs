//! Codec errors and warnings.
//!
//! Errors abort the decode; the caller decides whether to exit. Warnings
//! are collected alongside the decoded tree and decoding carries on.

/// A decode or emit failure.
///
/// `line` is the line of the node being decoded when it is known, otherwise
/// the line of its closest enclosing node.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid class {tag:?} for {phylum} node near line {line}")]
    UnknownClass {
        phylum: &'static str,
        tag: String,
        line: u32,
    },

    #[error("missing key `{key}` in {tag} node near line {line}")]
    MissingKey {
        key: &'static str,
        tag: String,
        line: u32,
    },

    #[error("expected a map for {phylum} node near line {line}")]
    NotAMap { phylum: &'static str, line: u32 },

    #[error("invalid lineno {found:?} in {tag} node near line {line}; expected an unsigned number")]
    BadLineno { tag: String, found: String, line: u32 },

    #[error("expected a scalar for `{key}` in {tag} node at line {line}")]
    NotScalar {
        key: &'static str,
        tag: String,
        line: u32,
    },

    #[error("malformed YAML: {0}")]
    Syntax(#[from] yaml_rust2::ScanError),

    #[error("YAML emit failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read YAML document: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Line the error refers to, if any.
    pub fn line(&self) -> Option<u32> {
        match self {
            CodecError::UnknownClass { line, .. }
            | CodecError::MissingKey { line, .. }
            | CodecError::NotAMap { line, .. }
            | CodecError::BadLineno { line, .. }
            | CodecError::NotScalar { line, .. } => Some(*line),
            CodecError::Syntax(_) | CodecError::Yaml(_) | CodecError::Io(_) => None,
        }
    }
}

/// A recoverable problem found while decoding.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CodecWarning {
    #[error("unexpected non-sequence ({found}) near line {line}; using an empty list")]
    NotASequence { found: &'static str, line: u32 },
}
