//! Tree codec between the AST and its YAML representation.
//!
//! Every node encodes as a map whose keys appear in a fixed order:
//! `lineno`, then `type` for expressions, then `class` (the node tag), then
//! the node's own fields. Decoding dispatches on `class` within each phylum
//! and rejects tags that do not belong to it.
//!
//! # Line context
//!
//! Each node takes its line from its own `lineno`. The [`Decoder`] tracks
//! the line of the enclosing node while its children are decoded, so errors
//! raised before a child's own `lineno` has been read still point somewhere
//! useful.

mod decode;
mod encode;

use std::borrow::Cow;

use serde_yaml::{Mapping, Value};

use cool_ir::{IdSymbol, SymbolTables};
use cool_stack::ensure_sufficient_stack;

use crate::error::{CodecError, CodecWarning};
use crate::list::decode_list;
use crate::yaml::scalar_text;

/// Nodes that have a YAML encoding.
pub trait Encode {
    fn encode(&self, tables: &SymbolTables) -> Value;
}

/// Nodes that can be rebuilt from their YAML encoding.
pub trait Decode: Sized {
    /// Phylum name used in diagnostics (`Expression`, `Feature`, ...).
    const PHYLUM: &'static str;

    fn decode(node: &Value, cx: &mut Decoder<'_>) -> Result<Self, CodecError>;
}

/// A decoded value and the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub value: T,
    pub warnings: Vec<CodecWarning>,
}

/// Decoding state: the symbol tables to intern into, the enclosing line and
/// the warnings collected so far.
pub struct Decoder<'t> {
    tables: &'t SymbolTables,
    line: u32,
    warnings: Vec<CodecWarning>,
}

impl<'t> Decoder<'t> {
    pub fn new(tables: &'t SymbolTables) -> Self {
        Decoder {
            tables,
            line: 0,
            warnings: Vec::new(),
        }
    }

    pub fn tables(&self) -> &'t SymbolTables {
        self.tables
    }

    /// Line of the node currently being decoded.
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn warn(&mut self, warning: CodecWarning) {
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[CodecWarning] {
        &self.warnings
    }

    /// Decode a root node, handing back the value and every warning.
    pub fn finish<T: Decode>(mut self, node: &Value) -> Result<Decoded<T>, CodecError> {
        let value = T::decode(node, &mut self)?;
        Ok(Decoded {
            value,
            warnings: self.warnings,
        })
    }

    /// Check that `node` is a map and read its `class` and `lineno`.
    pub(crate) fn open<'v>(
        &self,
        node: &'v Value,
        phylum: &'static str,
    ) -> Result<Fields<'v>, CodecError> {
        let Value::Mapping(map) = node else {
            return Err(CodecError::NotAMap {
                phylum,
                line: self.line,
            });
        };

        let mut fields = Fields {
            map,
            tag: Cow::Borrowed(phylum),
            line: self.line,
        };
        fields.tag = fields.text("class")?;

        let lineno = fields.text("lineno")?;
        fields.line = lineno.parse().map_err(|_| CodecError::BadLineno {
            tag: fields.tag.clone().into_owned(),
            found: lineno.clone().into_owned(),
            line: self.line,
        })?;

        Ok(fields)
    }

    /// Run `f` with the enclosing line set to `line`, restoring it after.
    fn nested<R>(&mut self, line: u32, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.line, line);
        let result = ensure_sufficient_stack(|| f(self));
        self.line = saved;
        result
    }

    /// Decode the child node stored under `key`.
    pub(crate) fn child<T: Decode>(
        &mut self,
        fields: &Fields<'_>,
        key: &'static str,
    ) -> Result<T, CodecError> {
        let node = fields.get(key)?;
        self.nested(fields.line, |cx| T::decode(node, cx))
    }

    /// Decode the list stored under `key`.
    pub(crate) fn list<T: Decode>(
        &mut self,
        fields: &Fields<'_>,
        key: &'static str,
    ) -> Result<Vec<T>, CodecError> {
        let node = fields.get(key)?;
        self.nested(fields.line, |cx| decode_list(node, cx, T::decode))
    }

    /// Intern the identifier stored under `key`.
    pub(crate) fn ident(&self, fields: &Fields<'_>, key: &'static str) -> Result<IdSymbol, CodecError> {
        Ok(self.tables.idents.intern(&fields.text(key)?))
    }
}

/// An opened node: its map, tag and own line.
pub(crate) struct Fields<'v> {
    map: &'v Mapping,
    pub(crate) tag: Cow<'v, str>,
    pub(crate) line: u32,
}

impl<'v> Fields<'v> {
    pub(crate) fn get(&self, key: &'static str) -> Result<&'v Value, CodecError> {
        self.map.get(key).ok_or_else(|| CodecError::MissingKey {
            key,
            tag: self.tag.clone().into_owned(),
            line: self.line,
        })
    }

    /// Scalar under `key` read as text. Null reads as the empty string.
    pub(crate) fn text(&self, key: &'static str) -> Result<Cow<'v, str>, CodecError> {
        let value = self.get(key)?;
        scalar_text(value).ok_or_else(|| CodecError::NotScalar {
            key,
            tag: self.tag.clone().into_owned(),
            line: self.line,
        })
    }

    pub(crate) fn unknown(&self, phylum: &'static str) -> CodecError {
        CodecError::UnknownClass {
            phylum,
            tag: self.tag.clone().into_owned(),
            line: self.line,
        }
    }
}

/// Encode any node.
pub fn encode<T: Encode + ?Sized>(node: &T, tables: &SymbolTables) -> Value {
    node.encode(tables)
}

/// Decode any node from its YAML encoding.
pub fn decode<T: Decode>(node: &Value, tables: &SymbolTables) -> Result<Decoded<T>, CodecError> {
    Decoder::new(tables).finish(node)
}
