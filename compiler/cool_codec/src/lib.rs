//! YAML codec for the Cool AST.
//!
//! The YAML document is the hand-off format between pipeline phases: the
//! parser writes a [`Program`] with [`emit_yaml`], and later phases rebuild
//! it with [`parse_yaml`]. Decoding interns every symbol into the caller's
//! [`SymbolTables`].
//!
//! ```text
//! lineno: 1
//! class: program
//! classes:
//!   - lineno: 1
//!     class: class_
//!     name: Main
//!     parent: Object
//!     features: []
//!     filename: a.cl
//! ```

mod error;
mod list;
mod tree;
mod yaml;

use std::io::{Read, Write};

use serde_yaml::Value;
use tracing::debug;

use cool_ir::{Program, SymbolTables};

pub use error::{CodecError, CodecWarning};
pub use list::{decode_list, encode_list};
pub use tree::{decode, encode, Decode, Decoded, Decoder, Encode};
pub use yaml::{load_document, scalar_text};

/// Render a program as a YAML document.
#[tracing::instrument(level = "debug", skip_all)]
pub fn emit_yaml(program: &Program, tables: &SymbolTables) -> Result<String, CodecError> {
    Ok(serde_yaml::to_string(&program.encode(tables))?)
}

/// Write a program as a YAML document.
#[tracing::instrument(level = "debug", skip_all)]
pub fn write_yaml<W: Write>(
    writer: W,
    program: &Program,
    tables: &SymbolTables,
) -> Result<(), CodecError> {
    serde_yaml::to_writer(writer, &program.encode(tables))?;
    Ok(())
}

/// Parse a YAML document into a program.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_yaml(text: &str, tables: &SymbolTables) -> Result<Decoded<Program>, CodecError> {
    let root = load_document(text)?;
    decode_program(&root, tables)
}

/// Read and parse a YAML document into a program.
#[tracing::instrument(level = "debug", skip_all)]
pub fn read_yaml<R: Read>(
    mut reader: R,
    tables: &SymbolTables,
) -> Result<Decoded<Program>, CodecError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_yaml(&text, tables)
}

fn decode_program(root: &Value, tables: &SymbolTables) -> Result<Decoded<Program>, CodecError> {
    let decoded = decode::<Program>(root, tables)?;
    debug!(
        classes = decoded.value.classes.len(),
        warnings = decoded.warnings.len(),
        "decoded program"
    );
    Ok(decoded)
}
