//! `ast`: decode an AST document and write it back out.

use std::io::{self, Read, Write};

use tracing::{debug, warn};

use cool_codec::{read_yaml, write_yaml, CodecWarning, Decoded};
use cool_ir::SymbolTables;

use super::{open_input, DriverOptions};
use crate::DriverError;

/// Decode the AST document in `input` and re-encode it to `out`.
///
/// Returns the decode warnings; the caller decides how to report them.
pub fn run_ast<R: Read, W: Write>(
    input: R,
    tables: &SymbolTables,
    mut out: W,
) -> Result<Vec<CodecWarning>, DriverError> {
    let Decoded { value, warnings } = read_yaml(input, tables)?;
    for warning in &warnings {
        warn!("{warning}");
    }
    debug!(classes = value.classes.len(), "re-encoding program");
    write_yaml(&mut out, &value, tables)?;
    out.flush()?;
    Ok(warnings)
}

/// Run `ast` on the input named by `options`, writing to stdout.
pub fn ast_file(options: &DriverOptions) -> Result<(), DriverError> {
    let tables = SymbolTables::new();
    let input = open_input(options)?;
    let warnings = run_ast(input, &tables, io::stdout().lock())?;
    for warning in &warnings {
        eprintln!("warning: {}: {warning}", options.input_name());
    }
    Ok(())
}
