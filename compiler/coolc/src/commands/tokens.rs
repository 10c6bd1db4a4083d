//! `tokens`: pull a token document through the stream adapter.

use std::io::{self, Read, Write};

use cool_ir::SymbolTables;
use cool_lexer::{describe_token, StreamDiagnostic, TokenStream};

use super::{open_input, DriverOptions};
use crate::DriverError;

/// Summary of one token dump.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenDump {
    /// Filename from the document's `name`.
    pub filename: String,
    /// Tokens pulled before end of stream.
    pub count: usize,
    pub diagnostics: Vec<StreamDiagnostic>,
}

/// Stream every token in `input`, writing `#<line> <token>` per token.
///
/// The first output line names the source file. End of stream is not
/// printed.
pub fn run_tokens<R: Read, W: Write>(
    input: R,
    tables: &SymbolTables,
    mut out: W,
) -> Result<TokenDump, DriverError> {
    let mut stream = TokenStream::new(input, tables);
    let tokens = stream.by_ref().collect::<Result<Vec<_>, _>>()?;

    writeln!(out, "#name {:?}", stream.filename())?;
    for token in &tokens {
        writeln!(out, "#{} {}", token.line, describe_token(token, tables))?;
    }
    out.flush()?;

    Ok(TokenDump {
        filename: stream.filename().to_owned(),
        count: tokens.len(),
        diagnostics: stream.diagnostics().to_vec(),
    })
}

/// Run `tokens` on the input named by `options`, writing to stdout.
pub fn tokens_file(options: &DriverOptions) -> Result<(), DriverError> {
    let tables = SymbolTables::new();
    let input = open_input(options)?;
    let dump = run_tokens(input, &tables, io::stdout().lock())?;
    for diagnostic in &dump.diagnostics {
        eprintln!("warning: {}: {diagnostic}", dump.filename);
    }
    Ok(())
}
