//! Command handlers for the `coolc` CLI.
//!
//! Each handler comes in two layers: a `run_*` function over any reader and
//! writer (used by tests), and a `*_file` wrapper that opens the input named
//! by [`DriverOptions`] and writes to stdout.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use crate::DriverError;

mod ast;
mod tokens;

pub use ast::{ast_file, run_ast};
pub use tokens::{run_tokens, tokens_file, TokenDump};

/// Options shared by every command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverOptions {
    /// Input document (--input=<path> or a bare path); stdin when absent
    pub input: Option<PathBuf>,
    /// Log at debug level when `RUST_LOG` is unset (-v, --verbose)
    pub verbose: bool,
}

impl DriverOptions {
    /// Overlay options parsed later on top of these.
    pub fn merge(&mut self, other: &Self) {
        if other.input.is_some() {
            self.input.clone_from(&other.input);
        }
        if other.verbose {
            self.verbose = true;
        }
    }

    /// Display name of the input, for messages.
    pub fn input_name(&self) -> String {
        self.input
            .as_ref()
            .map_or_else(|| "<stdin>".to_owned(), |p| p.display().to_string())
    }
}

/// Parse command options from the arguments following the command name.
pub fn parse_driver_options(args: &[String]) -> DriverOptions {
    let mut options = DriverOptions::default();

    for arg in args {
        if arg == "--verbose" || arg == "-v" {
            options.verbose = true;
        } else if let Some(path) = arg.strip_prefix("--input=") {
            options.input = Some(PathBuf::from(path));
        } else if arg == "-" {
            options.input = None;
        } else if arg.starts_with('-') {
            eprintln!("warning: unknown option '{arg}', ignoring");
        } else {
            options.input = Some(PathBuf::from(arg));
        }
    }

    options
}

/// Open the input named by the options, or stdin.
pub fn open_input(options: &DriverOptions) -> Result<Box<dyn Read>, DriverError> {
    match &options.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| DriverError::Open {
                path: path.display().to_string(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
