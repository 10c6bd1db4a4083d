//! Cool IR driver.
//!
//! Thin entry points over the IR crates:
//!
//! ```text
//! ast YAML ──► parse_yaml ──► Program ──► write_yaml ──► stdout
//! token YAML ──► TokenStream ──► describe_token ──► stdout
//! ```

use std::sync::Once;

pub mod commands;

/// Fatal driver errors. Each one ends the process with exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("cannot read '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
    #[error(transparent)]
    Codec(#[from] cool_codec::CodecError),
    #[error(transparent)]
    Stream(#[from] cool_lexer::StreamError),
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for the driver.
///
/// Reads `RUST_LOG`; `verbose` falls back to `debug` when it is unset.
/// Without either, nothing is installed and logging stays off. Output goes
/// to stderr so stdout carries only documents.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            return;
        };

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
