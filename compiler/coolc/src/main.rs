//! Cool IR driver CLI.

use coolc::commands::{ast_file, parse_driver_options, tokens_file, DriverOptions};
use coolc::{init_tracing, DriverError};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "ast" => {
            let options = command_options(&args[2..]);
            exit_on_error(ast_file(&options));
        }
        "tokens" => {
            let options = command_options(&args[2..]);
            exit_on_error(tokens_file(&options));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" => {
            println!("coolc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn command_options(args: &[String]) -> DriverOptions {
    let mut options = DriverOptions::default();
    options.merge(&parse_driver_options(args));
    init_tracing(options.verbose);
    options
}

fn exit_on_error(result: Result<(), DriverError>) {
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Cool IR driver");
    println!();
    println!("Usage: coolc <command> [options] [FILE]");
    println!();
    println!("Commands:");
    println!("  ast [FILE]       Decode an AST document and re-encode it to stdout");
    println!("  tokens [FILE]    Print every token of a token document");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Options:");
    println!("  --input=<path>   Read from <path> (default: stdin, or FILE)");
    println!("  -v, --verbose    Debug logging when RUST_LOG is unset");
    println!();
    println!("Environment:");
    println!("  RUST_LOG         Log filter, e.g. RUST_LOG=cool_codec=trace");
}
