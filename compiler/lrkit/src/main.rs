//! lrkit CLI
//!
//! Loads a language directory and checks it, tokenizes a file with it or
//! parses a file with it.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use lrkit::commands::{check_language, lex_file, parse_file, CommandError};

fn main() -> ExitCode {
    lrkit::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let command = &args[1];
    let mut out = io::stdout().lock();

    let result = match command.as_str() {
        "check" => {
            if args.len() < 4 {
                eprintln!("Usage: lrkit check <dir> <name>");
                return ExitCode::FAILURE;
            }
            check_language(&mut out, Path::new(&args[2]), &args[3])
        }
        "lex" => {
            if args.len() < 5 {
                eprintln!("Usage: lrkit lex <dir> <name> <file>");
                return ExitCode::FAILURE;
            }
            lex_file(&mut out, Path::new(&args[2]), &args[3], Path::new(&args[4]))
        }
        "parse" => {
            if args.len() < 5 {
                eprintln!("Usage: lrkit parse <dir> <name> <file>");
                return ExitCode::FAILURE;
            }
            parse_file(&mut out, Path::new(&args[2]), &args[3], Path::new(&args[4]))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "version" | "--version" | "-V" => {
            println!("lrkit {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    exit_code(result)
}

fn exit_code(result: Result<bool, CommandError>) -> ExitCode {
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("lrkit: table-driven LR parsing");
    println!();
    println!("Usage: lrkit <command> [arguments]");
    println!();
    println!("Commands:");
    println!("  check <dir> <name>          Load a language and list its productions");
    println!("  lex <dir> <name> <file>     Tokenize a file and display the tokens");
    println!("  parse <dir> <name> <file>   Parse a file and display the reductions");
    println!("  help                        Show this help message");
    println!("  version                     Show version information");
    println!();
    println!("A language <name> in <dir> is read from <name>.grammar, <name>.table");
    println!("and, if present, <name>.error.");
    println!();
    println!("Environment:");
    println!("  LRKIT_LOG    Tracing filter, e.g. lrkit_parse=trace (falls back to RUST_LOG)");
}
