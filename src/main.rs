//! CLI tool to scan Bantam Java source files.

use std::process::ExitCode;

use bantam_lex::{ErrorHandler, TokenKind};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: bantam-lex <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  scan    Print token spellings and an error summary");
        eprintln!("  tokens  Print each token's kind and spelling");
        eprintln!("  check   Report only whether files scan cleanly");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  bantam-lex scan Main.btm");
        eprintln!("  bantam-lex tokens Main.btm Util.btm");
        eprintln!("  bantam-lex check Main.btm");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    if !matches!(command, "scan" | "tokens" | "check") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    let mut had_error = false;
    let mut errors = ErrorHandler::new();

    for path in files {
        let tokens = match bantam_lex::scan_file(path, &mut errors) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                errors.clear();
                continue;
            }
        };

        match command {
            "scan" => {
                for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
                    println!("{}", token.spelling);
                }
            }
            "tokens" => {
                for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
                    println!("{token}");
                }
            }
            _ => {}
        }

        if errors.errors_found() {
            for error in errors.error_list() {
                eprintln!("{error}");
            }
            eprintln!("{path}: {} error(s) found", errors.error_count());
            had_error = true;
        } else {
            eprintln!("{path}: scanning was successful");
        }

        // One pass per file; reset the collector for the next one.
        errors.clear();
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
