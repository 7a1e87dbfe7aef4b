//! Error-recovering lexical scanner for the Bantam Java teaching
//! language.
//!
//! A single-pass, character-at-a-time tokenizer that converts raw
//! source text into a stream of typed tokens for a downstream parser.
//! Malformed input never aborts a scan: each recoverable problem
//! registers one diagnostic with the shared [`ErrorHandler`] and yields
//! an error-kind token, and scanning resumes on the next character.
//!
//! # Quick start
//!
//! ## Scan a source string
//!
//! ```
//! use bantam_lex::{ErrorHandler, TokenKind, scan_text};
//!
//! let mut errors = ErrorHandler::new();
//! let tokens = scan_text("demo.btm", "count = count + 1;", &mut errors);
//!
//! assert!(!errors.errors_found());
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
//! assert_eq!(tokens[0].spelling, "count");
//! ```
//!
//! ## Drive the scanner one token at a time
//!
//! ```
//! use bantam_lex::{ErrorHandler, Scanner, Source, TokenKind};
//!
//! let mut errors = ErrorHandler::new();
//! let source = Source::from_text("demo.btm", "a && b");
//! let mut scanner = Scanner::new(source, &mut errors);
//!
//! loop {
//!     let token = scanner.scan();
//!     if token.kind == TokenKind::Eof {
//!         break;
//!     }
//!     println!("{token}");
//! }
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use std::io;
use std::path::Path;

pub mod error;
pub mod scanner;
pub mod source;
pub mod token;

pub use error::{Error, ErrorHandler, ErrorKind};
pub use scanner::{MAX_STRING_LENGTH, Scanner};
pub use source::{Source, SourceChar};
pub use token::{Token, TokenKind};

/// Scans an in-memory source to end of input.
///
/// The returned stream always ends with the [`TokenKind::Eof`] token.
/// Pass success is determined by inspecting `errors` afterwards, not
/// from token kinds alone.
pub fn scan_text(filename: &str, text: &str, errors: &mut ErrorHandler) -> Vec<Token> {
    drive(Scanner::new(Source::from_text(filename, text), errors))
}

/// Opens and scans a source file to end of input.
///
/// Failure to open or read the file is fatal: exactly one summary
/// diagnostic is registered at line 1 (no source position exists), the
/// error is returned, and no scanning is attempted.
pub fn scan_file<P: AsRef<Path>>(path: P, errors: &mut ErrorHandler) -> io::Result<Vec<Token>> {
    let path = path.as_ref();
    let source = match Source::from_file(path) {
        Ok(source) => source,
        Err(e) => {
            errors.register(
                ErrorKind::Lex,
                path.to_string_lossy(),
                1,
                "Failed to read source file",
            );
            return Err(e);
        }
    };
    Ok(drive(Scanner::new(source, errors)))
}

fn drive(mut scanner: Scanner<'_>) -> Vec<Token> {
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
