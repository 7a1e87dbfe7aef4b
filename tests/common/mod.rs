#![allow(dead_code)]

use bantam_lex::{ErrorHandler, Token, TokenKind, scan_text};

/// Helper: scan a whole input and hand back the stream plus the
/// collector so tests can inspect diagnostics.
pub fn scan_all(input: &str) -> (Vec<Token>, ErrorHandler) {
    let mut errors = ErrorHandler::new();
    let tokens = scan_text("test.btm", input, &mut errors);
    (tokens, errors)
}

/// Spellings of all tokens before end of input.
pub fn spellings(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.spelling.as_str())
        .collect()
}

/// Kinds of all tokens before end of input.
pub fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.kind)
        .collect()
}
