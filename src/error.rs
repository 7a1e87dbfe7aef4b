use std::fmt;

/// Which compiler pass produced a diagnostic.
///
/// The collector is shared across one whole compilation pass, so the
/// kinds cover downstream passes too; this crate only ever registers
/// [`ErrorKind::Lex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Lexical error.
    Lex,
    /// Syntax error.
    Parse,
    /// Semantic error.
    Semant,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex => write!(f, "lex error"),
            Self::Parse => write!(f, "parse error"),
            Self::Semant => write!(f, "semantic error"),
        }
    }
}

/// A single diagnostic tied to a source location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {filename}:{line}: {message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub filename: String,
    pub line: usize,
    pub message: String,
}

/// Ordered, appendable diagnostic log for one compilation pass.
///
/// Shared by the scanner and any downstream consumer of the token
/// stream; diagnostics are kept in encounter order and never removed
/// except by [`ErrorHandler::clear`], which resets the collector for an
/// independent pass.
#[derive(Debug, Default, Clone)]
pub struct ErrorHandler {
    errors: Vec<Error>,
}

impl ErrorHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one diagnostic, preserving encounter order.
    pub fn register(
        &mut self,
        kind: ErrorKind,
        filename: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) {
        self.errors.push(Error {
            kind,
            filename: filename.into(),
            line,
            message: message.into(),
        });
    }

    #[must_use]
    pub const fn errors_found(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// All diagnostics registered so far, in encounter order.
    #[must_use]
    pub fn error_list(&self) -> &[Error] {
        &self.errors
    }

    /// Resets the collector for a new, independent pass.
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_encounter_order() {
        let mut handler = ErrorHandler::new();
        handler.register(ErrorKind::Lex, "a.btm", 1, "first");
        handler.register(ErrorKind::Lex, "a.btm", 3, "second");
        let list = handler.error_list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].message, "first");
        assert_eq!(list[1].message, "second");
    }

    #[test]
    fn clear_resets_for_reuse() {
        let mut handler = ErrorHandler::new();
        handler.register(ErrorKind::Lex, "a.btm", 1, "oops");
        assert!(handler.errors_found());
        handler.clear();
        assert!(!handler.errors_found());
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn display_includes_location() {
        let mut handler = ErrorHandler::new();
        handler.register(ErrorKind::Lex, "a.btm", 7, "String not terminated");
        let msg = handler.error_list()[0].to_string();
        assert!(msg.contains("a.btm:7"));
        assert!(msg.contains("String not terminated"));
    }
}
