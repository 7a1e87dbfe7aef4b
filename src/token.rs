use std::fmt;

/// Token kinds produced by the scanner.
///
/// `Boolean` and `Keyword` are never emitted by the scanner on its own;
/// they exist as targets for a caller-supplied keyword table (see
/// [`crate::Scanner::with_keywords`]). Without a table, identifiers are
/// always emitted as `Identifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Integer constant (decimal digit run).
    IntConst,
    /// String constant (`"..."`, spelling includes the quotes).
    StrConst,
    /// Boolean constant, assigned via keyword table only.
    Boolean,
    /// Identifier: a letter followed by letters, digits, underscores.
    Identifier,
    /// Reserved word, assigned via keyword table only.
    Keyword,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LCurly,
    /// `}`
    RCurly,
    /// `+` or `-`
    PlusMinus,
    /// `*`, `/`, or `%`
    MulDiv,
    /// `<`, `<=`, `>`, `>=`, or `==`
    Compare,
    /// `++`
    UnaryIncr,
    /// `--`
    UnaryDecr,
    /// `=`
    Assign,
    /// `!`
    UnaryNot,
    /// `&&` or `||`
    BinaryLogic,
    /// Line comment (`// ...`) or block comment (`/* ... */`).
    Comment,
    /// Malformed input recovered into a single token.
    Error,
    /// End of input; produced forever once reached.
    Eof,
}

/// A single token: kind, exact source text, and starting line.
///
/// `spelling` is the literal text matched, delimiters included, never
/// normalized or escape-decoded, so consumers can reconstruct source
/// layout from the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub spelling: String,
    pub line: usize,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, spelling: String, line: usize) -> Self {
        Self {
            kind,
            spelling,
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.spelling)
    }
}
