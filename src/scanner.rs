use std::collections::HashMap;

use crate::error::{ErrorHandler, ErrorKind};
use crate::source::{Source, SourceChar};
use crate::token::{Token, TokenKind};

/// Longest allowed string constant spelling, quotes included.
pub const MAX_STRING_LENGTH: usize = 5000;

/// Single-pass, error-recovering tokenizer.
///
/// One scanner is created per compilation pass, bound to one [`Source`]
/// and one shared [`ErrorHandler`]. Each call to [`Scanner::scan`]
/// produces exactly one token and advances the source by exactly the
/// characters that token consumed; malformed input registers a
/// diagnostic and yields a [`TokenKind::Error`] token instead of
/// failing, so a scan always runs to end of input. Once the end-of-input
/// token has been produced, further calls keep returning it.
pub struct Scanner<'a> {
    source: Source,
    errors: &'a mut ErrorHandler,
    current: SourceChar,
    keywords: HashMap<String, TokenKind>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner that registers diagnostics to `errors`.
    pub fn new(mut source: Source, errors: &'a mut ErrorHandler) -> Self {
        let current = source.next_char();
        Self {
            source,
            errors,
            current,
            keywords: HashMap::new(),
        }
    }

    /// Creates a scanner with a caller-supplied keyword table.
    ///
    /// The scanner hard-codes no reserved words; after an identifier
    /// run is collected, its spelling is looked up in the table and the
    /// mapped kind (typically [`TokenKind::Keyword`] or
    /// [`TokenKind::Boolean`]) replaces [`TokenKind::Identifier`].
    pub fn with_keywords<I, S>(source: Source, errors: &'a mut ErrorHandler, keywords: I) -> Self
    where
        I: IntoIterator<Item = (S, TokenKind)>,
        S: Into<String>,
    {
        let mut scanner = Self::new(source, errors);
        scanner.keywords = keywords
            .into_iter()
            .map(|(spelling, kind)| (spelling.into(), kind))
            .collect();
        scanner
    }

    /// Produces the next token.
    ///
    /// Returns a token of kind [`TokenKind::Eof`] at end of input, and
    /// on every call thereafter.
    pub fn scan(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.source.line();
        let c = match self.current {
            SourceChar::Char(c) => c,
            // Eol is whitespace, so only Eof survives the skip.
            SourceChar::Eol | SourceChar::Eof => {
                return Token::new(TokenKind::Eof, String::new(), line);
            }
        };

        if let Some(token) = self.single_char_token(c, line) {
            return token;
        }
        if let Some(token) = self.pair_or_string_token(c, line) {
            return token;
        }
        if c.is_ascii_digit() {
            return self.int_const_token(line);
        }
        if c.is_alphabetic() {
            return self.identifier_token(line);
        }
        if let Some(token) = self.maximal_munch_token(c, line) {
            return token;
        }
        self.illegal_char_token(c, line)
    }

    fn advance(&mut self) {
        self.current = self.source.next_char();
    }

    fn skip_whitespace(&mut self) {
        while self.current.is_whitespace() {
            self.advance();
        }
    }

    fn register(&mut self, line: usize, message: impl Into<String>) {
        let filename = self.source.filename().to_string();
        self.errors.register(ErrorKind::Lex, filename, line, message);
    }

    /// Tokens fully identified by their first character.
    fn single_char_token(&mut self, c: char, line: usize) -> Option<Token> {
        let kind = match c {
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LCurly,
            '}' => TokenKind::RCurly,
            '*' | '%' => TokenKind::MulDiv,
            '!' => TokenKind::UnaryNot,
            _ => return None,
        };
        self.advance();
        Some(Token::new(kind, c.to_string(), line))
    }

    /// `&&`, `||`, and the string literal opener, each resolved with
    /// one character of lookahead.
    fn pair_or_string_token(&mut self, c: char, line: usize) -> Option<Token> {
        match c {
            '&' | '|' => {
                self.advance();
                if self.current == SourceChar::Char(c) {
                    self.advance();
                    Some(Token::new(TokenKind::BinaryLogic, format!("{c}{c}"), line))
                } else {
                    self.register(line, format!("Badly formed binary logic operator: {c}"));
                    // Resynchronize past the offending character.
                    self.advance();
                    Some(Token::new(TokenKind::Error, c.to_string(), line))
                }
            }
            '"' => {
                self.advance();
                Some(self.string_token(line))
            }
            _ => None,
        }
    }

    /// String literal body; the opening quote is already consumed.
    fn string_token(&mut self, line: usize) -> Token {
        let mut spelling = String::from('"');
        // The limit is in characters; spelling.len() would count bytes.
        let mut length = 1;
        loop {
            if length > MAX_STRING_LENGTH {
                let at = self.source.line();
                self.register(at, "String exceeds maximum length");
                return Token::new(TokenKind::Error, spelling, line);
            }
            match self.current {
                SourceChar::Eol | SourceChar::Eof => {
                    let at = self.source.line();
                    self.register(at, "String not terminated");
                    return Token::new(TokenKind::Error, spelling, line);
                }
                SourceChar::Char('"') => {
                    spelling.push('"');
                    self.advance();
                    return Token::new(TokenKind::StrConst, spelling, line);
                }
                SourceChar::Char('\\') => {
                    spelling.push('\\');
                    length += 1;
                    self.advance();
                    match self.current {
                        SourceChar::Char(e @ ('n' | 't' | '"' | '\\' | 'f' | 'r')) => {
                            spelling.push(e);
                            length += 1;
                            self.advance();
                        }
                        SourceChar::Char(e) => {
                            spelling.push(e);
                            self.advance();
                            let at = self.source.line();
                            self.register(at, format!("Illegal escape char in string: \\{e}"));
                            return Token::new(TokenKind::Error, spelling, line);
                        }
                        SourceChar::Eol | SourceChar::Eof => {
                            let at = self.source.line();
                            self.register(at, "String not terminated");
                            return Token::new(TokenKind::Error, spelling, line);
                        }
                    }
                }
                SourceChar::Char(c) => {
                    spelling.push(c);
                    length += 1;
                    self.advance();
                }
            }
        }
    }

    /// Maximal run of decimal digits, checked against the i32 range.
    fn int_const_token(&mut self, line: usize) -> Token {
        let mut spelling = String::new();
        while let SourceChar::Char(c) = self.current {
            if !c.is_ascii_digit() {
                break;
            }
            spelling.push(c);
            self.advance();
        }

        if spelling.parse::<i32>().is_ok() {
            Token::new(TokenKind::IntConst, spelling, line)
        } else {
            self.register(line, "Invalid integer constant");
            Token::new(TokenKind::Error, spelling, line)
        }
    }

    /// Maximal run of letters, digits, and underscores. Never errors.
    fn identifier_token(&mut self, line: usize) -> Token {
        let mut spelling = String::new();
        while let SourceChar::Char(c) = self.current {
            if !c.is_alphanumeric() && c != '_' {
                break;
            }
            spelling.push(c);
            self.advance();
        }

        let kind = self
            .keywords
            .get(&spelling)
            .copied()
            .unwrap_or(TokenKind::Identifier);
        Token::new(kind, spelling, line)
    }

    /// Operators that share a leading character with a longer form,
    /// plus `/` which may open a comment. Longest match wins.
    fn maximal_munch_token(&mut self, c: char, line: usize) -> Option<Token> {
        match c {
            '+' | '-' => {
                self.advance();
                if self.current == SourceChar::Char(c) {
                    self.advance();
                    let kind = if c == '+' {
                        TokenKind::UnaryIncr
                    } else {
                        TokenKind::UnaryDecr
                    };
                    Some(Token::new(kind, format!("{c}{c}"), line))
                } else {
                    Some(Token::new(TokenKind::PlusMinus, c.to_string(), line))
                }
            }
            '<' | '>' => {
                self.advance();
                if self.current == SourceChar::Char('=') {
                    self.advance();
                    Some(Token::new(TokenKind::Compare, format!("{c}="), line))
                } else {
                    Some(Token::new(TokenKind::Compare, c.to_string(), line))
                }
            }
            '=' => {
                self.advance();
                if self.current == SourceChar::Char('=') {
                    self.advance();
                    Some(Token::new(TokenKind::Compare, "==".to_string(), line))
                } else {
                    Some(Token::new(TokenKind::Assign, "=".to_string(), line))
                }
            }
            '/' => {
                self.advance();
                match self.current {
                    SourceChar::Char('*') => {
                        self.advance();
                        Some(self.block_comment_token(line))
                    }
                    SourceChar::Char('/') => {
                        self.advance();
                        Some(self.line_comment_token(line))
                    }
                    _ => Some(Token::new(TokenKind::MulDiv, "/".to_string(), line)),
                }
            }
            _ => None,
        }
    }

    /// Block comment body; `/*` is already consumed. Comments do not
    /// nest: the first `*/` terminates.
    fn block_comment_token(&mut self, line: usize) -> Token {
        let mut spelling = String::from("/*");
        loop {
            match self.current {
                SourceChar::Eof => {
                    let at = self.source.line();
                    self.register(at, "Block comment not terminated");
                    return Token::new(TokenKind::Error, spelling, line);
                }
                SourceChar::Eol => {
                    spelling.push('\n');
                    self.advance();
                }
                SourceChar::Char('*') => {
                    spelling.push('*');
                    self.advance();
                    if self.current == SourceChar::Char('/') {
                        spelling.push('/');
                        self.advance();
                        return Token::new(TokenKind::Comment, spelling, line);
                    }
                }
                SourceChar::Char(c) => {
                    spelling.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Line comment body; `//` is already consumed. The terminating
    /// newline is left for the next token. Never errors.
    fn line_comment_token(&mut self, line: usize) -> Token {
        let mut spelling = String::from("//");
        while let SourceChar::Char(c) = self.current {
            spelling.push(c);
            self.advance();
        }
        Token::new(TokenKind::Comment, spelling, line)
    }

    /// No rule matched: one diagnostic, one character consumed.
    fn illegal_char_token(&mut self, c: char, line: usize) -> Token {
        self.register(line, format!("Unexpected character: {c}"));
        self.advance();
        Token::new(TokenKind::Error, c.to_string(), line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(input: &str) -> (Vec<Token>, ErrorHandler) {
        let mut errors = ErrorHandler::new();
        let mut scanner = Scanner::new(Source::from_text("test.btm", input), &mut errors);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.scan();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, errors)
    }

    #[test]
    fn punctuation_and_brackets() {
        let (tokens, errors) = scan_all(". : ; , ( ) [ ] { }");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Dot,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LCurly,
                TokenKind::RCurly,
                TokenKind::Eof,
            ]
        );
        assert!(!errors.errors_found());
    }

    #[test]
    fn maximal_munch_operators() {
        let (tokens, errors) = scan_all("+ ++ - -- < <= > >= = ==");
        let spellings: Vec<_> = tokens.iter().map(|t| t.spelling.as_str()).collect();
        assert_eq!(
            spellings,
            vec!["+", "++", "-", "--", "<", "<=", ">", ">=", "=", "==", ""]
        );
        assert!(!errors.errors_found());
    }

    #[test]
    fn adjacent_operators_prefer_longest() {
        let (tokens, _) = scan_all("+++");
        assert_eq!(tokens[0].spelling, "++");
        assert_eq!(tokens[1].spelling, "+");
    }

    #[test]
    fn binary_logic_operators() {
        let (tokens, errors) = scan_all("&& ||");
        assert_eq!(tokens[0].kind, TokenKind::BinaryLogic);
        assert_eq!(tokens[0].spelling, "&&");
        assert_eq!(tokens[1].kind, TokenKind::BinaryLogic);
        assert_eq!(tokens[1].spelling, "||");
        assert!(!errors.errors_found());
    }

    #[test]
    fn simple_string_constant() {
        let (tokens, errors) = scan_all("\"hello world\"");
        assert_eq!(tokens[0].kind, TokenKind::StrConst);
        assert_eq!(tokens[0].spelling, "\"hello world\"");
        assert!(!errors.errors_found());
    }

    #[test]
    fn string_spelling_is_raw() {
        // Escapes are preserved literally, never decoded.
        let (tokens, errors) = scan_all("\"a\\tb\\nc\"");
        assert_eq!(tokens[0].spelling, "\"a\\tb\\nc\"");
        assert!(!errors.errors_found());
    }

    #[test]
    fn line_comment_runs_to_end_of_line() {
        let (tokens, errors) = scan_all("x // trailing\ny");
        assert_eq!(tokens[0].spelling, "x");
        assert_eq!(tokens[1].kind, TokenKind::Comment);
        assert_eq!(tokens[1].spelling, "// trailing");
        assert_eq!(tokens[2].spelling, "y");
        assert!(!errors.errors_found());
    }

    #[test]
    fn block_comment_spans_lines() {
        let (tokens, errors) = scan_all("/* a\nb */ x");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].spelling, "/* a\nb */");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].spelling, "x");
        assert_eq!(tokens[1].line, 2);
        assert!(!errors.errors_found());
    }

    #[test]
    fn slash_alone_is_division() {
        let (tokens, errors) = scan_all("a / b");
        assert_eq!(tokens[1].kind, TokenKind::MulDiv);
        assert_eq!(tokens[1].spelling, "/");
        assert!(!errors.errors_found());
    }

    #[test]
    fn int_const_within_range() {
        let (tokens, errors) = scan_all("0 42 2147483647");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::IntConst));
        assert_eq!(tokens[2].spelling, "2147483647");
        assert!(!errors.errors_found());
    }

    #[test]
    fn identifier_with_digits_and_underscore() {
        let (tokens, errors) = scan_all("foo_bar42");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].spelling, "foo_bar42");
        assert!(!errors.errors_found());
    }

    #[test]
    fn identifier_cannot_start_with_digit() {
        // "9lives" is an int const followed by an identifier.
        let (tokens, errors) = scan_all("9lives");
        assert_eq!(tokens[0].kind, TokenKind::IntConst);
        assert_eq!(tokens[0].spelling, "9");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].spelling, "lives");
        assert!(!errors.errors_found());
    }

    #[test]
    fn keyword_table_reclassifies() {
        let mut errors = ErrorHandler::new();
        let mut scanner = Scanner::with_keywords(
            Source::from_text("test.btm", "class true x"),
            &mut errors,
            [
                ("class", TokenKind::Keyword),
                ("true", TokenKind::Boolean),
            ],
        );
        assert_eq!(scanner.scan().kind, TokenKind::Keyword);
        assert_eq!(scanner.scan().kind, TokenKind::Boolean);
        assert_eq!(scanner.scan().kind, TokenKind::Identifier);
    }

    #[test]
    fn token_lines_are_where_the_token_began() {
        let (tokens, _) = scan_all("a\nb\n  c");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[2].line, 3);
    }
}
