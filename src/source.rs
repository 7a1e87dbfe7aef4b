use std::fs;
use std::io;
use std::path::Path;

/// One unit read from a [`Source`].
///
/// End of line and end of input are tagged variants rather than
/// reserved character values, so no real input character can collide
/// with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChar {
    /// An ordinary source character (never `'\n'`).
    Char(char),
    /// End of a line (`'\n'` in the underlying text).
    Eol,
    /// End of input; returned forever once the text is exhausted.
    Eof,
}

impl SourceChar {
    /// True for characters the scanner skips between tokens.
    #[must_use]
    pub const fn is_whitespace(self) -> bool {
        match self {
            Self::Char(c) => c.is_whitespace(),
            Self::Eol => true,
            Self::Eof => false,
        }
    }
}

/// Character supplier for one compilation pass.
///
/// Yields one character per call and tracks the 1-based line number of
/// the character most recently returned. A returned [`SourceChar::Eol`]
/// still belongs to the line it ends; the following call reports the
/// next line.
#[derive(Debug, Clone)]
pub struct Source {
    filename: String,
    chars: Vec<char>,
    pos: usize,
    line: usize,
    bump_line: bool,
}

impl Source {
    /// Reads a source file into memory.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be opened or
    /// read. This is the only fatal failure of a pass; see
    /// [`crate::scan_file`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(&path)?;
        Ok(Self::from_text(path.as_ref().to_string_lossy(), &text))
    }

    /// Wraps an in-memory stream; `filename` is used only in
    /// diagnostics.
    #[must_use]
    pub fn from_text(filename: impl Into<String>, text: &str) -> Self {
        Self {
            filename: filename.into(),
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            bump_line: false,
        }
    }

    /// Returns the next character, or [`SourceChar::Eof`] forever once
    /// the text is exhausted.
    pub fn next_char(&mut self) -> SourceChar {
        if self.bump_line {
            self.line += 1;
            self.bump_line = false;
        }
        let Some(&c) = self.chars.get(self.pos) else {
            return SourceChar::Eof;
        };
        self.pos += 1;
        if c == '\n' {
            self.bump_line = true;
            SourceChar::Eol
        } else {
            SourceChar::Char(c)
        }
    }

    /// 1-based line of the character most recently returned.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn filename(&self) -> &str {
        self.filename.as_str()
    }
}
