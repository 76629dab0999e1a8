//! Lexical scanning of SQL templates for `?` markers.
//!
//! The scanner only understands as much SQL as it needs to tell a real
//! placeholder apart from a `?` that happens to sit inside a literal or a
//! comment:
//!
//! - `'...'` and `"..."` quoted sections (a doubled quote simply toggles
//!   twice, which leaves the state unchanged)
//! - `-- ...` line comments, ended by `\r` or `\n`
//! - `/* ... */` block comments, which may nest
//! - `\?`, an escaped marker that is emitted as a literal `?`
//!
//! All of the characters involved are ASCII, so scanning works on bytes and
//! every reported offset is a valid `char` boundary of the template.

/// Quote or comment context of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Plain SQL (possibly inside a block comment, see [`Scanner::block_depth`]).
    #[default]
    Normal,
    /// Inside a `'...'` literal.
    InSingleQuoted,
    /// Inside a `"..."` quoted identifier.
    InDoubleQuoted,
    /// Inside a `--` comment.
    InLineComment,
}

/// A marker-related event found while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A `?` eligible for substitution, at this byte offset.
    Marker(usize),
    /// A `\?` escape; the offset is that of the backslash.
    EscapedMarker(usize),
}

/// Single-pass scanner yielding the [`Token`]s of a template, in order.
///
/// Everything that is not a token is plain text to be copied verbatim.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: ScanState,
    block_depth: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over a SQL template.
    #[must_use]
    pub fn new(sql: &'a str) -> Self {
        Self {
            bytes: sql.as_bytes(),
            pos: 0,
            state: ScanState::Normal,
            block_depth: 0,
        }
    }

    /// Current quote/comment context.
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Current block comment nesting depth.
    #[must_use]
    pub fn block_depth(&self) -> usize {
        self.block_depth
    }

    /// Markers are only recognized outside quotes and comments.
    fn in_code(&self) -> bool {
        self.state == ScanState::Normal && self.block_depth == 0
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while let Some(&byte) = self.bytes.get(self.pos) {
            let at = self.pos;
            let next = self.peek();
            // Two-byte sequences are consumed whole so their second byte is
            // never re-examined.
            let mut width = 1;

            match byte {
                b'\\' if self.in_code() && next == Some(b'?') => {
                    self.pos += 2;
                    return Some(Token::EscapedMarker(at));
                }
                b'?' if self.in_code() => {
                    self.pos += 1;
                    return Some(Token::Marker(at));
                }
                b'-' if self.in_code() && next == Some(b'-') => {
                    self.state = ScanState::InLineComment;
                    width = 2;
                }
                b'\r' | b'\n' if self.state == ScanState::InLineComment => {
                    self.state = ScanState::Normal;
                }
                b'/' if self.state == ScanState::Normal && next == Some(b'*') => {
                    self.block_depth += 1;
                    width = 2;
                }
                // A stray `*/` at depth zero is plain text.
                b'*' if self.block_depth > 0 && next == Some(b'/') => {
                    self.block_depth -= 1;
                    width = 2;
                }
                b'\'' if self.block_depth == 0 => match self.state {
                    ScanState::Normal => self.state = ScanState::InSingleQuoted,
                    ScanState::InSingleQuoted => self.state = ScanState::Normal,
                    _ => {}
                },
                b'"' if self.block_depth == 0 => match self.state {
                    ScanState::Normal => self.state = ScanState::InDoubleQuoted,
                    ScanState::InDoubleQuoted => self.state = ScanState::Normal,
                    _ => {}
                },
                _ => {}
            }

            self.pos += width;
        }

        None
    }
}

/// Count the markers in a template that would consume a parameter.
///
/// Escaped markers and markers inside quotes or comments are not counted.
#[must_use]
pub fn count_markers(sql: &str) -> usize {
    Scanner::new(sql)
        .filter(|token| matches!(token, Token::Marker(_)))
        .count()
}
