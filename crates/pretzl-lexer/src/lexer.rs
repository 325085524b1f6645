//! Core Pretzl lexer: converts source text to a token stream.
//!
//! Rules, in priority order at each token start:
//! - a double-quoted string (no escapes, may span lines) is one token
//! - each of `( ) [ ]` is its own token
//! - otherwise a maximal run of non-whitespace, non-bracket characters
//!
//! Full-line `#` comments are blanked before scanning. Lexing never fails:
//! an unterminated quote simply starts an ordinary run.

use pretzl_types::SourceFile;

use crate::token::Token;

fn is_bracket(ch: char) -> bool {
    matches!(ch, '(' | ')' | '[' | ']')
}

/// Blank every line whose first non-whitespace character is `#`.
///
/// Newlines are kept so later line numbers are unaffected.
pub fn strip_comments(source: &str) -> String {
    source
        .split('\n')
        .map(|line| {
            if line.trim_start().starts_with('#') {
                ""
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The Pretzl lexer.
pub struct Lexer {
    /// Source text with comment lines blanked.
    source: String,
    /// Current byte offset into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Result of the last search for a `"`: the offset found, or `None` if
    /// none remains past where the search began. Cursor moves only forward,
    /// so a miss stays a miss.
    next_quote: Option<Option<usize>>,
}

impl Lexer {
    /// Create a new lexer for the given source file.
    pub fn new(source_file: &SourceFile) -> Self {
        Self {
            source: strip_comments(&source_file.source),
            pos: 0,
            line: 1,
            next_quote: None,
        }
    }

    /// Lex the entire source into a token stream.
    pub fn lex(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn rest(&self) -> &str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let start = self.pos;
        let line = self.line;

        match self.peek()? {
            '"' if self.closing_quote().is_some() => self.scan_string(),
            ch if is_bracket(ch) => {
                self.advance();
            }
            _ => {
                while self
                    .peek()
                    .is_some_and(|c| !c.is_whitespace() && !is_bracket(c))
                {
                    self.advance();
                }
            }
        }

        Some(Token::new(&self.source[start..self.pos], line))
    }

    /// Offset of the first `"` after the one at the cursor.
    fn closing_quote(&mut self) -> Option<usize> {
        let from = self.pos + 1;
        match self.next_quote {
            Some(Some(at)) if at >= from => return Some(at),
            Some(None) => return None,
            _ => {}
        }
        let found = self.source[from..].find('"').map(|i| from + i);
        self.next_quote = Some(found);
        found
    }

    /// Consume a quoted string through its closing quote.
    fn scan_string(&mut self) {
        self.advance();
        while let Some(ch) = self.advance() {
            if ch == '"' {
                break;
            }
        }
    }
}
