//! Comment- and string-aware lexical scanning.
//!
//! The scanner knows just enough of a dialect's lexical rules to find real
//! statement separators: comments and quoted regions are consumed whole, so a
//! `;` inside either is never reported as a separator. It deliberately builds
//! no token values and no tree; the splitter only needs separator offsets and
//! a "did anything besides comments appear" signal.

/// Per-dialect lexical policy consulted by the scanner.
///
/// Both built-in dialects use `--` line comments and `/* */` block comments;
/// they differ in whether block comments nest and whether a backslash escapes
/// the next character inside a single-quoted literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexRules {
    pub nested_block_comments: bool,
    pub backslash_escapes: bool,
}

/// Lexical rules for the generic (ANSI-like) dialect.
pub const GENERIC_RULES: LexRules = LexRules { nested_block_comments: true, backslash_escapes: false };

/// Lexical rules for the Hive dialect.
pub const HIVE_RULES: LexRules = LexRules { nested_block_comments: false, backslash_escapes: true };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexKind {
    /// A top-level `;`.
    Separator,
    /// Any other non-comment content (word, literal, operator character).
    Token,
    /// End of the text; emitted once, with offset `text.len()`.
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexKind,
    pub offset: usize,
}

/// Lazy scan over `text`. Consumed once; not restartable.
pub struct Scanner<'a> {
    text: &'a str,
    rules: LexRules,
    pos: usize,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, rules: &LexRules) -> Self {
        Scanner { text, rules: *rules, pos: 0, finished: false }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn starts_with(&self, pat: &str) -> bool {
        self.text[self.pos..].starts_with(pat)
    }

    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    /// Skip a `--` line comment, leaving the cursor on the newline (if any).
    fn skip_line_comment(&mut self) {
        match self.text[self.pos..].find('\n') {
            Some(rel) => self.pos += rel,
            None => self.pos = self.text.len(),
        }
    }

    /// Skip a `/* ... */` block comment. An unterminated comment consumes the
    /// rest of the text.
    fn skip_block_comment(&mut self) {
        self.pos += 2;
        let mut depth = 1usize;
        while self.pos < self.text.len() {
            if self.starts_with("*/") {
                self.pos += 2;
                depth -= 1;
                if depth == 0 {
                    return;
                }
            } else if self.rules.nested_block_comments && self.starts_with("/*") {
                self.pos += 2;
                depth += 1;
            } else {
                let ch = self.peek().expect("in-bounds");
                self.bump(ch);
            }
        }
    }

    /// Skip a quoted region delimited by `quote`. A doubled delimiter stays
    /// inside the region; so does a backslash-escaped character when the
    /// dialect allows it. An unterminated region consumes the rest of the
    /// text.
    fn skip_quoted(&mut self, quote: char) {
        self.bump(quote);
        while let Some(ch) = self.peek() {
            if ch == '\\' && self.rules.backslash_escapes && quote == '\'' {
                self.bump(ch);
                if let Some(escaped) = self.peek() {
                    self.bump(escaped);
                }
                continue;
            }
            if ch == quote {
                self.bump(ch);
                // Doubled delimiter: literal quote, region continues.
                if self.peek() == Some(quote) {
                    self.bump(quote);
                    continue;
                }
                return;
            }
            self.bump(ch);
        }
    }

    /// Consume a run of word characters starting at the cursor.
    fn skip_word(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                self.bump(ch);
            } else {
                break;
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        if self.finished {
            return None;
        }
        while self.pos < self.text.len() {
            let start = self.pos;
            let ch = self.peek().expect("in-bounds");
            if ch.is_whitespace() {
                self.bump(ch);
                continue;
            }
            if self.starts_with("--") {
                self.skip_line_comment();
                continue;
            }
            if self.starts_with("/*") {
                self.skip_block_comment();
                continue;
            }
            if ch == '\'' || ch == '"' || ch == '`' {
                self.skip_quoted(ch);
                return Some(Lexeme { kind: LexKind::Token, offset: start });
            }
            if ch == ';' {
                self.bump(ch);
                return Some(Lexeme { kind: LexKind::Separator, offset: start });
            }
            if ch.is_alphanumeric() || ch == '_' {
                self.skip_word();
                return Some(Lexeme { kind: LexKind::Token, offset: start });
            }
            // Operator or punctuation character; one lexeme each.
            self.bump(ch);
            return Some(Lexeme { kind: LexKind::Token, offset: start });
        }
        self.finished = true;
        Some(Lexeme { kind: LexKind::EndOfInput, offset: self.text.len() })
    }
}

/// Offset of the first non-comment, non-whitespace content in `text`, or
/// `text.len()` when the text is empty or contains only comments and
/// whitespace. Used to keep reported boundary positions out of comments.
pub fn leading_comment_len(text: &str, rules: &LexRules) -> usize {
    match Scanner::new(text, rules).next() {
        Some(lex) => lex.offset,
        None => text.len(),
    }
}
