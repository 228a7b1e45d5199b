//! Statement splitting on top of the scanner.
//!
//! Fragments are contiguous slices of the program: each separator closes the
//! fragment that contains it, so concatenating all fragments (plus any
//! discarded comment-only tail) reproduces the input byte for byte. That
//! property is what lets the merger compute program offsets by summing
//! fragment lengths.

use crate::scanner::{LexKind, LexRules, Scanner};

/// One statement fragment: its source text (separator included, when present)
/// and its start offset within the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatement {
    pub text: String,
    pub start: usize,
}

/// Split `text` into statement fragments.
///
/// Trailing text after the last separator is kept as a final fragment only if
/// it contains something besides comments and whitespace; a comment-only or
/// empty tail produces no fragment.
pub fn split(text: &str, rules: &LexRules) -> Vec<RawStatement> {
    let mut stmts: Vec<RawStatement> = Vec::new();
    let mut pos = 0usize;
    let mut has_token = false;
    for lex in Scanner::new(text, rules) {
        match lex.kind {
            LexKind::EndOfInput => break,
            LexKind::Token => has_token = true,
            LexKind::Separator => {
                let end = lex.offset + 1;
                stmts.push(RawStatement { text: text[pos..end].to_string(), start: pos });
                pos = end;
                has_token = false;
            }
        }
    }
    if pos < text.len() && has_token {
        stmts.push(RawStatement { text: text[pos..].to_string(), start: pos });
    }
    stmts
}
