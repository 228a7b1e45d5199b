//! Line/column to offset conversion shared by the scanner and the prober.
//!
//! Grammar engines report failures as 1-indexed (line, column) pairs; the rest
//! of the pipeline works with flat offsets into the original text. The mapping
//! depends only on the text, never on grammar specifics, so it lives here as a
//! pure function usable by every dialect.

/// Convert a 1-indexed (line, column) position into a byte offset into `text`.
///
/// Columns count characters, so a tab advances the column by exactly one. The
/// returned offset is a byte offset suitable for slicing `text`. If the
/// coordinates are never reached before the end of the text, `text.len()` is
/// returned rather than an error; callers treat that as "past the end".
pub fn offset_of(text: &str, line: u64, column: u64) -> usize {
    let mut l: u64 = 0;
    let mut c: u64 = 0;
    for (idx, ch) in text.char_indices() {
        if l == line.saturating_sub(1) && c == column.saturating_sub(1) {
            return idx;
        }
        if ch == '\n' {
            l += 1;
            c = 0;
        } else {
            c += 1;
        }
    }
    text.len()
}
