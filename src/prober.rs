//! Extension-point probing.
//!
//! One statement at a time: ask the grammar engine to parse it whole; on
//! failure, map the reported position to an offset and re-parse the prefix
//! strictly before it. Only a prefix that independently re-validates as
//! complete standard SQL is trusted as an extension boundary; the failure
//! position alone is not a safe cut (it may land mid-expression).

use crate::dialect::{EngineError, GrammarEngine, GrammarOutcome, StatementShape};
use crate::position::offset_of;
use crate::splitter::RawStatement;

/// Per-statement probe verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum Probe {
    /// The whole statement is standard SQL. `text` is what the merger should
    /// record (the trailing separator is dropped when the engine's only
    /// complaint was the separator itself).
    Accepted { text: String },
    /// Standard SQL ends at `prefix_len`; the rest is a candidate extension
    /// suffix. `query_shaped` reports the prefix's shape classification.
    ExtensionBoundary { prefix_len: usize, query_shaped: bool },
    /// Not standard SQL at all. `error` carries the original failure message,
    /// never the derived probe's.
    Rejected { error: String },
}

pub fn probe(engine: &dyn GrammarEngine, stmt: &RawStatement) -> Result<Probe, EngineError> {
    let text = stmt.text.as_str();
    let (line, column, message) = match engine.parse(text)? {
        GrammarOutcome::Accepted(_) => return Ok(Probe::Accepted { text: text.to_string() }),
        GrammarOutcome::Rejected { line, column, message } => (line, column, message),
    };
    let p = offset_of(text, line, column);

    // Failure at the very first token: an empty prefix cannot be accepted,
    // so there is nothing to narrow.
    if p == 0 {
        return Ok(Probe::Rejected { error: message });
    }
    // Some engines do not expect the trailing separator; if that is the only
    // complaint, the statement minus its separator is fine.
    if p + 1 == text.len() && text.as_bytes()[p] == b';' {
        return Ok(Probe::Accepted { text: text[..p].to_string() });
    }
    // Failure at or past end of input: no shorter prefix can fare better.
    if p >= text.len() {
        return Ok(Probe::Rejected { error: message });
    }

    match engine.parse(&text[..p])? {
        GrammarOutcome::Accepted(_) => {
            let query_shaped = engine.classify(&text[..p]) == StatementShape::Query;
            Ok(Probe::ExtensionBoundary { prefix_len: p, query_shaped })
        }
        // The derived probe failed too: a truncation artifact, not the user's
        // real error. Surface the first failure.
        GrammarOutcome::Rejected { .. } => Ok(Probe::Rejected { error: message }),
    }
}
