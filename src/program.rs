//! Program-level parsing: drive the splitter and the prober across every
//! statement, accumulate accepted statements, and decide the terminal status.
//!
//! Position convention (kept consistent everywhere): `position == -1` with an
//! empty `error` means the whole program was accepted; `position == -1` with a
//! non-empty `error` means the program was rejected outright; `position >= 0`
//! is the offset into the original program where standard parsing stopped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::{DialectRegistry, GrammarEngine};
use crate::error::AppResult;
use crate::prober::{probe, Probe};
use crate::scanner::{leading_comment_len, LexRules};
use crate::splitter::split;

/// Input/output table lineage slot for one accepted statement. Lineage
/// extraction happens elsewhere; the records here stay empty so downstream
/// consumers keep positional alignment with `statements`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLineage {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Terminal output of one `parse_program` call. Fully populated before it is
/// handed to any caller; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Accepted statement texts in program order.
    pub statements: Vec<String>,
    /// Offset where standard parsing stopped, or -1.
    pub position: i64,
    /// Non-empty only when the program was rejected outright.
    pub error: String,
    /// True when the accepted prefix at `position` is query-shaped and may
    /// carry a non-standard trailing clause.
    pub is_unfinished_select: bool,
    /// One lineage slot per accepted statement.
    pub input_output_tables: Vec<TableLineage>,
}

impl ParseResult {
    fn empty() -> Self {
        ParseResult {
            statements: Vec::new(),
            position: 0,
            error: String::new(),
            is_unfinished_select: false,
            input_output_tables: Vec::new(),
        }
    }

    fn rejected(error: String) -> Self {
        ParseResult {
            statements: Vec::new(),
            position: -1,
            error,
            is_unfinished_select: false,
            input_output_tables: Vec::new(),
        }
    }
}

/// Parse `sql` with the engine registered for `dialect`.
///
/// An unknown dialect is an [`crate::error::AppError::NotFound`]; everything
/// else, including outright rejection of the program, comes back in-band as a
/// well-formed [`ParseResult`].
pub fn parse_program(registry: &DialectRegistry, dialect: &str, sql: &str) -> AppResult<ParseResult> {
    let (engine, rules) = registry.resolve(dialect)?;
    Ok(parse_program_with(engine.as_ref(), &rules, sql))
}

/// Parse `sql` with an explicit engine and lexical rules.
pub fn parse_program_with(engine: &dyn GrammarEngine, rules: &LexRules, sql: &str) -> ParseResult {
    let mut result = ParseResult::empty();
    let mut accepted_len: usize = 0;
    let mut stopped = false;

    let stmts = split(sql, rules);
    for (idx, stmt) in stmts.iter().enumerate() {
        match probe(engine, stmt) {
            Err(e) => {
                debug!(dialect = engine.dialect_name(), statement = idx, "probe failed: {}", e);
                return ParseResult::rejected(e.to_string());
            }
            Ok(Probe::Accepted { text }) => {
                result.statements.push(text);
                result.input_output_tables.push(TableLineage::default());
                accepted_len += stmt.text.len();
            }
            Ok(Probe::ExtensionBoundary { prefix_len, query_shaped }) => {
                if query_shaped {
                    result.statements.push(stmt.text[..prefix_len].to_string());
                    result.input_output_tables.push(TableLineage::default());
                    result.is_unfinished_select = true;
                    accepted_len += prefix_len;
                }
                // A non-query prefix is dropped entirely; the position simply
                // never advances past this statement.
                stopped = true;
                break;
            }
            Ok(Probe::Rejected { error }) => {
                if idx == 0 {
                    return ParseResult::rejected(error);
                }
                // A later statement's hard error does not fail the program:
                // the caller can still act on the accepted prefix.
                stopped = true;
                break;
            }
        }
    }

    if stopped {
        result.position = accepted_len as i64;
        // Never report a boundary inside comments trailing the accepted
        // prefix; the extension parser taking over at `position` does not
        // accept them.
        let unparsed = &sql[accepted_len..];
        result.position += leading_comment_len(unparsed, rules) as i64;
    } else {
        result.position = -1;
    }
    result
}
