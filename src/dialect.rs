//! Grammar-engine capability contract and the dialect registry.
//!
//! The split/probe pipeline never talks to a SQL grammar directly; it goes
//! through the narrow [`GrammarEngine`] capability so that dialects are
//! interchangeable. The registry is an explicit table built once at startup
//! and injected wherever parsing happens; there is no ambient global state and
//! no plugin directory scanning.

use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::scanner::{LexRules, GENERIC_RULES, HIVE_RULES};

pub mod engines;

/// Shape of an already-valid statement: the query family (selection, set
/// operations, VALUES, ordering, table references) versus everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementShape {
    Query,
    Other,
}

/// Result of one grammar-engine invocation. Created fresh per invocation and
/// never cached; re-parsing shrinking prefixes is how the prober works.
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarOutcome {
    Accepted(StatementShape),
    Rejected { line: u64, column: u64, message: String },
}

/// Engine failure output the adapter could not interpret. This is the
/// defensive bucket: it must surface as a clean error, never succeed silently
/// and never escape as a panic.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("cannot determine error position from the {dialect} parser: {detail}")]
    UnmappablePosition { dialect: &'static str, detail: String },
}

/// The four operations a dialect backend must provide. Everything else
/// (splitting, probing, merging) is shared core logic.
pub trait GrammarEngine: std::fmt::Debug {
    /// Stable identifier used for registry lookup.
    fn dialect_name(&self) -> &'static str;

    /// Parse `text` as a complete program. On rejection the engine reports the
    /// 1-indexed position of the first unexpected token and its message.
    fn parse(&self, text: &str) -> Result<GrammarOutcome, EngineError>;

    /// Classify text already known to parse. Returns [`StatementShape::Other`]
    /// for anything that does not parse.
    fn classify(&self, text: &str) -> StatementShape;
}

type EngineCtor = fn() -> Box<dyn GrammarEngine>;

struct DialectEntry {
    ctor: EngineCtor,
    rules: LexRules,
}

/// Name -> engine-constructor table with alias support.
///
/// Engines are constructed per call rather than shared: the registry makes no
/// assumption that an engine instance tolerates concurrent use.
pub struct DialectRegistry {
    entries: HashMap<String, DialectEntry>,
    aliases: HashMap<String, String>,
}

impl DialectRegistry {
    pub fn new() -> Self {
        DialectRegistry { entries: HashMap::new(), aliases: HashMap::new() }
    }

    /// Registry preloaded with the built-in dialects and their aliases.
    pub fn with_builtins() -> Self {
        let mut reg = DialectRegistry::new();
        reg.register("generic", engines::new_generic, GENERIC_RULES);
        reg.register("hive", engines::new_hive, HIVE_RULES);
        reg.alias("ansi", "generic");
        reg.alias("calcite", "generic");
        reg.alias("mysql", "generic");
        reg.alias("hiveql", "hive");
        reg
    }

    pub fn register(&mut self, name: &str, ctor: EngineCtor, rules: LexRules) {
        self.entries.insert(name.to_string(), DialectEntry { ctor, rules });
    }

    /// Register `from` as an alternate name for the already-registered `to`.
    pub fn alias(&mut self, from: &str, to: &str) {
        self.aliases.insert(from.to_string(), to.to_string());
    }

    /// All resolvable names, canonical dialects first, then aliases, each
    /// group sorted.
    pub fn dialects(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        let mut aliased: Vec<String> = self.aliases.keys().cloned().collect();
        aliased.sort();
        names.extend(aliased);
        names
    }

    /// Create a fresh engine (and the matching lexical rules) for `name`.
    pub fn resolve(&self, name: &str) -> AppResult<(Box<dyn GrammarEngine>, LexRules)> {
        let canonical = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        match self.entries.get(canonical) {
            Some(entry) => Ok(((entry.ctor)(), entry.rules)),
            None => Err(AppError::not_found(
                "unknown_dialect".to_string(),
                format!("unrecognized dialect {}", name),
            )),
        }
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        DialectRegistry::with_builtins()
    }
}
