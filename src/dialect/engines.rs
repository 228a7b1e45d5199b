//! Built-in grammar engines backed by the `sqlparser` crate.
//!
//! Each engine wraps a stock `sqlparser` dialect with one adjustment: `TO` is
//! never an implicit alias, so a pipeline suffix such as `to train ...`
//! terminates standard parsing at the `to` token instead of being absorbed as
//! a column or table alias. Error positions are recovered from the parser's
//! error text at this boundary; nothing upstream ever inspects parser
//! internals.

use once_cell::sync::Lazy;
use regex::Regex;
use sqlparser::ast::Statement;
use sqlparser::dialect::{Dialect, GenericDialect, HiveDialect};
use sqlparser::keywords::Keyword;
use sqlparser::parser::Parser;

use super::{EngineError, GrammarEngine, GrammarOutcome, StatementShape};

// sqlparser appends the failing token's location to its error text.
static POSITION_IN_ERROR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Line: (\d+), Column: (\d+)").expect("static regex"));

/// ANSI-like dialect with `TO` reserved at alias positions.
#[derive(Debug)]
struct GateGenericDialect {
    base: GenericDialect,
}

impl Dialect for GateGenericDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        self.base.is_identifier_start(ch)
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        self.base.is_identifier_part(ch)
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        self.base.is_delimited_identifier_start(ch)
    }

    fn is_column_alias(&self, kw: &Keyword, parser: &mut Parser) -> bool {
        *kw != Keyword::TO && self.base.is_column_alias(kw, parser)
    }

    fn is_table_alias(&self, kw: &Keyword, parser: &mut Parser) -> bool {
        *kw != Keyword::TO && self.base.is_table_alias(kw, parser)
    }
}

/// Hive dialect with `TO` reserved at alias positions.
#[derive(Debug)]
struct GateHiveDialect {
    base: HiveDialect,
}

impl Dialect for GateHiveDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        self.base.is_identifier_start(ch)
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        self.base.is_identifier_part(ch)
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        self.base.is_delimited_identifier_start(ch)
    }

    fn supports_string_literal_backslash_escape(&self) -> bool {
        self.base.supports_string_literal_backslash_escape()
    }

    fn supports_filter_during_aggregation(&self) -> bool {
        self.base.supports_filter_during_aggregation()
    }

    fn is_column_alias(&self, kw: &Keyword, parser: &mut Parser) -> bool {
        *kw != Keyword::TO && self.base.is_column_alias(kw, parser)
    }

    fn is_table_alias(&self, kw: &Keyword, parser: &mut Parser) -> bool {
        *kw != Keyword::TO && self.base.is_table_alias(kw, parser)
    }
}

fn shape_of(stmts: &[Statement]) -> StatementShape {
    match stmts.last() {
        Some(Statement::Query(_)) => StatementShape::Query,
        _ => StatementShape::Other,
    }
}

fn run_parser(dialect: &dyn Dialect, name: &'static str, text: &str) -> Result<GrammarOutcome, EngineError> {
    match Parser::parse_sql(dialect, text) {
        Ok(stmts) => Ok(GrammarOutcome::Accepted(shape_of(&stmts))),
        Err(err) => {
            let message = err.to_string();
            let parsed = POSITION_IN_ERROR.captures_iter(&message).last().and_then(|caps| {
                let line = caps[1].parse::<u64>().ok()?;
                let column = caps[2].parse::<u64>().ok()?;
                Some((line, column))
            });
            match parsed {
                Some((line, column)) => Ok(GrammarOutcome::Rejected { line, column, message }),
                None => Err(EngineError::UnmappablePosition { dialect: name, detail: message }),
            }
        }
    }
}

fn classify_with(dialect: &dyn Dialect, text: &str) -> StatementShape {
    match Parser::parse_sql(dialect, text) {
        Ok(stmts) => shape_of(&stmts),
        Err(_) => StatementShape::Other,
    }
}

#[derive(Debug)]
pub struct GenericEngine {
    dialect: GateGenericDialect,
}

impl GenericEngine {
    pub fn new() -> Self {
        GenericEngine { dialect: GateGenericDialect { base: GenericDialect {} } }
    }
}

impl Default for GenericEngine {
    fn default() -> Self {
        GenericEngine::new()
    }
}

impl GrammarEngine for GenericEngine {
    fn dialect_name(&self) -> &'static str {
        "generic"
    }

    fn parse(&self, text: &str) -> Result<GrammarOutcome, EngineError> {
        run_parser(&self.dialect, self.dialect_name(), text)
    }

    fn classify(&self, text: &str) -> StatementShape {
        classify_with(&self.dialect, text)
    }
}

#[derive(Debug)]
pub struct HiveEngine {
    dialect: GateHiveDialect,
}

impl HiveEngine {
    pub fn new() -> Self {
        HiveEngine { dialect: GateHiveDialect { base: HiveDialect {} } }
    }
}

impl Default for HiveEngine {
    fn default() -> Self {
        HiveEngine::new()
    }
}

impl GrammarEngine for HiveEngine {
    fn dialect_name(&self) -> &'static str {
        "hive"
    }

    fn parse(&self, text: &str) -> Result<GrammarOutcome, EngineError> {
        run_parser(&self.dialect, self.dialect_name(), text)
    }

    fn classify(&self, text: &str) -> StatementShape {
        classify_with(&self.dialect, text)
    }
}

pub fn new_generic() -> Box<dyn GrammarEngine> {
    Box::new(GenericEngine::new())
}

pub fn new_hive() -> Box<dyn GrammarEngine> {
    Box::new(HiveEngine::new())
}
