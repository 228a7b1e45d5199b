//! CLI support: result rendering and file-mode parsing shared by the
//! command-line binaries.

pub mod connectivity;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::dialect::DialectRegistry;
use crate::program::{parse_program, ParseResult};

/// Render a parse result as human-readable lines.
///
/// JSON stays available behind `--json`; this is the default interactive
/// output.
pub fn render_result(result: &ParseResult) -> String {
    let mut out = String::new();
    if !result.error.is_empty() {
        out.push_str(&format!("error: {}\n", result.error));
        return out;
    }
    for (i, stmt) in result.statements.iter().enumerate() {
        out.push_str(&format!("statement[{}]: {:?}\n", i, stmt));
    }
    if result.position < 0 {
        out.push_str("accepted: whole program\n");
    } else if result.is_unfinished_select {
        out.push_str(&format!("extension boundary at offset {}\n", result.position));
    } else {
        out.push_str(&format!("standard parsing stopped at offset {}\n", result.position));
    }
    out
}

/// Parse a SQL file and write the JSON result.
///
/// With `output == None` the result goes to stdout. This is the batch contract
/// used by pipeline drivers: one file in, one JSON document out.
pub fn parse_file(
    registry: &DialectRegistry,
    dialect: &str,
    input: &Path,
    output: Option<&Path>,
) -> Result<ParseResult> {
    let sql = fs::read_to_string(input)
        .with_context(|| format!("reading SQL from {}", input.display()))?;
    let result = parse_program(registry, dialect, &sql)?;
    let json = serde_json::to_string_pretty(&result).context("serializing parse result")?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("writing parse result to {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(result)
}
