use sqlgate::dialect::DialectRegistry;
use sqlgate::program::{parse_program, ParseResult};

fn parse(sql: &str) -> ParseResult {
    let registry = DialectRegistry::with_builtins();
    parse_program(&registry, "hive", sql).expect("hive is registered")
}

#[test]
fn backquoted_identifiers_parse() {
    let r = parse("select * from `db`.`events`;");
    assert_eq!(r.statements, vec!["select * from `db`.`events`;"]);
    assert_eq!(r.position, -1);
    assert_eq!(r.error, "");
}

#[test]
fn separator_inside_backquoted_identifier_does_not_split() {
    let r = parse("select `a;b` from t1;");
    assert_eq!(r.statements, vec!["select `a;b` from t1;"]);
    assert_eq!(r.position, -1);
}

#[test]
fn to_predict_suffix_yields_boundary() {
    let sql = "select customer_id from orders to predict churn;";
    let r = parse(sql);
    assert!(r.is_unfinished_select);
    assert_eq!(r.statements, vec!["select customer_id from orders "]);
    assert_eq!(r.position as usize, sql.find("to predict").unwrap());
    assert_eq!(r.error, "");
}

#[test]
fn non_query_statement_then_boundary() {
    let sql = "use db1; select 1 to train;";
    let r = parse(sql);
    assert!(r.is_unfinished_select);
    assert_eq!(r.statements, vec!["use db1;", " select 1 "]);
    assert!(sql[r.position as usize..].starts_with("to train"));
}

#[test]
fn hiveql_alias_resolves() {
    let registry = DialectRegistry::with_builtins();
    let sql = "select 1 to train;";
    let via_alias = parse_program(&registry, "hiveql", sql).unwrap();
    let direct = parse_program(&registry, "hive", sql).unwrap();
    assert_eq!(via_alias, direct);
}

#[test]
fn rejected_hive_program_reports_engine_message() {
    let r = parse("select select 1;");
    assert!(r.statements.is_empty());
    assert_eq!(r.position, -1);
    assert!(!r.error.is_empty());
}

#[test]
fn escaped_quote_in_string_stays_one_statement() {
    // Hive-style backslash escape inside a literal; the embedded ; must not split.
    let r = parse(r"select 'it\'s; fine' from t1;");
    assert_eq!(r.statements.len(), 1);
    assert_eq!(r.position, -1);
}
