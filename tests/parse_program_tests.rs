use sqlgate::dialect::DialectRegistry;
use sqlgate::program::{parse_program, ParseResult};

fn parse(sql: &str) -> ParseResult {
    let registry = DialectRegistry::with_builtins();
    parse_program(&registry, "generic", sql).expect("generic is registered")
}

#[test]
fn all_standard_statements_accept_whole_program() {
    let sql = "select 1; select a from t1; insert into t1 values (1);";
    let r = parse(sql);
    assert_eq!(r.statements, vec!["select 1;", " select a from t1;", " insert into t1 values (1);"]);
    assert_eq!(r.position, -1);
    assert_eq!(r.error, "");
    assert!(!r.is_unfinished_select);
}

#[test]
fn trailing_statement_without_separator_accepts() {
    let r = parse("select 1; select 2");
    assert_eq!(r.statements, vec!["select 1;", " select 2"]);
    assert_eq!(r.position, -1);
}

#[test]
fn query_plus_extension_suffix_yields_boundary_after_query() {
    for s in ["select 1", "select a, b from t1", "select count(*) from t1 group by a"] {
        let sql = format!("{} to train;", s);
        let r = parse(&sql);
        assert!(r.is_unfinished_select, "no boundary found for {:?}", s);
        assert_eq!(r.position, s.len() as i64 + 1, "wrong position for {:?}", s);
        assert_eq!(r.statements, vec![format!("{} ", s)]);
        assert_eq!(r.error, "");
    }
}

#[test]
fn concrete_three_statement_scenario() {
    let sql = "select 1; select 1 to train; select 1";
    let r = parse(sql);
    assert_eq!(r.statements, vec!["select 1;", " select 1 "]);
    assert_eq!(r.position, 19);
    assert!(sql[r.position as usize..].starts_with("to train"));
    assert_eq!(r.error, "");
    assert!(r.is_unfinished_select);
}

#[test]
fn parse_is_idempotent() {
    let sql = "select 1; select 1 to train; select 1";
    let first = parse(sql);
    let second = parse(sql);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn first_statement_rejection_takes_precedence() {
    let r = parse("select select 1; select 1 to train;");
    assert!(r.statements.is_empty());
    assert_eq!(r.position, -1);
    assert!(!r.error.is_empty());
    assert!(!r.is_unfinished_select);
    // The message is the first statement's failure, not anything about the
    // second statement's suffix.
    assert!(!r.error.contains("train"));
}

#[test]
fn non_query_prefix_gets_no_boundary() {
    let r = parse("describe t1 to train;");
    assert!(r.statements.is_empty());
    assert!(!r.is_unfinished_select);
    assert_eq!(r.error, "");
}

#[test]
fn later_hard_error_returns_accepted_prefix() {
    let r = parse("select 1; select select 2;");
    assert_eq!(r.statements, vec!["select 1;"]);
    assert_eq!(r.error, "");
    assert!(!r.is_unfinished_select);
    assert!(r.position >= 9);
}

#[test]
fn unknown_dialect_is_an_error_not_a_result() {
    let registry = DialectRegistry::with_builtins();
    let err = parse_program(&registry, "oracle", "select 1").unwrap_err();
    assert_eq!(err.code_str(), "unknown_dialect");
    assert_eq!(err.http_status(), 404);
}

#[test]
fn dialect_aliases_parse_like_their_targets() {
    let registry = DialectRegistry::with_builtins();
    let sql = "select 1 to train;";
    let via_alias = parse_program(&registry, "calcite", sql).unwrap();
    let via_canonical = parse_program(&registry, "generic", sql).unwrap();
    assert_eq!(via_alias, via_canonical);
}

#[test]
fn unmappable_engine_failure_is_a_clean_error() {
    // Blow the engine's expression recursion limit: its failure report has no
    // source position, which must surface as a descriptive error rather than
    // a panic or a silent success.
    let sql = format!("select {}1{};", "(".repeat(200), ")".repeat(200));
    let r = parse(&sql);
    assert!(r.statements.is_empty());
    assert_eq!(r.position, -1);
    assert!(r.error.contains("cannot determine error position"));
}

#[test]
fn lineage_slots_stay_aligned() {
    let r = parse("select 1; select 2; select 3 to train;");
    assert_eq!(r.statements.len(), 3);
    assert_eq!(r.input_output_tables.len(), 3);
}
