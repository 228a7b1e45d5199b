use sqlgate::dialect::DialectRegistry;
use sqlgate::program::{parse_program, ParseResult};

fn parse(sql: &str) -> ParseResult {
    let registry = DialectRegistry::with_builtins();
    parse_program(&registry, "generic", sql).expect("generic is registered")
}

#[test]
fn comment_only_program_accepts_with_no_statements() {
    for sql in ["-- just a comment\n", "/* block */", "-- a\n/* b */ -- c", ""] {
        let r = parse(sql);
        assert!(r.statements.is_empty(), "statements for {:?}", sql);
        assert_eq!(r.position, -1, "position for {:?}", sql);
        assert_eq!(r.error, "", "error for {:?}", sql);
    }
}

#[test]
fn separator_inside_line_comment_does_not_split() {
    let r = parse("select 1 -- ;\n");
    assert_eq!(r.statements.len(), 1);
    assert!(r.statements[0].starts_with("select 1"));
    assert_eq!(r.position, -1);
}

#[test]
fn separator_inside_block_comment_does_not_split() {
    let r = parse("select /* ; */ 1;");
    assert_eq!(r.statements, vec!["select /* ; */ 1;"]);
    assert_eq!(r.position, -1);
}

#[test]
fn separator_inside_string_literal_does_not_split() {
    let r = parse("select 'a;b'; select 2;");
    assert_eq!(r.statements, vec!["select 'a;b';", " select 2;"]);
    assert_eq!(r.position, -1);
}

#[test]
fn comment_only_tail_is_discarded() {
    let r = parse("select 1; -- the end; really\n");
    assert_eq!(r.statements, vec!["select 1;"]);
    assert_eq!(r.position, -1);
    assert_eq!(r.error, "");
}

#[test]
fn boundary_never_lands_inside_a_comment() {
    let sql = "select 1; -- note\nselect 2 to train;";
    let r = parse(sql);
    assert!(r.is_unfinished_select);
    assert!(sql[r.position as usize..].starts_with("to train"));
}

#[test]
fn stop_position_skips_comments_before_the_unparsed_rest() {
    // After the accepted first statement, the reported position must point at
    // the second statement's first real token, not at the comment before it.
    let sql = "select 1; /* pre */ select select 2;";
    let r = parse(sql);
    assert_eq!(r.statements, vec!["select 1;"]);
    assert_eq!(r.error, "");
    assert!(sql[r.position as usize..].starts_with("select select 2"));
}

#[test]
fn comment_between_statements_travels_with_the_next_fragment() {
    let sql = "select 1; /* note */ select 2;";
    let r = parse(sql);
    assert_eq!(r.statements, vec!["select 1;", " /* note */ select 2;"]);
    assert_eq!(r.position, -1);
}
