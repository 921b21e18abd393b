use climb::repl::list_operators;
use climb::{build_table, OperatorDef, ReplSession};
use climb_parser::ParserConfig;
use pretty_assertions::assert_eq;

fn defs(raw: &[&str]) -> Vec<OperatorDef> {
    raw.iter().map(|d| d.parse().unwrap()).collect()
}

#[test]
fn test_session_from_command_line_definitions() {
    let table = build_table(&defs(&["^=pow@*", "@=max@+"])).unwrap();
    let mut session = ReplSession::new(table, ParserConfig::default());

    let transcript: Vec<String> = ["2*3^2", "9@2*3", "(1+1)^3", ":q"]
        .iter()
        .flat_map(|line| session.handle_line(line).0)
        .collect();
    assert_eq!(transcript, vec!["= 18", "= 9", "= 8"]);
}

#[test]
fn test_operator_listing_after_extension() {
    let table = build_table(&defs(&["^=pow@*", "%=rem@^"])).unwrap();
    assert_eq!(
        list_operators(&table),
        vec![
            "priority 1: + -",
            "priority 2: * /",
            "priority 3: ^",
            "priority 4: %",
        ]
    );
}

#[test]
fn test_session_respects_nesting_limit() {
    let table = build_table(&[]).unwrap();
    let mut session = ReplSession::new(table, ParserConfig { max_nesting_depth: 1 });
    let (out, _) = session.handle_line("((1))");
    assert_eq!(out.len(), 1);
    assert!(
        out[0].starts_with("error: maximum nesting depth of 1 exceeded at pos 1"),
        "got: {}",
        out[0]
    );
}
