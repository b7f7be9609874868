//! Key expression lexing, parsing and formatting

#[path = "../common/mod.rs"]
mod common;

use common::{partition, PROJECT};
use dsadmin::crates::core::expr::Symbol;
use dsadmin::{key_from_string, key_to_string, parse, tokenize, Key, PartitionId, PathElement, Token};
use proptest::prelude::*;

fn tokens(input: &str) -> Vec<Token> {
    tokenize(input).collect::<Result<_, _>>().unwrap()
}

// ============================================================================
// Lexer
// ============================================================================

#[test]
fn lexes_simple_key() {
    assert_eq!(
        tokens("key(MyModel,123)"),
        vec![
            Token::Identifier("key".into()),
            Token::Symbol(Symbol::LParen),
            Token::Identifier("MyModel".into()),
            Token::Symbol(Symbol::Comma),
            Token::Integer("123".into()),
            Token::Symbol(Symbol::RParen),
        ]
    );
}

#[test]
fn lexing_ignores_spaces() {
    assert_eq!(tokens("  key ( MyModel , 123 )  "), tokens("key(MyModel,123)"));
}

#[test]
fn lexer_stops_after_error() {
    let mut lexer = tokenize("key(#, 1)");
    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_err());
    assert!(lexer.next().is_none());
}

// ============================================================================
// Parser
// ============================================================================

#[test]
fn parses_single_segment() {
    let expr = parse("key(MyModel,123)").unwrap();
    assert_eq!(expr.path, vec![PathElement::with_id("MyModel", 123)]);
    assert_eq!(expr.project, None);
    assert_eq!(expr.namespace, None);
}

#[test]
fn parses_ancestor_path() {
    let expr = parse("key(AncestorModel,1,MyModel,'123')").unwrap();
    assert_eq!(
        expr.path,
        vec![
            PathElement::with_id("AncestorModel", 1),
            PathElement::with_name("MyModel", "123"),
        ]
    );
}

#[test]
fn rejects_malformed_keys() {
    for input in [
        "key(MyModel,)",
        "key(MyModel)",
        "key()",
        "",
        "MyModel,1",
        "key(MyModel,1",
        "key(MyModel,1))",
        "key(MyModel,1,)",
        "kee(MyModel,1)",
        "key(1,MyModel)",
        "key(NAMESPACE('ns'),PROJECT('p'),MyModel,1)",
        "key(PROJECT('a'),PROJECT('b'),MyModel,1)",
        "key(MyModel,'unterminated)",
    ] {
        let err = key_from_string(input, PROJECT, None).unwrap_err();
        assert_eq!(err.to_string(), "invalid key", "input {:?}", input);
    }
}

// ============================================================================
// Resolution and formatting
// ============================================================================

#[test]
fn resolves_against_ambient_partition() {
    let key = key_from_string("key(Task,'a')", PROJECT, Some("ns")).unwrap();
    assert_eq!(key, Key::with_name(partition(Some("ns")), "Task", "a"));

    let key = key_from_string("key(NAMESPACE(''),Task,'a')", PROJECT, Some("ns")).unwrap();
    assert_eq!(key.namespace(), None);
}

#[test]
fn other_project_same_namespace_formats_project_only() {
    let key = Key::with_id(PartitionId::new("other", Some("ns")), "Task", 7);
    assert_eq!(
        key_to_string(&key, PROJECT, Some("ns")),
        "key(PROJECT('other'), Task, 7)"
    );
}

#[test]
fn formats_every_clause_when_needed() {
    let key = Key::with_name(PartitionId::new("other", Some("ns")), "Task", "a")
        .child(PathElement::with_id("Sub Task", 3));
    assert_eq!(
        key_to_string(&key, PROJECT, None),
        "key(PROJECT('other'), NAMESPACE('ns'), Task, 'a', `Sub Task`, 3)"
    );
}

#[test]
fn names_with_apostrophes_round_trip() {
    let key = Key::with_name(partition(None), "Quote", "it's");
    let text = key_to_string(&key, PROJECT, None);
    assert_eq!(text, "key(Quote, \"it's\")");
    assert_eq!(key_from_string(&text, PROJECT, None).unwrap(), key);
}

// ============================================================================
// Round trip
// ============================================================================

fn path_element() -> impl Strategy<Value = PathElement> {
    let kind = "[A-Za-z][A-Za-z0-9_ .]{0,8}";
    prop_oneof![
        (kind, "[0-9]{1,19}").prop_map(|(k, id)| PathElement::with_id(k, id)),
        (kind, "[a-zA-Z0-9 ,()'._-]{0,12}").prop_map(|(k, name)| PathElement::with_name(k, name)),
    ]
}

fn namespace() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("ns".to_string())),
        "[a-z]{1,6}".prop_map(Some),
    ]
}

fn key() -> impl Strategy<Value = Key> {
    (
        prop_oneof![Just(PROJECT.to_string()), "[a-z][a-z-]{0,10}"],
        namespace(),
        prop::collection::vec(path_element(), 1..4),
    )
        .prop_map(|(project, ns, path)| Key::new(PartitionId::new(project, ns.as_deref()), path))
}

proptest! {
    #[test]
    fn format_then_parse_is_identity(
        key in key(),
        ambient_project in prop_oneof![Just(PROJECT.to_string()), Just("elsewhere".to_string())],
        ambient_namespace in namespace(),
    ) {
        let text = key_to_string(&key, &ambient_project, ambient_namespace.as_deref());
        let parsed = key_from_string(&text, &ambient_project, ambient_namespace.as_deref());
        prop_assert_eq!(parsed, Ok(key), "text {}", text);
    }

    #[test]
    fn tokenize_never_panics(input in "\\PC{0,40}") {
        for token in tokenize(&input) {
            let _ = token;
        }
    }
}
