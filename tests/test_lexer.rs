use swage::errors::ForthError;
use swage::lexer::{parse_number, Lexer, TokenKind};
use swage::value::Value;

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn tokenizes_integers() {
    assert_eq!(
        kinds("42 -17 0"),
        vec![
            TokenKind::Value(Value::Int(42)),
            TokenKind::Value(Value::Int(-17)),
            TokenKind::Value(Value::Int(0)),
        ]
    );
}

#[test]
fn tokenizes_floats() {
    assert_eq!(
        kinds("0.75 -0.5 1e3 2.5e-2 3."),
        vec![
            TokenKind::Value(Value::Float(0.75)),
            TokenKind::Value(Value::Float(-0.5)),
            TokenKind::Value(Value::Float(1000.0)),
            TokenKind::Value(Value::Float(0.025)),
            TokenKind::Value(Value::Float(3.0)),
        ]
    );
}

#[test]
fn digit_led_names_are_names() {
    // Tokens that merely start like numbers resolve as words.
    assert_eq!(
        kinds("0BRANCH 1+ - 0="),
        vec![
            TokenKind::Name("0BRANCH".to_string()),
            TokenKind::Name("1+".to_string()),
            TokenKind::Name("-".to_string()),
            TokenKind::Name("0=".to_string()),
        ]
    );
}

#[test]
fn strings_span_whitespace() {
    assert_eq!(
        kinds("\"Hi There\""),
        vec![TokenKind::Str("Hi There".to_string())]
    );
    assert_eq!(
        kinds("3 \"a b\tc\" DUP"),
        vec![
            TokenKind::Value(Value::Int(3)),
            TokenKind::Str("a b\tc".to_string()),
            TokenKind::Name("DUP".to_string()),
        ]
    );
}

#[test]
fn empty_string_is_a_token() {
    assert_eq!(kinds("\"\""), vec![TokenKind::Str(String::new())]);
}

#[test]
fn offsets_point_into_the_source() {
    let tokens = Lexer::new("  DUP  42").tokenize().unwrap();
    assert_eq!(tokens[0].offset, 2);
    assert_eq!(tokens[1].offset, 7);
}

#[test]
fn unterminated_string_is_an_error() {
    let result = Lexer::new("1 \"abc").tokenize();
    assert_eq!(result, Err(ForthError::UnterminatedString { offset: 2 }));
}

#[test]
fn empty_source_has_no_tokens() {
    assert!(kinds("").is_empty());
    assert!(kinds(" \t\r\n").is_empty());
}

#[test]
fn number_grammar() {
    assert_eq!(parse_number("7"), Some(Value::Int(7)));
    assert_eq!(parse_number("-7"), Some(Value::Int(-7)));
    assert_eq!(parse_number("1.5"), Some(Value::Float(1.5)));
    assert_eq!(parse_number("2e2"), Some(Value::Float(200.0)));
    assert_eq!(parse_number("2E2"), Some(Value::Float(200.0)));
    assert_eq!(parse_number("1e+2"), Some(Value::Float(100.0)));

    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("-"), None);
    assert_eq!(parse_number("--1"), None);
    assert_eq!(parse_number("e5"), None);
    assert_eq!(parse_number(".5"), None);
    assert_eq!(parse_number("1e"), None);
    assert_eq!(parse_number("1.2.3"), None);
    assert_eq!(parse_number("0x10"), None);
    assert_eq!(parse_number("1+"), None);
}

#[test]
fn huge_integers_fall_back_to_float() {
    match parse_number("99999999999999999999") {
        Some(Value::Float(x)) => assert!(x > 9.9e18),
        other => panic!("expected float, got {:?}", other),
    }
}
