use pretty_assertions::assert_eq;
use slang_ir::{Span, TokenKind};

use super::{tokenize, LexError};

fn lex(source: &str) -> Vec<(TokenKind, String)> {
    match tokenize(source) {
        Ok(tokens) => tokens.into_iter().map(|t| (t.kind, t.value)).collect(),
        Err(err) => panic!("unexpected lex error: {err}"),
    }
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|(kind, _)| kind).collect()
}

fn tok(kind: TokenKind, value: &str) -> (TokenKind, String) {
    (kind, value.to_string())
}

#[test]
fn empty_source_is_just_eof() {
    assert_eq!(lex(""), vec![tok(TokenKind::Eof, "EndOfFile")]);
    assert_eq!(lex("  \n\t\r "), vec![tok(TokenKind::Eof, "EndOfFile")]);
}

#[test]
fn end_to_end_example_tokens() {
    use TokenKind::*;
    assert_eq!(
        lex("let x = 2; let y = 3; x + y * 2;"),
        vec![
            tok(Let, "let"),
            tok(Identifier, "x"),
            tok(Equals, "="),
            tok(Number, "2"),
            tok(Semicolon, ";"),
            tok(Let, "let"),
            tok(Identifier, "y"),
            tok(Equals, "="),
            tok(Number, "3"),
            tok(Semicolon, ";"),
            tok(Identifier, "x"),
            tok(BinaryOperator, "+"),
            tok(Identifier, "y"),
            tok(BinaryOperator, "*"),
            tok(Number, "2"),
            tok(Semicolon, ";"),
            tok(Eof, "EndOfFile"),
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    use TokenKind::*;
    assert_eq!(
        kinds("let const fn if else for letter _x1 fn2 try"),
        vec![Let, Const, Fn, If, Else, For, Identifier, Identifier, Identifier, Identifier, Eof]
    );
}

#[test]
fn numbers_take_at_most_one_period() {
    use TokenKind::*;
    assert_eq!(lex("3.14"), vec![tok(Number, "3.14"), tok(Eof, "EndOfFile")]);
    assert_eq!(
        lex("1.2.3"),
        vec![tok(Number, "1.2"), tok(Dot, "."), tok(Number, "3"), tok(Eof, "EndOfFile")]
    );
}

#[test]
fn minus_is_absorbed_only_before_a_digit() {
    use TokenKind::*;
    assert_eq!(lex("-5"), vec![tok(Number, "-5"), tok(Eof, "EndOfFile")]);
    assert_eq!(
        lex("x - 5"),
        vec![
            tok(Identifier, "x"),
            tok(BinaryOperator, "-"),
            tok(Number, "5"),
            tok(Eof, "EndOfFile")
        ]
    );
    assert_eq!(
        lex("x -5"),
        vec![tok(Identifier, "x"), tok(Number, "-5"), tok(Eof, "EndOfFile")]
    );
    assert_eq!(
        lex("-x"),
        vec![tok(BinaryOperator, "-"), tok(Identifier, "x"), tok(Eof, "EndOfFile")]
    );
}

#[test]
fn one_or_two_character_operators() {
    use TokenKind::*;
    assert_eq!(
        kinds("== != && = & ! | < >"),
        vec![
            EqualsCompare,
            NotEqualsCompare,
            And,
            Equals,
            Ampersand,
            Exclamation,
            Bar,
            Lesser,
            Greater,
            Eof
        ]
    );
    assert_eq!(kinds("a==b"), vec![Identifier, EqualsCompare, Identifier, Eof]);
}

#[test]
fn punctuation() {
    use TokenKind::*;
    assert_eq!(
        kinds("( ) { } [ ] . ; : , % /"),
        vec![
            OpenParen,
            CloseParen,
            OpenBrace,
            CloseBrace,
            OpenBracket,
            CloseBracket,
            Dot,
            Semicolon,
            Colon,
            Comma,
            BinaryOperator,
            BinaryOperator,
            Eof
        ]
    );
}

#[test]
fn string_literals_are_unescaped() {
    use TokenKind::*;
    assert_eq!(
        lex(r#"print("hello, world")"#),
        vec![
            tok(Identifier, "print"),
            tok(OpenParen, "("),
            tok(String, "hello, world"),
            tok(CloseParen, ")"),
            tok(Eof, "EndOfFile"),
        ]
    );
    assert_eq!(lex(r#""a\n""#)[0], tok(String, r"a\n"));
}

#[test]
fn unterminated_string_runs_to_end_of_input() {
    use TokenKind::*;
    assert_eq!(lex("\"abc"), vec![tok(String, "abc"), tok(Eof, "EndOfFile")]);
}

#[test]
fn increment_expands_to_assignment() {
    use TokenKind::*;
    assert_eq!(
        lex("i++"),
        vec![
            tok(Identifier, "i"),
            tok(Equals, "="),
            tok(Identifier, "i"),
            tok(BinaryOperator, "+"),
            tok(Number, "1"),
            tok(Eof, "EndOfFile"),
        ]
    );
    assert_eq!(
        lex("n--;"),
        vec![
            tok(Identifier, "n"),
            tok(Equals, "="),
            tok(Identifier, "n"),
            tok(BinaryOperator, "-"),
            tok(Number, "1"),
            tok(Semicolon, ";"),
            tok(Eof, "EndOfFile"),
        ]
    );
}

#[test]
fn increment_copies_only_the_previous_token() {
    use TokenKind::*;
    assert_eq!(
        kinds("a.b++"),
        vec![Identifier, Dot, Identifier, Equals, Identifier, BinaryOperator, Number, Eof]
    );
}

#[test]
fn doubled_operator_at_start_is_two_operators() {
    use TokenKind::*;
    assert_eq!(
        lex("++x"),
        vec![
            tok(BinaryOperator, "+"),
            tok(BinaryOperator, "+"),
            tok(Identifier, "x"),
            tok(Eof, "EndOfFile"),
        ]
    );
}

#[test]
fn spans_point_into_the_source() {
    let tokens = tokenize("let x = \"hi\";").unwrap_or_default();
    let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        vec![
            Span::new(0, 3),
            Span::new(4, 5),
            Span::new(6, 7),
            Span::new(8, 12),
            Span::new(12, 13),
            Span::new(13, 13),
        ]
    );
}

#[test]
fn unrecognized_character_is_an_error() {
    assert_eq!(
        tokenize("let x = #;"),
        Err(LexError {
            position: 8,
            ch: '#',
            span: Span::new(8, 9),
        })
    );
    let err = tokenize("1 + é").err();
    assert_eq!(err.map(|e| (e.position, e.ch)), Some((4, 'é')));
}

mod proptest_lexer {
    use super::super::tokenize;
    use proptest::prelude::*;
    use slang_ir::TokenKind;

    proptest! {
        #[test]
        fn lexing_is_deterministic(source in "\\PC{0,64}") {
            prop_assert_eq!(tokenize(&source), tokenize(&source));
        }

        #[test]
        fn valid_alphabet_always_lexes(source in "[a-z0-9_ =+*/%<>(){}\\[\\].;:,|&!\"-]{0,64}") {
            let tokens = tokenize(&source);
            prop_assert!(tokens.is_ok());
            let tokens = tokens.unwrap_or_default();
            let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            prop_assert_eq!(eofs, 1);
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        }
    }
}
