// Integration tests for the lexer

use minijs::parser::lexer::{
    tokenize, tokenize_with_errors, LexError, LexMode, Lexer, Number, TokenKind, TokenValue,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_identifier_number_string_keyword() {
    let tokens = tokenize(r#"some_identifier -12.34 "a \"escape\" b" if"#);

    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Identifier,
            TokenKind::Minus,
            TokenKind::Number,
            TokenKind::String,
            TokenKind::If
        ]
    );
    assert_eq!(tokens[0].value.as_text(), Some("some_identifier"));
    assert_eq!(tokens[2].value.as_number(), Some(Number::Float(12.34)));
    assert_eq!(tokens[3].value.as_text(), Some(r#"a \"escape\" b"#));
    assert_eq!(tokens[4].value.as_text(), Some("if"));
}

#[test]
fn test_greedy_two_char_operators() {
    assert_eq!(
        kinds("a<=b>=c==d!=e&&f||g"),
        vec![
            TokenKind::Identifier,
            TokenKind::Le,
            TokenKind::Identifier,
            TokenKind::Ge,
            TokenKind::Identifier,
            TokenKind::EqualEqual,
            TokenKind::Identifier,
            TokenKind::NotEqual,
            TokenKind::Identifier,
            TokenKind::AndAnd,
            TokenKind::Identifier,
            TokenKind::OrOr,
            TokenKind::Identifier,
        ]
    );
    // Three '=' lex as '==' then '='
    assert_eq!(kinds("==="), vec![TokenKind::EqualEqual, TokenKind::Equal]);
}

#[test]
fn test_comment_transparency() {
    assert_eq!(tokenize("1 /* x */ + /* y */ 2;"), tokenize("1 + 2;"));
}

#[test]
fn test_line_comment_ends_at_newline() {
    let tokens = tokenize("1 // 2\n3;");
    assert_eq!(
        tokens.iter().map(|t| (t.kind, t.line)).collect::<Vec<_>>(),
        vec![
            (TokenKind::Number, 1),
            (TokenKind::Number, 2),
            (TokenKind::Semicolon, 2)
        ]
    );
}

#[test]
fn test_block_comment_does_not_nest() {
    // The first '*/' closes the comment
    assert_eq!(
        kinds("/* a /* b */ c */"),
        vec![TokenKind::Identifier, TokenKind::Times, TokenKind::Divide]
    );
}

#[test]
fn test_garbage_inside_comment_is_ignored() {
    let (tokens, errors) = tokenize_with_errors("x /* @ # $ \" */ y");
    assert_eq!(tokens.len(), 2);
    assert!(errors.is_empty());
}

#[test]
fn test_pull_one_token_at_a_time() {
    let mut lexer = Lexer::new("var x = 1;\n/* open\n");

    let first = lexer.next().expect("expected a token");
    assert_eq!(first.kind, TokenKind::Var);
    assert_eq!(lexer.mode(), LexMode::Normal);

    assert_eq!(lexer.by_ref().count(), 4);
    assert_eq!(lexer.line(), 3);
    assert_eq!(lexer.errors(), &[LexError::UnterminatedComment { line: 2 }]);
}

#[test]
fn test_illegal_characters_on_each_line() {
    let (tokens, errors) = tokenize_with_errors("a @\nb $\n`c");

    assert_eq!(tokens.len(), 3);
    assert_eq!(
        errors,
        vec![
            LexError::IllegalCharacter { ch: '@', line: 1 },
            LexError::IllegalCharacter { ch: '$', line: 2 },
            LexError::IllegalCharacter { ch: '`', line: 3 },
        ]
    );
}

#[test]
fn test_string_spanning_lines_advances_line_counter() {
    let tokens = tokenize("\"a\nb\" x");
    assert_eq!(tokens[0].value, TokenValue::Text("a\nb".to_string()));
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn test_keywords_keep_spelling() {
    for word in ["if", "else", "false", "true", "return", "function", "var"] {
        let tokens = tokenize(word);
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].kind.is_keyword(), "{}", word);
        assert_eq!(tokens[0].value.as_text(), Some(word));
    }
}

#[test]
fn test_kind_names() {
    assert_eq!(TokenKind::EqualEqual.to_string(), "EQUALEQUAL");
    assert_eq!(TokenKind::Function.to_string(), "FUNCTION");
    assert_eq!(format!("{:<6}|", TokenKind::If), "IF    |");
}
