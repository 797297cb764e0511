//! Integration tests for end-to-end tokenization.
//!
//! These tests drive the public API over whole inputs and check the
//! properties every token stream must have: the tokens cover the input
//! exactly and their offsets are contiguous.

use objj_lexer::{language, shared_lexer, tokenize, Lexer, LexerOptions, Token, TokenKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const PERSON: &str = "@import <Foundation/CPObject.j>

@implementation Person : CPObject
{
    CPString name;
}

- (void)setName:(CPString)aName
{
    name = aName;
}

- (CPString)name
{
    return name;
}

@end
";

fn assert_covers(source: &str, tokens: &[Token]) {
    let joined: String = tokens.iter().map(|token| token.value).collect();
    assert_eq!(joined, source);

    let mut expected = 0;
    for token in tokens {
        assert_eq!(token.offset, expected, "token {:?} is out of place", token);
        assert!(!token.value.is_empty());
        expected = token.end();
    }
    assert_eq!(expected, source.len());
}

#[test]
fn test_tokenize_class_file() {
    let tokens = tokenize(PERSON).unwrap();
    assert_covers(PERSON, &tokens);

    assert!(tokens.iter().all(|token| token.kind != TokenKind::Error));

    let classes: Vec<&str> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::NameClass)
        .map(|token| token.value)
        .collect();
    assert_eq!(classes, vec!["Person", "CPObject"]);

    let selectors: Vec<&str> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::NameFunction)
        .map(|token| token.value)
        .collect();
    assert_eq!(selectors, vec!["setName:", "name"]);

    let first = tokens.first().unwrap();
    assert_eq!(first.kind, TokenKind::CommentPreproc);
    let last_keyword = tokens
        .iter()
        .rev()
        .find(|token| token.kind == TokenKind::Keyword)
        .unwrap();
    assert_eq!(last_keyword.value, "@end");
}

#[test]
fn test_tokenize_disabled_block_is_never_code() {
    let source = "#if 0\ngarbage here\n#endif\n";
    let tokens = tokenize(source).unwrap();

    assert_covers(source, &tokens);
    assert!(tokens
        .iter()
        .all(|token| token.kind.is_a(TokenKind::Comment)));
}

#[test]
fn test_tokenize_unterminated_string_is_string_content() {
    let source = "\"abc";
    let tokens = tokenize(source).unwrap();

    assert_covers(source, &tokens);
    assert!(tokens.iter().all(|token| token.kind.is_a(TokenKind::String)));
}

#[test]
fn test_shared_lexer_matches_fresh_lexer() {
    let fresh = Lexer::new().unwrap();
    let shared = shared_lexer().unwrap();

    let a: Vec<Token> = fresh.tokens(PERSON).collect();
    let b: Vec<Token> = shared.tokens(PERSON).collect();
    assert_eq!(a, b);
}

#[test]
fn test_concurrent_scans_share_one_lexer() {
    let lexer = shared_lexer().unwrap();
    let expected: Vec<Token> = lexer.tokens(PERSON).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| lexer.tokens(PERSON).collect::<Vec<Token>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_reset_on_newline_changes_only_recovery() {
    let lexer = Lexer::with_options(LexerOptions {
        newline_resets_state: true,
    })
    .unwrap();

    let tokens: Vec<Token> = lexer.tokens(PERSON).collect();
    assert_eq!(tokens, tokenize(PERSON).unwrap());
}

#[test]
fn test_detection_is_idempotent() {
    for sample in [PERSON, "CPApplication", "int main() {}", ""] {
        let first = language::analyse_text(sample);
        assert_eq!(language::analyse_text(sample), first);
    }
}

fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "@import <Foundation/Foundation.j>\n",
        "@implementation Foo : Bar\n",
        "@interface Foo (Cat)\n",
        "@class A, B;\n",
        "@end\n",
        "- (void)set:(id)x with:(int)y\n{\n",
        "+ (CPString)name\n{\n",
        "}\n",
        "var x = /ab[/]c/g;\n",
        "a / b / c",
        "\"str\\n\" ",
        "'c' ",
        "0x1F 017 1.5e3 ",
        "// comment\n",
        "/* block */",
        "/* open",
        "#if 0\n",
        "#endif\n",
        "#define X \\\n",
        "[self foo:bar];",
        "\n",
        " ",
        "@",
        "\"",
        "(",
        ")",
        "/",
        "é",
    ])
}

proptest! {
    #[test]
    fn test_tokens_cover_any_input(source in "\\PC{0,120}") {
        let tokens = tokenize(&source).unwrap();
        let joined: String = tokens.iter().map(|token| token.value).collect();
        prop_assert_eq!(joined, source.clone());
    }

    #[test]
    fn test_offsets_are_contiguous(source in "\\PC{0,120}") {
        let tokens = tokenize(&source).unwrap();
        for pair in tokens.windows(2) {
            prop_assert_eq!(pair[1].offset, pair[0].offset + pair[0].value.len());
        }
    }

    #[test]
    fn test_tokens_cover_objective_j_fragments(
        parts in prop::collection::vec(fragment(), 0..40),
        reset in any::<bool>(),
    ) {
        let source = parts.concat();
        let lexer = Lexer::with_options(LexerOptions { newline_resets_state: reset }).unwrap();
        let tokens: Vec<Token> = lexer.tokens(&source).collect();

        let joined: String = tokens.iter().map(|token| token.value).collect();
        prop_assert_eq!(&joined, &source);

        let mut expected = 0;
        for token in &tokens {
            prop_assert_eq!(token.offset, expected);
            expected = token.end();
        }
    }
}
