#![allow(clippy::module_inception)]

use std::sync::Once;

pub mod errors;
pub mod lexer;
pub mod macros;

extern crate regex;

pub use errors::errors::{Error, ErrorImpl, ErrorTip};
pub use lexer::language;
pub use lexer::lexer::{shared_lexer, tokenize, Lexer, LexerOptions, Tokens};
pub use lexer::rules::State;
pub use lexer::tokens::{Token, TokenKind};

static TRACING_INIT: Once = Once::new();

/// Installs a tracing subscriber filtered by `RUST_LOG`, if it is set.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Returns the 1-based line number, the line text and the byte offset of
/// `position` within that line.
pub fn get_line_at_position(content: &str, position: usize) -> Option<(usize, String, usize)> {
    if position >= content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&position) {
            let line_pos = position - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    const CONTENT: &str = "Hello, world!\nfoo\n\nTesting { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(CONTENT, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(CONTENT, 27).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position(CONTENT, CONTENT.len()).is_none());
    }
}
