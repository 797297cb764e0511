//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_GROUPS!` - Creates a by-groups rule action
//!
//! These macros reduce boilerplate in the scan driver and the grammar.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$offset` - Byte offset of the token in the scanned text
/// * `$kind` - The TokenKind
/// * `$value` - The matched slice
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(0, TokenKind::NumberInteger, "42");
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($offset:expr, $kind:expr, $value:expr) => {
        $crate::lexer::tokens::Token {
            offset: $offset,
            kind: $kind,
            value: $value,
        }
    };
}

/// Creates an `Action::ByGroups` from a list of group actions.
///
/// Each argument is either a `TokenKind` (emit the group as one token) or a
/// `State` (re-scan the group's text starting in that state).
///
/// # Example
///
/// ```ignore
/// RuleDef::new(
///     r"(@interface|@implementation)(\s+)",
///     MK_GROUPS!(TokenKind::Keyword, TokenKind::Text),
/// )
/// .push(State::Classname)
/// ```
#[macro_export]
macro_rules! MK_GROUPS {
    ($($group:expr),+ $(,)?) => {
        $crate::lexer::rules::Action::ByGroups(vec![
            $($crate::lexer::rules::Group::from($group)),+
        ])
    };
}
