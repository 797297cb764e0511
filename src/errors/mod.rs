//! Error types for lexer construction.
//!
//! Scanning itself never fails: characters no rule accepts come out as
//! `Error` tokens. What can fail is building the rule table, and this
//! module describes those failures:
//!
//! - Error structures tagged with the state whose rules were being built
//! - Specific error variants for each kind of malformed rule
//! - Helpful suggestions for fixing the grammar

pub mod errors;
