//! Lexical analysis for Objective-J.
//!
//! This module contains a stack-based state machine that turns source text
//! into a lazy stream of classified tokens. It handles:
//!
//! - A per-state rule table of regex patterns and actions
//! - Pushing, popping and replacing states as rules fire
//! - Re-scanning matched sub-regions (method signatures, class headers)
//! - Single-character recovery for input no rule accepts
//! - Host registration metadata and language detection

pub mod grammar;
pub mod language;
pub mod lexer;
pub mod rules;
pub mod tokens;
