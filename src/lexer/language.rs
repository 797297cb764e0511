//! Metadata a host uses to pick this lexer for a file.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

pub const NAME: &str = "Objective-J";
pub const ALIASES: [&str; 4] = ["objective-j", "objectivej", "obj-j", "objj"];
pub const FILENAMES: [&str; 1] = ["*.j"];
pub const MIMETYPES: [&str; 1] = ["text/x-objective-j"];

lazy_static! {
    // Cappuccino class names at the very start of the sample, e.g. `CPWindow`.
    static ref CAPPUCCINO_PREFIX: Regex =
        Regex::new(r"\ACP[A-Z][a-zA-Z]+").expect("valid detection pattern");
}

/// Guesses whether `text` is Objective-J. Pure and deterministic.
pub fn analyse_text(text: &str) -> bool {
    text.contains("@import") || CAPPUCCINO_PREFIX.is_match(text)
}

pub fn has_alias(name: &str) -> bool {
    name.eq_ignore_ascii_case(NAME)
        || ALIASES
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(name))
}

/// Matches the file name of `path` against the `*.ext` patterns in
/// `FILENAMES`.
pub fn matches_filename(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    FILENAMES.iter().any(|pattern| match pattern.strip_prefix('*') {
        Some(suffix) => file_name.len() > suffix.len() && file_name.ends_with(suffix),
        None => file_name == *pattern,
    })
}
