use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, str::FromStr};

use crate::errors::errors::{Error, ErrorImpl};

lazy_static! {
    pub static ref KIND_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        for kind in TokenKind::ALL {
            map.insert(kind.name(), kind);
        }
        map
    };
}

/// Token categories, named after the highlighting classes they map to.
///
/// The hierarchy is shallow: every subtype has exactly one parent, and the
/// top-level categories have none. The scanner treats every variant as a
/// distinct leaf.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Text,
    Error,
    Operator,
    Punctuation,

    Comment,
    CommentSingle,
    CommentMultiline,
    CommentPreproc,

    Keyword,
    KeywordType,
    KeywordDeclaration,
    KeywordConstant,

    Name,
    NameBuiltin,
    NameFunction,
    NameClass,
    NameLabel,

    String,
    StringDouble,
    StringSingle,
    StringChar,
    StringRegex,
    StringEscape,

    Number,
    NumberInteger,
    NumberFloat,
    NumberHex,
    NumberOct,
}

impl TokenKind {
    pub const ALL: [TokenKind; 28] = [
        TokenKind::Text,
        TokenKind::Error,
        TokenKind::Operator,
        TokenKind::Punctuation,
        TokenKind::Comment,
        TokenKind::CommentSingle,
        TokenKind::CommentMultiline,
        TokenKind::CommentPreproc,
        TokenKind::Keyword,
        TokenKind::KeywordType,
        TokenKind::KeywordDeclaration,
        TokenKind::KeywordConstant,
        TokenKind::Name,
        TokenKind::NameBuiltin,
        TokenKind::NameFunction,
        TokenKind::NameClass,
        TokenKind::NameLabel,
        TokenKind::String,
        TokenKind::StringDouble,
        TokenKind::StringSingle,
        TokenKind::StringChar,
        TokenKind::StringRegex,
        TokenKind::StringEscape,
        TokenKind::Number,
        TokenKind::NumberInteger,
        TokenKind::NumberFloat,
        TokenKind::NumberHex,
        TokenKind::NumberOct,
    ];

    /// Dotted category name, e.g. `Comment.Preproc`.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Text => "Text",
            TokenKind::Error => "Error",
            TokenKind::Operator => "Operator",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Comment => "Comment",
            TokenKind::CommentSingle => "Comment.Single",
            TokenKind::CommentMultiline => "Comment.Multiline",
            TokenKind::CommentPreproc => "Comment.Preproc",
            TokenKind::Keyword => "Keyword",
            TokenKind::KeywordType => "Keyword.Type",
            TokenKind::KeywordDeclaration => "Keyword.Declaration",
            TokenKind::KeywordConstant => "Keyword.Constant",
            TokenKind::Name => "Name",
            TokenKind::NameBuiltin => "Name.Builtin",
            TokenKind::NameFunction => "Name.Function",
            TokenKind::NameClass => "Name.Class",
            TokenKind::NameLabel => "Name.Label",
            TokenKind::String => "String",
            TokenKind::StringDouble => "String.Double",
            TokenKind::StringSingle => "String.Single",
            TokenKind::StringChar => "String.Char",
            TokenKind::StringRegex => "String.Regex",
            TokenKind::StringEscape => "String.Escape",
            TokenKind::Number => "Number",
            TokenKind::NumberInteger => "Number.Integer",
            TokenKind::NumberFloat => "Number.Float",
            TokenKind::NumberHex => "Number.Hex",
            TokenKind::NumberOct => "Number.Oct",
        }
    }

    pub fn parent(self) -> Option<TokenKind> {
        match self {
            TokenKind::CommentSingle | TokenKind::CommentMultiline | TokenKind::CommentPreproc => {
                Some(TokenKind::Comment)
            }
            TokenKind::KeywordType | TokenKind::KeywordDeclaration | TokenKind::KeywordConstant => {
                Some(TokenKind::Keyword)
            }
            TokenKind::NameBuiltin
            | TokenKind::NameFunction
            | TokenKind::NameClass
            | TokenKind::NameLabel => Some(TokenKind::Name),
            TokenKind::StringDouble
            | TokenKind::StringSingle
            | TokenKind::StringChar
            | TokenKind::StringRegex
            | TokenKind::StringEscape => Some(TokenKind::String),
            TokenKind::NumberInteger
            | TokenKind::NumberFloat
            | TokenKind::NumberHex
            | TokenKind::NumberOct => Some(TokenKind::Number),
            _ => None,
        }
    }

    /// True if `self` is `ancestor` or one of its subtypes.
    pub fn is_a(self, ancestor: TokenKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }

        false
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TokenKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        KIND_LOOKUP
            .get(name)
            .copied()
            .ok_or_else(|| Error::detached(ErrorImpl::UnknownTokenKind { name: name.to_string() }))
    }
}

/// One classified slice of the input. `offset` is a byte offset into the
/// text handed to the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub offset: usize,
    pub kind: TokenKind,
    pub value: &'a str,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{:?}", self.offset, self.kind, self.value)
    }
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.offset + self.value.len()
    }

    pub fn is_one_of(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|kind| self.kind.is_a(*kind))
    }
}
