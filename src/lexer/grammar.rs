//! The Objective-J rule table.
//!
//! Every pattern is compiled with `.` matching newlines and is anchored at
//! the scan position. Start-of-line and look-behind conditions are guards on
//! the rule; a trailing `(?P<ahead>...)` group is matched but not consumed.

use crate::MK_GROUPS;

use super::rules::{Action, Entry, Grammar, RuleDef, State};
use super::tokens::TokenKind;

/// Optional run of whitespace and comments.
macro_rules! ws {
    () => {
        r"(?:\s|//.*?\n|/[*].*?[*]/)*"
    };
}

macro_rules! ident {
    () => {
        r"[$a-zA-Z_][a-zA-Z0-9_]*"
    };
}

macro_rules! class_name {
    () => {
        r"[a-zA-Z_][a-zA-Z0-9_]*"
    };
}

pub fn objective_j() -> Grammar {
    vec![
        (State::Root, root()),
        (State::Whitespace, whitespace()),
        (State::SlashStartsRegex, slash_starts_regex()),
        (State::BadRegex, vec![RuleDef::new(r"\n", TokenKind::Text).pop().into()]),
        (State::Statements, statements()),
        (State::Classname, classname()),
        (State::ForwardClassname, forward_classname()),
        (State::FunctionSignature, function_signature()),
        (State::FunctionParameters, function_parameters()),
        (State::String, string()),
        (State::Macro, preprocessor_macro()),
        (State::If0, if0()),
    ]
}

fn root() -> Vec<Entry> {
    vec![
        Entry::Include(State::Whitespace),
        // method definition, re-scanned up to the character before `{`
        RuleDef::new(
            r"(\s*[+\-]\s*)(.*?)(?P<ahead>[^(]\{)",
            MK_GROUPS!(TokenKind::Text, State::FunctionSignature),
        )
        .at_line_start()
        .into(),
        RuleDef::new(
            r"(@interface|@implementation)(\s+)",
            MK_GROUPS!(TokenKind::Keyword, TokenKind::Text),
        )
        .push(State::Classname)
        .into(),
        RuleDef::new(
            r"(@class|@protocol)(\s*)",
            MK_GROUPS!(TokenKind::Keyword, TokenKind::Text),
        )
        .push(State::ForwardClassname)
        .into(),
        RuleDef::new(
            r"(\s*)(@end)(\s*)",
            MK_GROUPS!(TokenKind::Text, TokenKind::Keyword, TokenKind::Text),
        )
        .into(),
        Entry::Include(State::Statements),
        RuleDef::new(r"[{()}]", TokenKind::Punctuation).into(),
        RuleDef::new(";", TokenKind::Punctuation).into(),
    ]
}

fn whitespace() -> Vec<Entry> {
    let import = MK_GROUPS!(
        TokenKind::CommentPreproc,
        TokenKind::Text,
        TokenKind::StringDouble
    );

    vec![
        RuleDef::new(r#"(@import)(\s+)("(?:\\\\|\\"|[^"])*")"#, import.clone()).into(),
        RuleDef::new(r"(@import)(\s+)(<(?:\\\\|\\>|[^>])*>)", import.clone()).into(),
        RuleDef::new(
            r#"(#(?:include|import))(\s+)("(?:\\\\|\\"|[^"])*")"#,
            import.clone(),
        )
        .into(),
        RuleDef::new(r"(#(?:include|import))(\s+)(<(?:\\\\|\\>|[^>])*>)", import).into(),
        RuleDef::new(r"#if\s+0", TokenKind::CommentPreproc)
            .push(State::If0)
            .into(),
        RuleDef::new("#", TokenKind::CommentPreproc)
            .push(State::Macro)
            .into(),
        RuleDef::new(r"\n", TokenKind::Text).into(),
        RuleDef::new(r"\s+", TokenKind::Text).into(),
        // line continuation
        RuleDef::new(r"\\\n", TokenKind::Text).into(),
        RuleDef::new(r"//(?:\n|.*?[^\\]\n|.*\z)", TokenKind::CommentSingle).into(),
        RuleDef::new(
            r"/(?:\\\n)?[*](?:.*?[*](?:\\\n)?/|.*\z)",
            TokenKind::CommentMultiline,
        )
        .into(),
        RuleDef::new("<!--", TokenKind::Comment).into(),
    ]
}

fn slash_starts_regex() -> Vec<Entry> {
    vec![
        Entry::Include(State::Whitespace),
        RuleDef::new(
            r"/(?:\\.|[^\[/\\\n]|\[(?:\\.|[^\]\\\n])*\])+/(?:[gim]+\b|\B)",
            TokenKind::StringRegex,
        )
        .pop()
        .into(),
        RuleDef::new(r"(?P<ahead>/)", TokenKind::Text)
            .replace(State::BadRegex)
            .into(),
        RuleDef::new("", TokenKind::Text).pop().into(),
    ]
}

fn statements() -> Vec<Entry> {
    vec![
        RuleDef::new(r#"(?:L|@)?""#, TokenKind::String)
            .push(State::String)
            .into(),
        RuleDef::new(
            r"(?:L|@)?'(?:\\.|\\[0-7]{1,3}|\\x[a-fA-F0-9]{1,2}|[^\\'\n])'",
            TokenKind::StringChar,
        )
        .into(),
        RuleDef::new(r#""(?:\\\\|\\"|[^"])*""#, TokenKind::StringDouble).into(),
        RuleDef::new(r"'(?:\\\\|\\'|[^'])*(?:'|\z)", TokenKind::StringSingle).into(),
        RuleDef::new(
            r"(?:\d+\.\d*|\.\d+|\d+)[eE][+\-]?\d+[lL]?",
            TokenKind::NumberFloat,
        )
        .into(),
        RuleDef::new(r"(?:\d+\.\d*|\.\d+|\d+[fF])[fF]?", TokenKind::NumberFloat).into(),
        RuleDef::new(r"0x[0-9a-fA-F]+[Ll]?", TokenKind::NumberHex).into(),
        RuleDef::new(r"0[0-7]+[Ll]?", TokenKind::NumberOct).into(),
        RuleDef::new(r"\d+[Ll]?", TokenKind::NumberInteger).into(),
        RuleDef::new(r"(?P<ahead>\s|/|<!--)", TokenKind::Text)
            .at_line_start()
            .push(State::SlashStartsRegex)
            .into(),
        RuleDef::new(
            r"\+\+|--|~|&&|\?|:|\|\||\\(?P<ahead>\n)|(?:<<|>>>?|==?|!=?|[\-<>+*%&|\^/])=?",
            TokenKind::Operator,
        )
        .push(State::SlashStartsRegex)
        .into(),
        RuleDef::new(r"[{(\[;,]", TokenKind::Punctuation)
            .push(State::SlashStartsRegex)
            .into(),
        RuleDef::new(r"[})\].]", TokenKind::Punctuation).into(),
        RuleDef::new(
            concat!(
                r"(?:for|in|while|do|break|return|continue|switch|case|default|if|else|",
                r"throw|try|catch|finally|new|delete|typeof|instanceof|void|",
                r"prototype|__proto__)\b"
            ),
            TokenKind::Keyword,
        )
        .push(State::SlashStartsRegex)
        .into(),
        RuleDef::new(r"(?:var|with|function)\b", TokenKind::KeywordDeclaration)
            .push(State::SlashStartsRegex)
            .into(),
        RuleDef::new(
            concat!(
                r"(?:@selector|@private|@protected|@public|@encode|",
                r"@synchronized|@try|@throw|@catch|@finally|@end|@property|",
                r"@synthesize|@dynamic|@for|@accessors|new)\b"
            ),
            TokenKind::Keyword,
        )
        .into(),
        RuleDef::new(
            concat!(
                r"(?:int|long|float|short|double|char|unsigned|signed|void|",
                r"id|BOOL|bool|boolean|IBOutlet|IBAction|SEL|@outlet|@action)\b"
            ),
            TokenKind::KeywordType,
        )
        .into(),
        RuleDef::new(r"(?:self|super)\b", TokenKind::NameBuiltin).into(),
        RuleDef::new(r"(?:TRUE|YES|FALSE|NO|Nil|nil|NULL)\b", TokenKind::KeywordConstant).into(),
        RuleDef::new(
            r"(?:true|false|null|NaN|Infinity|undefined)\b",
            TokenKind::KeywordConstant,
        )
        .into(),
        RuleDef::new(
            concat!(
                r"(?:ABS|ASIN|ACOS|ATAN|ATAN2|SIN|COS|TAN|EXP|POW|CEIL|FLOOR|ROUND|MIN|MAX|",
                r"RAND|SQRT|E|LN2|LN10|LOG2E|LOG10E|PI|PI2|PI_2|SQRT1_2|SQRT2)\b"
            ),
            TokenKind::KeywordConstant,
        )
        .into(),
        RuleDef::new(
            concat!(
                r"(?:Array|Boolean|Date|Error|Function|Math|netscape|",
                r"Number|Object|Packages|RegExp|String|sun|decodeURI|",
                r"decodeURIComponent|encodeURI|encodeURIComponent|",
                r"eval|isFinite|isNaN|parseFloat|parseInt|document|this|",
                r"window)\b"
            ),
            TokenKind::NameBuiltin,
        )
        .into(),
        RuleDef::new(
            concat!("(", ident!(), ")(", ws!(), r")(?P<ahead>\()"),
            MK_GROUPS!(TokenKind::NameFunction, State::Root),
        )
        .into(),
        RuleDef::new(ident!(), TokenKind::Name).into(),
    ]
}

fn classname() -> Vec<Entry> {
    vec![
        // interface that inherits
        RuleDef::new(
            concat!(
                "(",
                class_name!(),
                ")(",
                ws!(),
                ")(:)(",
                ws!(),
                ")(",
                class_name!(),
                ")?"
            ),
            MK_GROUPS!(
                TokenKind::NameClass,
                State::Root,
                TokenKind::Punctuation,
                State::Root,
                TokenKind::NameClass
            ),
        )
        .pop()
        .into(),
        // category
        RuleDef::new(
            concat!(
                "(",
                class_name!(),
                ")(",
                ws!(),
                r")(\()(",
                class_name!(),
                r")(\))"
            ),
            MK_GROUPS!(
                TokenKind::NameClass,
                State::Root,
                TokenKind::Punctuation,
                TokenKind::NameLabel,
                TokenKind::Punctuation
            ),
        )
        .pop()
        .into(),
        RuleDef::new(class_name!(), TokenKind::NameClass).pop().into(),
    ]
}

fn forward_classname() -> Vec<Entry> {
    vec![
        RuleDef::new(
            concat!("(", class_name!(), r")(\s*,\s*)"),
            MK_GROUPS!(TokenKind::NameClass, TokenKind::Text),
        )
        .into(),
        RuleDef::new(
            concat!("(", class_name!(), r")(\s*;?)"),
            MK_GROUPS!(TokenKind::NameClass, TokenKind::Text),
        )
        .pop()
        .into(),
    ]
}

fn function_signature() -> Vec<Entry> {
    let typed = MK_GROUPS!(
        State::Root,
        TokenKind::KeywordType,
        State::Root,
        TokenKind::NameFunction
    );

    vec![
        Entry::Include(State::Whitespace),
        // return type, then the first selector piece of a method with parameters
        RuleDef::new(
            concat!(
                r"(\(",
                ws!(),
                ")(",
                class_name!(),
                ")(",
                ws!(),
                r"\)",
                ws!(),
                ")(",
                ident!(),
                ws!(),
                ":)"
            ),
            typed.clone(),
        )
        .push(State::FunctionParameters)
        .into(),
        // return type, then the name of a method without parameters
        RuleDef::new(
            concat!(
                r"(\(",
                ws!(),
                ")(",
                class_name!(),
                ")(",
                ws!(),
                r"\)",
                ws!(),
                ")(",
                ident!(),
                ")"
            ),
            typed,
        )
        .pop()
        .into(),
        RuleDef::new(concat!(ident!(), ws!(), ":"), TokenKind::NameFunction)
            .push(State::FunctionParameters)
            .into(),
        RuleDef::new(ident!(), TokenKind::NameFunction).pop().into(),
        RuleDef::new("", TokenKind::Text).pop().into(),
    ]
}

fn function_parameters() -> Vec<Entry> {
    vec![
        Entry::Include(State::Whitespace),
        // `(type)name`
        RuleDef::new(
            concat!(
                r"(\(",
                ws!(),
                r")([^)]+)((?:",
                ws!(),
                r"\)",
                ws!(),
                ")+)(",
                ident!(),
                ")"
            ),
            MK_GROUPS!(
                State::Root,
                TokenKind::KeywordType,
                State::Root,
                TokenKind::Name
            ),
        )
        .into(),
        RuleDef::new(concat!(ident!(), ws!(), ":"), TokenKind::NameFunction).into(),
        RuleDef::new(":", TokenKind::NameFunction).into(),
        // variadic tail
        RuleDef::new(concat!(",", ws!(), r"\.\.\."), Action::Using(State::Root)).into(),
        RuleDef::new(ident!(), TokenKind::Name).into(),
    ]
}

fn string() -> Vec<Entry> {
    vec![
        RuleDef::new("\"", TokenKind::String).pop().into(),
        RuleDef::new(
            r#"\\(?:[\\abfnrtv"']|x[a-fA-F0-9]{2,4}|[0-7]{1,3})"#,
            TokenKind::StringEscape,
        )
        .into(),
        RuleDef::new(r#"[^\\"\n]+"#, TokenKind::String).into(),
        RuleDef::new(r"\\\n", TokenKind::String).into(),
        // stray backslash
        RuleDef::new(r"\\", TokenKind::String).into(),
    ]
}

fn preprocessor_macro() -> Vec<Entry> {
    vec![
        RuleDef::new(r"[^/\n]+", TokenKind::CommentPreproc).into(),
        RuleDef::new(r"/[*](?:.*?[*]/|.*\z)", TokenKind::CommentMultiline).into(),
        RuleDef::new(r"//[^\n]*(?:\n|\z)", TokenKind::CommentSingle)
            .pop()
            .into(),
        RuleDef::new("/", TokenKind::CommentPreproc).into(),
        RuleDef::new(r"\n", TokenKind::CommentPreproc)
            .after('\\')
            .into(),
        RuleDef::new(r"\n", TokenKind::CommentPreproc).pop().into(),
    ]
}

fn if0() -> Vec<Entry> {
    vec![
        RuleDef::new(r"\s*#if(?:\\\n|[^\n])*(?:\n|\z)", TokenKind::CommentPreproc)
            .at_line_start()
            .push(State::If0)
            .into(),
        RuleDef::new(r"\s*#endif(?:\\\n|[^\n])*(?:\n|\z)", TokenKind::CommentPreproc)
            .at_line_start()
            .pop()
            .into(),
        RuleDef::new(r"[^\n]*(?:\n|\z)", TokenKind::Comment).into(),
    ]
}
