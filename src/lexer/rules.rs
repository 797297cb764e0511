//! Rule table machinery: states, rule definitions and their compiled form.

use std::fmt::Display;

use regex::Regex;

use crate::errors::errors::{Error, ErrorImpl};

use super::tokens::TokenKind;

/// Name of the trailing capture group that is matched but not consumed.
pub const LOOKAHEAD_GROUP: &str = "ahead";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum State {
    Root,
    Whitespace,
    Statements,
    SlashStartsRegex,
    BadRegex,
    Classname,
    ForwardClassname,
    FunctionSignature,
    FunctionParameters,
    String,
    Macro,
    If0,
}

impl State {
    pub const COUNT: usize = 12;

    pub const ALL: [State; State::COUNT] = [
        State::Root,
        State::Whitespace,
        State::Statements,
        State::SlashStartsRegex,
        State::BadRegex,
        State::Classname,
        State::ForwardClassname,
        State::FunctionSignature,
        State::FunctionParameters,
        State::String,
        State::Macro,
        State::If0,
    ];

    pub fn name(self) -> &'static str {
        match self {
            State::Root => "root",
            State::Whitespace => "whitespace",
            State::Statements => "statements",
            State::SlashStartsRegex => "slashstartsregex",
            State::BadRegex => "badregex",
            State::Classname => "classname",
            State::ForwardClassname => "forward_classname",
            State::FunctionSignature => "function_signature",
            State::FunctionParameters => "function_parameters",
            State::String => "string",
            State::Macro => "macro",
            State::If0 => "if0",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Positional condition checked before a rule's pattern is tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Always,
    /// Start of the scanned text or directly after a newline.
    LineStart,
    PrecededBy(char),
}

impl Guard {
    pub fn allows(self, text: &str, pos: usize) -> bool {
        match self {
            Guard::Always => true,
            Guard::LineStart => pos == 0 || text[..pos].ends_with('\n'),
            Guard::PrecededBy(c) => text[..pos].ends_with(c),
        }
    }
}

/// What to do with one capture group of a by-groups rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Token(TokenKind),
    /// Re-scan the group's text with a fresh stack `[root, state]`.
    Using(State),
}

impl From<TokenKind> for Group {
    fn from(kind: TokenKind) -> Self {
        Group::Token(kind)
    }
}

impl From<State> for Group {
    fn from(state: State) -> Self {
        Group::Using(state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Token(TokenKind),
    ByGroups(Vec<Group>),
    Using(State),
}

impl From<TokenKind> for Action {
    fn from(kind: TokenKind) -> Self {
        Action::Token(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Push(State),
    Pop,
    /// Pop (a no-op at the bottom of the stack), then push.
    Replace(State),
}

impl Transition {
    pub fn apply(self, stack: &mut Vec<State>) {
        match self {
            Transition::None => {}
            Transition::Push(state) => stack.push(state),
            Transition::Pop => {
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            Transition::Replace(state) => {
                if stack.len() > 1 {
                    stack.pop();
                }
                stack.push(state);
            }
        }
    }
}

/// Uncompiled rule as written in a grammar.
#[derive(Debug, Clone)]
pub struct RuleDef {
    pub pattern: &'static str,
    pub guard: Guard,
    pub action: Action,
    pub transition: Transition,
}

impl RuleDef {
    pub fn new(pattern: &'static str, action: impl Into<Action>) -> Self {
        RuleDef {
            pattern,
            guard: Guard::Always,
            action: action.into(),
            transition: Transition::None,
        }
    }

    pub fn push(mut self, state: State) -> Self {
        self.transition = Transition::Push(state);
        self
    }

    pub fn pop(mut self) -> Self {
        self.transition = Transition::Pop;
        self
    }

    pub fn replace(mut self, state: State) -> Self {
        self.transition = Transition::Replace(state);
        self
    }

    pub fn at_line_start(mut self) -> Self {
        self.guard = Guard::LineStart;
        self
    }

    pub fn after(mut self, c: char) -> Self {
        self.guard = Guard::PrecededBy(c);
        self
    }
}

#[derive(Debug, Clone)]
pub enum Entry {
    Rule(RuleDef),
    Include(State),
}

impl From<RuleDef> for Entry {
    fn from(rule: RuleDef) -> Self {
        Entry::Rule(rule)
    }
}

pub type Grammar = Vec<(State, Vec<Entry>)>;

/// A matched rule. Offsets in `groups` are relative to the match start.
#[derive(Debug)]
pub struct RuleMatch<'t> {
    pub len: usize,
    pub groups: Vec<Option<(usize, &'t str)>>,
}

#[derive(Debug, Clone)]
pub struct Rule {
    regex: Regex,
    pattern: &'static str,
    pub guard: Guard,
    pub action: Action,
    pub transition: Transition,
    groups: usize,
    lookahead: Option<usize>,
}

impl Rule {
    fn compile(def: &RuleDef, state: State) -> Result<Rule, Error> {
        let regex = Regex::new(&format!(r"\A(?s:{})", def.pattern)).map_err(|err| {
            Error::new(
                ErrorImpl::InvalidPattern {
                    pattern: def.pattern.to_string(),
                    message: err.to_string(),
                },
                state,
            )
        })?;

        let last = regex.captures_len() - 1;
        let lookahead = regex
            .capture_names()
            .position(|name| name == Some(LOOKAHEAD_GROUP));

        if let Some(index) = lookahead {
            if index != last {
                return Err(Error::new(
                    ErrorImpl::MisplacedLookahead {
                        pattern: def.pattern.to_string(),
                    },
                    state,
                ));
            }
        }

        let groups = if lookahead.is_some() { last - 1 } else { last };

        if let Action::ByGroups(actions) = &def.action {
            if actions.len() != groups {
                return Err(Error::new(
                    ErrorImpl::GroupCountMismatch {
                        pattern: def.pattern.to_string(),
                        groups,
                        actions: actions.len(),
                    },
                    state,
                ));
            }
        }

        Ok(Rule {
            regex,
            pattern: def.pattern,
            guard: def.guard,
            action: def.action.clone(),
            transition: def.transition,
            groups,
            lookahead,
        })
    }

    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Tries the rule at byte `pos` of `text`. Look-behind guards see the
    /// whole of `text`; the pattern itself only sees `text[pos..]`.
    pub fn match_at<'t>(&self, text: &'t str, pos: usize) -> Option<RuleMatch<'t>> {
        if !self.guard.allows(text, pos) {
            return None;
        }

        let rest = &text[pos..];

        if self.lookahead.is_none() && !matches!(self.action, Action::ByGroups(_)) {
            return self.regex.find(rest).map(|m| RuleMatch {
                len: m.end(),
                groups: Vec::new(),
            });
        }

        let captures = self.regex.captures(rest)?;
        let len = match self.lookahead.and_then(|index| captures.get(index)) {
            Some(ahead) => ahead.start(),
            None => captures.get(0).map_or(0, |m| m.end()),
        };
        let groups = (1..=self.groups)
            .map(|index| captures.get(index).map(|m| (m.start(), m.as_str())))
            .collect();

        Some(RuleMatch { len, groups })
    }
}

enum Compiled {
    Rule(Rule),
    Include(State),
}

/// Immutable mapping from state to its ordered, include-flattened rule list.
#[derive(Debug, Clone)]
pub struct RuleTable {
    states: Vec<Vec<Rule>>,
}

impl RuleTable {
    pub fn new(grammar: Grammar) -> Result<RuleTable, Error> {
        let mut own: Vec<Vec<Compiled>> = (0..State::COUNT).map(|_| Vec::new()).collect();

        for (state, entries) in grammar {
            for entry in entries {
                let compiled = match entry {
                    Entry::Rule(def) => Compiled::Rule(Rule::compile(&def, state)?),
                    Entry::Include(included) => Compiled::Include(included),
                };
                own[state.index()].push(compiled);
            }
        }

        let mut states = Vec::with_capacity(State::COUNT);
        for state in State::ALL {
            let mut rules = Vec::new();
            let mut visiting = Vec::new();
            flatten(state, &own, &mut visiting, &mut rules)?;
            states.push(rules);
        }

        let table = RuleTable { states };
        tracing::debug!(
            states = State::COUNT,
            rules = table.rule_count(),
            "built rule table"
        );

        Ok(table)
    }

    pub fn rules(&self, state: State) -> &[Rule] {
        &self.states[state.index()]
    }

    pub fn rule_count(&self) -> usize {
        self.states.iter().map(Vec::len).sum()
    }
}

fn flatten(
    state: State,
    own: &[Vec<Compiled>],
    visiting: &mut Vec<State>,
    out: &mut Vec<Rule>,
) -> Result<(), Error> {
    if visiting.contains(&state) {
        let root = visiting.first().copied().unwrap_or(state);
        return Err(Error::new(ErrorImpl::RecursiveInclude { state }, root));
    }

    visiting.push(state);
    for compiled in &own[state.index()] {
        match compiled {
            Compiled::Rule(rule) => out.push(rule.clone()),
            Compiled::Include(included) => flatten(*included, own, visiting, out)?,
        }
    }
    visiting.pop();

    Ok(())
}
