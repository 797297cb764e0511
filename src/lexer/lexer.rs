use std::{collections::VecDeque, iter::FusedIterator};

use lazy_static::lazy_static;

use crate::{errors::errors::Error, MK_TOKEN};

use super::{
    grammar,
    rules::{Action, Group, Rule, RuleMatch, RuleTable, State},
    tokens::{Token, TokenKind},
};

/// Zero-width matches allowed in a row before the scanner forces progress.
const MAX_STALLED_STEPS: usize = 32;

lazy_static! {
    static ref SHARED_LEXER: Result<Lexer, Error> = Lexer::new();
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Recover from an unmatched newline by resetting the stack to `root`
    /// and emitting it as `Text`, instead of an `Error` token.
    pub newline_resets_state: bool,
}

/// An immutable rule table plus options. Scanning borrows it, so one lexer
/// can serve any number of concurrent scans.
#[derive(Debug, Clone)]
pub struct Lexer {
    table: RuleTable,
    options: LexerOptions,
}

impl Lexer {
    pub fn new() -> Result<Lexer, Error> {
        Lexer::with_options(LexerOptions::default())
    }

    pub fn with_options(options: LexerOptions) -> Result<Lexer, Error> {
        let table = RuleTable::new(grammar::objective_j())?;
        Ok(Lexer::from_table(table, options))
    }

    pub fn from_table(table: RuleTable, options: LexerOptions) -> Lexer {
        Lexer { table, options }
    }

    pub fn options(&self) -> LexerOptions {
        self.options
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Lazily scans `source` from the root state.
    pub fn tokens<'l, 'a>(&'l self, source: &'a str) -> Tokens<'l, 'a> {
        Tokens::new(self, source, 0, stack_for(State::Root))
    }

    /// Lazily scans `source` with the stack `[root, state]`.
    pub fn tokens_in<'l, 'a>(&'l self, source: &'a str, state: State) -> Tokens<'l, 'a> {
        Tokens::new(self, source, 0, stack_for(state))
    }
}

fn stack_for(state: State) -> Vec<State> {
    if state == State::Root {
        vec![State::Root]
    } else {
        vec![State::Root, state]
    }
}

/// Scans `source` with the process-wide Objective-J lexer.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, Error> {
    let lexer = shared_lexer()?;
    Ok(lexer.tokens(source).collect())
}

/// The process-wide lexer, built on first use.
pub fn shared_lexer() -> Result<&'static Lexer, Error> {
    SHARED_LEXER.as_ref().map_err(Clone::clone)
}

/// Lazy token stream over one input. Owns its state stack; dropping it
/// early leaves nothing behind.
#[derive(Debug)]
pub struct Tokens<'l, 'a> {
    lexer: &'l Lexer,
    source: &'a str,
    base: usize,
    pos: usize,
    stack: Vec<State>,
    pending: VecDeque<Token<'a>>,
    stalled: Vec<Vec<State>>,
}

impl<'l, 'a> Tokens<'l, 'a> {
    fn new(lexer: &'l Lexer, source: &'a str, base: usize, stack: Vec<State>) -> Self {
        Tokens {
            lexer,
            source,
            base,
            pos: 0,
            stack,
            pending: VecDeque::new(),
            stalled: Vec::new(),
        }
    }

    pub fn stack(&self) -> &[State] {
        &self.stack
    }

    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn current_state(&self) -> State {
        self.stack.last().copied().unwrap_or(State::Root)
    }

    fn step(&mut self) {
        let lexer = self.lexer;
        let state = self.current_state();

        for rule in lexer.table.rules(state) {
            let Some(matched) = rule.match_at(self.source, self.pos) else {
                continue;
            };

            if matched.len == 0 {
                self.transition_in_place(rule, state);
            } else {
                self.apply(rule, matched);
            }
            return;
        }

        self.recover();
    }

    fn transition_in_place(&mut self, rule: &Rule, state: State) {
        let mut next = self.stack.clone();
        rule.transition.apply(&mut next);

        if next == self.stack
            || self.stalled.contains(&next)
            || self.stalled.len() >= MAX_STALLED_STEPS
        {
            tracing::trace!(
                %state,
                offset = self.offset(),
                pattern = rule.pattern(),
                "zero-width match makes no progress, forcing advance"
            );
            self.recover();
            return;
        }

        self.stalled.push(std::mem::replace(&mut self.stack, next));
        tracing::trace!(from = %state, to = %self.current_state(), "zero-width transition");
    }

    fn apply(&mut self, rule: &Rule, matched: RuleMatch<'a>) {
        let source = self.source;
        let start = self.pos;
        let end = start + matched.len;

        match &rule.action {
            Action::Token(kind) => self.emit(start, *kind, &source[start..end]),
            Action::Using(state) => self.sublex(start, &source[start..end], *state),
            Action::ByGroups(groups) => {
                for (group, captured) in groups.iter().zip(matched.groups) {
                    let Some((offset, value)) = captured else {
                        continue;
                    };
                    match group {
                        Group::Token(kind) => self.emit(start + offset, *kind, value),
                        Group::Using(state) => self.sublex(start + offset, value, *state),
                    }
                }
            }
        }

        self.pos = end;
        self.stalled.clear();

        let before = self.current_state();
        rule.transition.apply(&mut self.stack);
        if before != self.current_state() {
            tracing::trace!(from = %before, to = %self.current_state(), depth = self.stack.len(), "transition");
        }
    }

    fn emit(&mut self, offset: usize, kind: TokenKind, value: &'a str) {
        if !value.is_empty() {
            self.pending
                .push_back(MK_TOKEN!(self.base + offset, kind, value));
        }
    }

    fn sublex(&mut self, offset: usize, value: &'a str, state: State) {
        if value.is_empty() {
            return;
        }

        tracing::trace!(%state, offset = self.base + offset, len = value.len(), "sub-lexing");
        let inner = Tokens::new(self.lexer, value, self.base + offset, stack_for(state));
        self.pending.extend(inner);
    }

    /// Consumes exactly one character that no rule accepted.
    fn recover(&mut self) {
        let source = self.source;
        let Some(c) = source[self.pos..].chars().next() else {
            return;
        };
        let value = &source[self.pos..self.pos + c.len_utf8()];

        if c == '\n' && self.lexer.options.newline_resets_state {
            self.stack.clear();
            self.stack.push(State::Root);
            self.emit(self.pos, TokenKind::Text, value);
        } else {
            tracing::trace!(
                state = %self.current_state(),
                offset = self.offset(),
                character = ?c,
                "no rule matched"
            );
            self.emit(self.pos, TokenKind::Error, value);
        }

        self.pos += c.len_utf8();
        self.stalled.clear();
    }
}

impl<'a> Iterator for Tokens<'_, 'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.pos >= self.source.len() {
                return None;
            }
            self.step();
        }
    }
}

impl FusedIterator for Tokens<'_, '_> {}
