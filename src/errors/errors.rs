use std::fmt::Display;

use thiserror::Error;

use crate::lexer::rules::State;

#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    state: Option<State>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, state: State) -> Self {
        Error {
            internal_error: error_impl,
            state: Some(state),
        }
    }

    /// An error that is not tied to the rules of a particular state.
    pub fn detached(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            state: None,
        }
    }

    pub fn get_state(&self) -> Option<State> {
        self.state
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidPattern { .. } => "InvalidPattern",
            ErrorImpl::GroupCountMismatch { .. } => "GroupCountMismatch",
            ErrorImpl::MisplacedLookahead { .. } => "MisplacedLookahead",
            ErrorImpl::RecursiveInclude { .. } => "RecursiveInclude",
            ErrorImpl::UnknownTokenKind { .. } => "UnknownTokenKind",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidPattern { .. } => ErrorTip::None,
            ErrorImpl::GroupCountMismatch { groups, actions, .. } => {
                ErrorTip::Suggestion(format!(
                    "Pattern has {} capture groups but {} group actions, make nested groups non-capturing with `(?:...)`",
                    groups, actions
                ))
            }
            ErrorImpl::MisplacedLookahead { .. } => ErrorTip::Suggestion(String::from(
                "The `ahead` group must be the last group of the pattern",
            )),
            ErrorImpl::RecursiveInclude { state } => {
                ErrorTip::Suggestion(format!("State `{}` includes itself", state))
            }
            ErrorImpl::UnknownTokenKind { name } => ErrorTip::Suggestion(format!(
                "`{}` is not a token kind, use a dotted name such as `Comment.Preproc`",
                name
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("pattern {pattern:?} has {groups} groups, expected {actions}")]
    GroupCountMismatch {
        pattern: String,
        groups: usize,
        actions: usize,
    },
    #[error("lookahead group is not the last group of {pattern:?}")]
    MisplacedLookahead { pattern: String },
    #[error("state {state} is included recursively")]
    RecursiveInclude { state: State },
    #[error("unknown token kind {name:?}")]
    UnknownTokenKind { name: String },
}
