use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum DelimitersError {
    #[error("delimiters must be written as `oc` or `loc` (e.g. `{{}}` or `$()`), got {0:?}")]
    BadShape(String),

    #[error("{0:?} cannot be used as a delimiter")]
    ReservedChar(char),
}

/// How variable references are written in a template.
///
/// The opening sequence is either `open` alone or `leader` followed by `open`; a reference is
/// terminated by `close`. The configuration is fixed for the lifetime of a resolver.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Delimiters {
    leader: Option<char>,
    open: char,
    close: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::dollar_paren()
    }
}

impl Delimiters {
    /// `:` and `\` are rejected because the option-chain syntax owns them.
    pub fn new(leader: Option<char>, open: char, close: char) -> Result<Self, DelimitersError> {
        for c in leader.into_iter().chain([open, close]) {
            if matches!(c, ':' | '\\') {
                return Err(DelimitersError::ReservedChar(c));
            }
        }

        Ok(Delimiters {
            leader,
            open,
            close,
        })
    }

    /// `$(NAME)`
    pub const fn dollar_paren() -> Self {
        Delimiters {
            leader: Some('$'),
            open: '(',
            close: ')',
        }
    }

    /// `${NAME}`
    pub const fn dollar_brace() -> Self {
        Delimiters {
            leader: Some('$'),
            open: '{',
            close: '}',
        }
    }

    /// `{NAME}`
    pub const fn braces() -> Self {
        Delimiters {
            leader: None,
            open: '{',
            close: '}',
        }
    }

    pub fn leader(&self) -> Option<char> {
        self.leader
    }

    pub fn open(&self) -> char {
        self.open
    }

    pub fn close(&self) -> char {
        self.close
    }

    /// Length in characters of the opening sequence.
    pub fn opener_len(&self) -> usize {
        if self.leader.is_some() { 2 } else { 1 }
    }
}

impl FromStr for Delimiters {
    type Err = DelimitersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            [open, close] => Delimiters::new(None, *open, *close),
            [leader, open, close] => Delimiters::new(Some(*leader), *open, *close),
            _ => Err(DelimitersError::BadShape(s.to_string())),
        }
    }
}

impl Display for Delimiters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(leader) = self.leader {
            write!(f, "{leader}")?;
        }
        write!(f, "{}{}", self.open, self.close)
    }
}
