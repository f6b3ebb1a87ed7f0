//! Single-pass character scanner over a template.
//!
//! The cursor only ever moves forward. Opening sequences are recognised through a window of the
//! next one or two characters, depending on whether the [`Delimiters`] have a leader.

use rowan::TextRange;

use crate::delimiters::Delimiters;
use crate::tree::text_range;

/// What ended a variable-name fragment.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NameStop {
    /// `:`, an option chain follows
    Colon,
    Close,
    /// Another opening sequence: a reference nested inside this name
    Nested,
    EndOfInput,
}

/// What ended one option in a chain.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OptionStop {
    Colon,
    Close,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScannedOption {
    Option {
        letter: char,
        param: Option<TextRange>,
        stop: OptionStop,
    },
    /// A separator or close bracket where an option letter was expected, e.g. `$(A:)`
    Empty(OptionStop),
    Unterminated,
}

pub struct Scanner<'t> {
    text: &'t str,
    pos: usize,
    delimiters: Delimiters,
}

impl<'t> Scanner<'t> {
    pub fn new(text: &'t str, delimiters: Delimiters) -> Self {
        Scanner {
            text,
            pos: 0,
            delimiters,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn window(&self) -> (Option<char>, Option<char>) {
        let mut chars = self.text[self.pos..].chars();
        (chars.next(), chars.next())
    }

    fn peek(&self) -> Option<char> {
        self.window().0
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn at_opener(&self) -> bool {
        let open = self.delimiters.open();
        match (self.delimiters.leader(), self.window()) {
            (Some(leader), (Some(first), Some(second))) => first == leader && second == open,
            (None, (Some(first), _)) => first == open,
            _ => false,
        }
    }

    fn eat_opener(&mut self) {
        for _ in 0..self.delimiters.opener_len() {
            self.bump();
        }
    }

    /// Move past the next opening sequence, returning the offset it started at. Returns `None`
    /// with the cursor at the end of the text if there is no further opener.
    pub fn find_opener(&mut self) -> Option<usize> {
        while !self.is_at_end() {
            if self.at_opener() {
                let start = self.pos;
                self.eat_opener();
                return Some(start);
            }
            self.bump();
        }
        None
    }

    /// Scan one fragment of a variable name. Returns where the fragment ends and what stopped it;
    /// the terminator itself is consumed.
    pub fn scan_name(&mut self) -> (usize, NameStop) {
        let close = self.delimiters.close();
        loop {
            let end = self.pos;
            match self.peek() {
                None => return (end, NameStop::EndOfInput),
                Some(':') => {
                    self.bump();
                    return (end, NameStop::Colon);
                }
                Some(c) if c == close => {
                    self.bump();
                    return (end, NameStop::Close);
                }
                Some(_) if self.at_opener() => {
                    self.eat_opener();
                    return (end, NameStop::Nested);
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Scan one option letter and its parameter. A backslash escapes the character after it, so
    /// parameters may contain `:` or the close bracket.
    pub fn scan_option(&mut self) -> ScannedOption {
        let close = self.delimiters.close();
        let letter = match self.bump() {
            None => return ScannedOption::Unterminated,
            Some(':') => return ScannedOption::Empty(OptionStop::Colon),
            Some(c) if c == close => return ScannedOption::Empty(OptionStop::Close),
            Some(c) => c,
        };

        let start = self.pos;
        loop {
            let end = self.pos;
            let stop = match self.bump() {
                None => return ScannedOption::Unterminated,
                Some('\\') => {
                    if self.bump().is_none() {
                        return ScannedOption::Unterminated;
                    }
                    continue;
                }
                Some(':') => OptionStop::Colon,
                Some(c) if c == close => OptionStop::Close,
                Some(_) => continue,
            };

            return ScannedOption::Option {
                letter,
                param: (end > start).then(|| text_range(start, end)),
                stop,
            };
        }
    }
}
