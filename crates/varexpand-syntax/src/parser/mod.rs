//! Builds a [`Tree`] from template text.
//!
//! The root node alternates between literal runs and references. Each reference is parsed with
//! an explicit stack of frames: meeting an opener inside a name pushes a child node, and closing
//! a reference pops back to the parent, whose name scanning picks up where it left off.
//!
//! Malformed input never fails the parse. A reference that is still open at the end of the text
//! is left without its `EndName` part, so evaluation substitutes nothing for it.

use tracing::trace;

use crate::delimiters::Delimiters;
use crate::scanner::{NameStop, OptionStop, ScannedOption, Scanner};
use crate::tree::{Frame, NodeId, OptionId, OptionSpec, PartKind, Tree};


/// Marker for a reference that ran into the end of the text.
struct Unterminated;

struct Parser<'t, 'a> {
    scanner: Scanner<'t>,
    tree: &'a mut Tree,
}

impl Tree {
    /// Clear the arenas and parse `text` into them, returning the root node.
    ///
    /// # Panics
    ///
    /// If `text` is longer than [`Tree::MAX_TEXT_LEN`]. Spans are 32-bit offsets.
    pub fn parse(&mut self, text: &str, delimiters: Delimiters) -> NodeId {
        assert!(
            text.len() <= Tree::MAX_TEXT_LEN,
            "text of {} bytes exceeds the parser limit of {} bytes",
            text.len(),
            Tree::MAX_TEXT_LEN
        );
        self.clear();
        Parser {
            scanner: Scanner::new(text, delimiters),
            tree: self,
        }
        .parse_root()
    }
}

impl Parser<'_, '_> {
    fn parse_root(&mut self) -> NodeId {
        let root = self.tree.push_node();

        loop {
            let start = self.scanner.position();
            let opener = self.scanner.find_opener();
            let literal_end = opener.unwrap_or(self.scanner.position());
            if literal_end > start {
                let span = self.tree.push_span(start, literal_end);
                self.tree.push_part(root, PartKind::Text(span));
            }

            let Some(opener) = opener else {
                break;
            };

            trace!(offset = opener, "reference");
            if self.parse_reference(root).is_err() {
                trace!(offset = opener, "unterminated reference");
                break;
            }
        }

        root
    }

    /// Parse the reference whose opener was just consumed, appending its parts to `node`.
    fn parse_reference(&mut self, node: NodeId) -> Result<(), Unterminated> {
        self.tree.stack.push(Frame { node, named: false });

        loop {
            let top = self.tree.stack.len() - 1;
            let frame = self.tree.stack[top];
            let start = self.scanner.position();

            let (end, stop) = self.scanner.scan_name();
            match stop {
                NameStop::EndOfInput => return Err(Unterminated),
                NameStop::Nested => {
                    self.push_name_fragment(top, start, end);
                    let child = self.tree.push_node();
                    self.tree.push_part(frame.node, PartKind::Nested(child));
                    trace!(parent = %frame.node, %child, "nested reference");
                    self.tree.stack.push(Frame {
                        node: child,
                        named: false,
                    });
                }
                NameStop::Colon | NameStop::Close => {
                    self.push_name_fragment(top, start, end);
                    let options = match stop {
                        NameStop::Colon => self.parse_options()?,
                        _ => None,
                    };
                    self.tree.push_part(frame.node, PartKind::EndName(options));
                    self.tree.stack.pop();

                    if self.tree.stack.is_empty() {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Record `start..end` as a name fragment on the frame at `top`. The first fragment of a
    /// name is always recorded, even when empty, since it is what resets the name at evaluation.
    fn push_name_fragment(&mut self, top: usize, start: usize, end: usize) {
        let frame = &mut self.tree.stack[top];
        let node = frame.node;
        let kind = if !frame.named {
            frame.named = true;
            PartKind::BeginName
        } else if end > start {
            PartKind::ContinueName
        } else {
            return;
        };

        let span = self.tree.push_span(start, end);
        self.tree.push_part(node, kind(span));
    }

    fn parse_options(&mut self) -> Result<Option<OptionId>, Unterminated> {
        let mut first = None;
        let mut last = None;

        loop {
            let stop = match self.scanner.scan_option() {
                ScannedOption::Unterminated => return Err(Unterminated),
                ScannedOption::Empty(stop) => stop,
                ScannedOption::Option {
                    letter,
                    param,
                    stop,
                } => {
                    let id = self.tree.push_option(OptionSpec {
                        letter,
                        param,
                        last: false,
                    });
                    first.get_or_insert(id);
                    last = Some(id);
                    stop
                }
            };

            if stop == OptionStop::Close {
                if let Some(last) = last {
                    self.tree.mark_last_option(last);
                }
                trace!(options = ?first, "option chain");
                return Ok(first);
            }
        }
    }
}
