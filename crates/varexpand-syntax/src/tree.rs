//! Arena-indexed parse tree.
//!
//! Every structure lives in one of four flat `Vec`s owned by [`Tree`] and refers to the others
//! by typed index. A node's parts form a singly linked list threaded through the shared part
//! arena, and a nested reference points at its child node by [`NodeId`]. The tree is scratch
//! state: [`Tree::parse`](crate::parser) clears it before every parse.

use derive_more::{Display, From, Into};
use rowan::{TextRange, TextSize};

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, From, Into)]
        pub struct $name(u32);

        impl $name {
            /// `index` is below [`Tree::MAX_ARENA_LEN`], which `Tree::parse` guarantees by
            /// capping the text length.
            fn new(index: usize) -> Self {
                debug_assert!(index < Tree::MAX_ARENA_LEN);
                $name(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// One interpolation context: the whole template, or the name of one nested reference.
    NodeId
);
arena_id!(PartId);
arena_id!(SpanId);
arena_id!(
    /// First entry of an option chain; the chain runs until the entry flagged `last`.
    OptionId
);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PartKind {
    /// Literal run copied verbatim into every result
    Text(SpanId),
    /// First fragment of a variable name; resets the names under construction
    BeginName(SpanId),
    /// Further fragment of the same variable name
    ContinueName(SpanId),
    /// Child node whose expansions are spliced into the name under construction
    Nested(NodeId),
    /// Look the name(s) up, run the option chain and multiply into the results
    EndName(Option<OptionId>),
}

#[derive(Debug, Copy, Clone)]
struct Part {
    kind: PartKind,
    next: Option<PartId>,
}

#[derive(Debug, Copy, Clone, Default)]
struct Node {
    first: Option<PartId>,
    last: Option<PartId>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OptionSpec {
    pub letter: char,
    /// Raw parameter text, backslash escapes still in place
    pub param: Option<TextRange>,
    pub last: bool,
}

impl OptionSpec {
    pub fn param<'t>(&self, text: &'t str) -> &'t str {
        self.param.map_or("", |range| &text[range])
    }
}

/// Offsets are at most [`Tree::MAX_TEXT_LEN`], so they fit in a `TextSize`.
pub(crate) fn text_range(start: usize, end: usize) -> TextRange {
    debug_assert!(end <= Tree::MAX_TEXT_LEN);
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Frame {
    pub(crate) node: NodeId,
    /// Whether a `BeginName` part has been emitted for the reference this frame is parsing
    pub(crate) named: bool,
}

#[derive(Debug, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    parts: Vec<Part>,
    spans: Vec<TextRange>,
    options: Vec<OptionSpec>,
    pub(crate) stack: Vec<Frame>,
}

impl Tree {
    /// Longest text [`Tree::parse`] accepts.
    ///
    /// Each byte of text adds at most two entries to any one arena, so every index stays below
    /// [`Tree::MAX_ARENA_LEN`].
    pub const MAX_TEXT_LEN: usize = (u32::MAX / 4) as usize;

    /// Upper bound on the length of any arena, and so on every typed index.
    pub const MAX_ARENA_LEN: usize = u32::MAX as usize;

    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every arena, keeping the allocations.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.parts.clear();
        self.spans.clear();
        self.options.clear();
        self.stack.clear();
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every node in creation order. A nested node always comes after its parent.
    pub fn node_ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId::new)
    }

    pub fn parts(&self, node: NodeId) -> Parts<'_> {
        Parts {
            tree: self,
            next: self.nodes[node.index()].first,
        }
    }

    pub fn span(&self, span: SpanId) -> TextRange {
        self.spans[span.index()]
    }

    pub fn span_text<'t>(&self, text: &'t str, span: SpanId) -> &'t str {
        &text[self.span(span)]
    }

    /// The option chain starting at `first`, or an empty slice for a reference without options.
    pub fn option_chain(&self, first: Option<OptionId>) -> &[OptionSpec] {
        let Some(first) = first else {
            return &[];
        };

        let chain = &self.options[first.index()..];
        match chain.iter().position(|spec| spec.last) {
            Some(last) => &chain[..=last],
            None => chain,
        }
    }

    pub(crate) fn push_node(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::default());
        id
    }

    pub(crate) fn push_span(&mut self, start: usize, end: usize) -> SpanId {
        let id = SpanId::new(self.spans.len());
        self.spans.push(text_range(start, end));
        id
    }

    pub(crate) fn push_part(&mut self, node: NodeId, kind: PartKind) -> PartId {
        let id = PartId::new(self.parts.len());
        self.parts.push(Part { kind, next: None });

        let node = &mut self.nodes[node.index()];
        match node.last {
            Some(last) => self.parts[last.index()].next = Some(id),
            None => node.first = Some(id),
        }
        node.last = Some(id);
        id
    }

    pub(crate) fn push_option(&mut self, spec: OptionSpec) -> OptionId {
        let id = OptionId::new(self.options.len());
        self.options.push(spec);
        id
    }

    pub(crate) fn mark_last_option(&mut self, id: OptionId) {
        self.options[id.index()].last = true;
    }

    /// Render `node` as a compact s-expression, mostly useful for tests and trace output.
    ///
    /// ```text
    /// (text "Test ") (begin "CCOPTS_") (nested (begin "VARIANT") (end :u)) (end)
    /// ```
    pub fn render(&self, text: &str, node: NodeId) -> String {
        let mut ret = String::new();
        let mut stack = vec![self.parts(node)];

        while let Some(parts) = stack.last_mut() {
            let Some(kind) = parts.next() else {
                stack.pop();
                if !stack.is_empty() {
                    ret.push(')');
                }
                continue;
            };

            if !ret.is_empty() && !ret.ends_with(' ') {
                ret.push(' ');
            }
            match kind {
                PartKind::Text(span) => {
                    ret.push_str(&format!("(text {:?})", self.span_text(text, span)));
                }
                PartKind::BeginName(span) => {
                    ret.push_str(&format!("(begin {:?})", self.span_text(text, span)));
                }
                PartKind::ContinueName(span) => {
                    ret.push_str(&format!("(continue {:?})", self.span_text(text, span)));
                }
                PartKind::Nested(child) => {
                    ret.push_str("(nested ");
                    stack.push(self.parts(child));
                }
                PartKind::EndName(options) => {
                    ret.push_str("(end");
                    for spec in self.option_chain(options) {
                        ret.push_str(&format!(" :{}{}", spec.letter, spec.param(text)));
                    }
                    ret.push(')');
                }
            }
        }
        ret
    }
}

pub struct Parts<'a> {
    tree: &'a Tree,
    next: Option<PartId>,
}

impl Iterator for Parts<'_> {
    type Item = PartKind;

    fn next(&mut self) -> Option<Self::Item> {
        let part = self.tree.parts[self.next?.index()];
        self.next = part.next;
        Some(part.kind)
    }
}
