//! ## parsemark-parsers::reuse
//! **Document parser with capacity-retaining reuse**
//!
//! The reuse runner's operation: a [`Document`] owns index-linked node
//! storage and is cleared, not reallocated, between iterations.
//! `clear()` truncates the vectors and keeps their capacity, so a warm
//! iteration parses without asking the system allocator for anything.

use crate::error::ParseError;
use crate::tokenizer::{is_void_element, AttrSpan, Span, Token, Tokenizer};
use crate::MAX_DEPTH;

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
    Doctype,
}

/// An index-linked tree node. Node count is bounded by the input
/// length, which [`Span`] already caps at `u32`.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Element name, or the text/comment/doctype content span.
    pub name: Span,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    attr_start: u32,
    attr_len: u32,
}

/// A reusable parse document.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,
    attrs: Vec<AttrSpan>,
    open_stack: Vec<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all parse state while retaining storage, so the next parse
    /// reuses the capacity built up by earlier ones.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.attrs.clear();
        self.open_stack.clear();
    }

    /// Parses `input` into this document.
    ///
    /// Expects a cleared document (see [`clear`](Self::clear)); parsing
    /// into one that already holds a tree is a logic error.
    pub fn parse(&mut self, input: &[u8]) -> Result<(), ParseError> {
        debug_assert!(self.nodes.is_empty(), "call clear() before reusing a document");

        self.nodes.push(Node {
            kind: NodeKind::Document,
            name: Span::empty(),
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            attr_start: 0,
            attr_len: 0,
        });
        self.open_stack.push(ROOT);

        let mut tok = Tokenizer::new(input);
        while let Some(token) = tok.next() {
            match token {
                Token::Text(span) => {
                    self.append(NodeKind::Text, span, 0, 0);
                }
                Token::Comment(span) => {
                    self.append(NodeKind::Comment, span, 0, 0);
                }
                Token::Doctype(span) => {
                    self.append(NodeKind::Doctype, span, 0, 0);
                }
                Token::StartTag { name, self_closing } => {
                    let attr_start = self.attrs.len() as u32;
                    self.attrs.extend_from_slice(tok.attrs());
                    let attr_len = tok.attrs().len() as u32;
                    let id = self.append(NodeKind::Element, name, attr_start, attr_len);
                    if !self_closing && !is_void_element(name.slice(input)) {
                        if self.open_stack.len() > MAX_DEPTH {
                            return Err(ParseError::TooDeep { limit: MAX_DEPTH });
                        }
                        self.open_stack.push(id);
                    }
                }
                Token::EndTag { name } => {
                    let target = name.slice(input);
                    let matched = self.open_stack.iter().rposition(|&id| {
                        let node = &self.nodes[id.index()];
                        node.kind == NodeKind::Element
                            && node.name.slice(input).eq_ignore_ascii_case(target)
                    });
                    if let Some(at) = matched {
                        self.open_stack.truncate(at);
                    }
                    // An end tag with no open counterpart is ignored.
                }
            }
        }
        Ok(())
    }

    fn append(&mut self, kind: NodeKind, name: Span, attr_start: u32, attr_len: u32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = *self
            .open_stack
            .last()
            .expect("open stack always holds the root");

        let prev_last = self.nodes[parent.index()].last_child;
        self.nodes.push(Node {
            kind,
            name,
            parent: Some(parent),
            first_child: None,
            last_child: None,
            next_sibling: None,
            attr_start,
            attr_len,
        });
        match prev_last {
            Some(last) => self.nodes[last.index()].next_sibling = Some(id),
            None => self.nodes[parent.index()].first_child = Some(id),
        }
        self.nodes[parent.index()].last_child = Some(id);
        id
    }

    /// The document root, present after a successful parse.
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(ROOT)
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node storage capacity; retained across [`clear`](Self::clear).
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn attributes(&self, id: NodeId) -> &[AttrSpan] {
        let node = &self.nodes[id.index()];
        let start = node.attr_start as usize;
        &self.attrs[start..start + node.attr_len as usize]
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.nodes[id.index()].first_child,
        }
    }
}

/// Iterator over the child nodes of one parent.
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.node(id).next_sibling;
        Some(id)
    }
}
