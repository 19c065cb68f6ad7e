//! ## parsemark-parsers::hooked
//! **Tree parser driven entirely by an injected allocator**
//!
//! Every node and every attribute is a separate block obtained from the
//! [`Allocator`] capability passed into the parse call: the
//! many-small-short-lived-allocations pattern the arena runner exists
//! to measure. Names and text are spans into the input buffer; the
//! blocks hold only the tree structure.

use std::mem;
use std::ptr::{self, NonNull};

use parsemark_core::alloc::Allocator;

use crate::error::ParseError;
use crate::tokenizer::{is_void_element, Span, Token, Tokenizer};
use crate::MAX_DEPTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawNodeKind {
    Document,
    Element,
    Text,
    Comment,
    Doctype,
}

/// A tree node written into an allocator block. Links are raw pointers
/// into sibling blocks of the same allocator.
#[repr(C)]
pub struct RawNode {
    pub kind: RawNodeKind,
    /// Element name, or the text/comment/doctype content span.
    pub name: Span,
    pub parent: *mut RawNode,
    pub first_child: *mut RawNode,
    pub last_child: *mut RawNode,
    pub next_sibling: *mut RawNode,
    pub first_attr: *mut RawAttr,
}

impl RawNode {
    fn new(kind: RawNodeKind, name: Span) -> Self {
        RawNode {
            kind,
            name,
            parent: ptr::null_mut(),
            first_child: ptr::null_mut(),
            last_child: ptr::null_mut(),
            next_sibling: ptr::null_mut(),
            first_attr: ptr::null_mut(),
        }
    }
}

/// One element attribute, linked into a per-element list.
#[repr(C)]
pub struct RawAttr {
    pub name: Span,
    pub value: Span,
    pub next: *mut RawAttr,
}

/// Handle to a finished parse.
///
/// The blocks backing the tree belong to the allocator the parse ran
/// against; the tree is valid until that allocator's next reset (or
/// drop). The harness only reads `node_count`; walking the tree is for
/// consumers who uphold that lifetime.
#[derive(Debug)]
pub struct ParsedTree {
    root: NonNull<RawNode>,
    node_count: usize,
}

impl ParsedTree {
    pub fn root(&self) -> NonNull<RawNode> {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }
}

/// HTML tree builder with injected allocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct HookedParser;

impl HookedParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses `input` into a tree allocated block-by-block from `alloc`.
    ///
    /// On failure the partially built tree is simply abandoned; the
    /// caller reclaims its blocks with the allocator's next reset.
    pub fn parse(
        &self,
        input: &[u8],
        alloc: &mut dyn Allocator,
    ) -> Result<ParsedTree, ParseError> {
        let root = alloc_node(alloc, RawNode::new(RawNodeKind::Document, Span::empty()))?;
        let mut open = root;
        let mut depth = 0usize;
        let mut node_count = 1usize;

        let mut tok = Tokenizer::new(input);
        while let Some(token) = tok.next() {
            match token {
                Token::Text(span) => {
                    let node = alloc_node(alloc, RawNode::new(RawNodeKind::Text, span))?;
                    append_child(open, node);
                    node_count += 1;
                }
                Token::Comment(span) => {
                    let node = alloc_node(alloc, RawNode::new(RawNodeKind::Comment, span))?;
                    append_child(open, node);
                    node_count += 1;
                }
                Token::Doctype(span) => {
                    let node = alloc_node(alloc, RawNode::new(RawNodeKind::Doctype, span))?;
                    append_child(open, node);
                    node_count += 1;
                }
                Token::StartTag { name, self_closing } => {
                    let node = alloc_node(alloc, RawNode::new(RawNodeKind::Element, name))?;

                    let mut last_attr: *mut RawAttr = ptr::null_mut();
                    for attr in tok.attrs() {
                        let block = alloc.allocate(mem::size_of::<RawAttr>())?;
                        let raw = block.cast::<RawAttr>().as_ptr();
                        unsafe {
                            raw.write(RawAttr {
                                name: attr.name,
                                value: attr.value,
                                next: ptr::null_mut(),
                            });
                            if last_attr.is_null() {
                                (*node.as_ptr()).first_attr = raw;
                            } else {
                                (*last_attr).next = raw;
                            }
                        }
                        last_attr = raw;
                    }

                    append_child(open, node);
                    node_count += 1;

                    if !self_closing && !is_void_element(name.slice(input)) {
                        depth += 1;
                        if depth > MAX_DEPTH {
                            return Err(ParseError::TooDeep { limit: MAX_DEPTH });
                        }
                        open = node;
                    }
                }
                Token::EndTag { name } => {
                    let target = name.slice(input);
                    let mut probe = open;
                    let mut pops = 1usize;
                    let matched = loop {
                        let (kind, probe_name, parent) = unsafe {
                            let p = probe.as_ptr();
                            ((*p).kind, (*p).name, (*p).parent)
                        };
                        if kind == RawNodeKind::Element
                            && probe_name.slice(input).eq_ignore_ascii_case(target)
                        {
                            break true;
                        }
                        match NonNull::new(parent) {
                            Some(p) => {
                                probe = p;
                                pops += 1;
                            }
                            None => break false,
                        }
                    };
                    if matched {
                        let parent = unsafe { (*probe.as_ptr()).parent };
                        open = NonNull::new(parent).unwrap_or(root);
                        depth = depth.saturating_sub(pops);
                    }
                    // An end tag with no open counterpart is ignored.
                }
            }
        }

        Ok(ParsedTree { root, node_count })
    }
}

fn alloc_node(
    alloc: &mut dyn Allocator,
    node: RawNode,
) -> Result<NonNull<RawNode>, ParseError> {
    // Blocks are aligned to at least 16 bytes, enough for RawNode.
    let block = alloc.allocate(mem::size_of::<RawNode>())?;
    let typed = block.cast::<RawNode>();
    unsafe { typed.as_ptr().write(node) };
    Ok(typed)
}

fn append_child(parent: NonNull<RawNode>, child: NonNull<RawNode>) {
    unsafe {
        let p = parent.as_ptr();
        (*child.as_ptr()).parent = p;
        if (*p).last_child.is_null() {
            (*p).first_child = child.as_ptr();
        } else {
            (*(*p).last_child).next_sibling = child.as_ptr();
        }
        (*p).last_child = child.as_ptr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsemark_core::alloc::{Allocator as _, ResetArena};

    fn parse(input: &[u8], arena: &mut ResetArena) -> ParsedTree {
        HookedParser::new().parse(input, arena).unwrap()
    }

    unsafe fn children(node: *mut RawNode) -> Vec<*mut RawNode> {
        let mut out = Vec::new();
        let mut cur = (*node).first_child;
        while !cur.is_null() {
            out.push(cur);
            cur = (*cur).next_sibling;
        }
        out
    }

    #[test]
    fn test_builds_nested_tree() {
        let input = b"<html><body><p>hi</p></body></html>";
        let mut arena = ResetArena::new();
        let tree = parse(input, &mut arena);
        // document, html, body, p, text
        assert_eq!(tree.node_count(), 5);

        unsafe {
            let root = tree.root().as_ptr();
            assert_eq!((*root).kind, RawNodeKind::Document);
            let html = children(root);
            assert_eq!(html.len(), 1);
            assert_eq!((*html[0]).name.slice(input), b"html");
            let body = children(html[0]);
            assert_eq!((*body[0]).name.slice(input), b"body");
            let p = children(body[0]);
            let text = children(p[0]);
            assert_eq!((*text[0]).kind, RawNodeKind::Text);
            assert_eq!((*text[0]).name.slice(input), b"hi");
        }
    }

    #[test]
    fn test_attributes_form_a_list() {
        let input = br#"<a href="/x" id=link hidden>t</a>"#;
        let mut arena = ResetArena::new();
        let tree = parse(input, &mut arena);

        unsafe {
            let root = tree.root().as_ptr();
            let a = children(root)[0];
            let mut names = Vec::new();
            let mut attr = (*a).first_attr;
            while !attr.is_null() {
                names.push((*attr).name.slice(input).to_vec());
                attr = (*attr).next;
            }
            assert_eq!(names, vec![b"href".to_vec(), b"id".to_vec(), b"hidden".to_vec()]);
        }
    }

    #[test]
    fn test_void_and_self_closing_elements_stay_childless() {
        let input = b"<div><br><img src=x/><span>s</span></div>";
        let mut arena = ResetArena::new();
        let tree = parse(input, &mut arena);

        unsafe {
            let root = tree.root().as_ptr();
            let div = children(root)[0];
            let kids = children(div);
            assert_eq!(kids.len(), 3);
            assert_eq!((*kids[0]).name.slice(input), b"br");
            assert!(children(kids[0]).is_empty());
            assert_eq!((*kids[2]).name.slice(input), b"span");
        }
    }

    #[test]
    fn test_mismatched_end_tags_are_tolerated() {
        let input = b"<ul><li>one<li>two</ul></nope>";
        let mut arena = ResetArena::new();
        let tree = parse(input, &mut arena);
        unsafe {
            let root = tree.root().as_ptr();
            let ul = children(root)[0];
            assert_eq!((*ul).name.slice(input), b"ul");
            // The unclosed first li adopts the second as a child; the
            // </ul> still closes everything back to the root.
            assert!(!children(ul).is_empty());
        }
        assert_eq!(arena.live_blocks(), tree.node_count());
    }

    #[test]
    fn test_excessive_nesting_fails() {
        let mut input = Vec::new();
        for _ in 0..(MAX_DEPTH + 8) {
            input.extend_from_slice(b"<div>");
        }
        let mut arena = ResetArena::new();
        let result = HookedParser::new().parse(&input, &mut arena);
        assert_eq!(result.unwrap_err(), ParseError::TooDeep { limit: MAX_DEPTH });
        // The abandoned tree is reclaimed by the caller's reset.
        arena.reset();
        assert_eq!(arena.live_blocks(), 0);
    }

    #[test]
    fn test_every_block_comes_from_the_allocator() {
        let input = br#"<p class="a" id="b">text</p>"#;
        let mut arena = ResetArena::new();
        let tree = parse(input, &mut arena);
        // document + p + text nodes, plus two attribute blocks.
        assert_eq!(tree.node_count(), 3);
        assert_eq!(arena.live_blocks(), 5);
    }
}
