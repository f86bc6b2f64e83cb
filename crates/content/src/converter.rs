// ABOUTME: Converts an HTML fragment into page content nodes using an allow-list.
// ABOUTME: Parses with scraper (html5ever), locates <body>, and keeps only permitted tags and attributes.

use std::collections::HashSet;

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use scraper::{Html, Node as DomNode};

use crate::error::ContentError;
use crate::node::{Element, Node, MAX_DEPTH};

/// Tags that survive conversion. Anything else is dropped with its subtree.
pub const ALLOWED_TAGS: &[&str] = &[
    "a",
    "aside",
    "b",
    "blockquote",
    "br",
    "code",
    "em",
    "figcaption",
    "figure",
    "h3",
    "h4",
    "hr",
    "i",
    "iframe",
    "img",
    "li",
    "ol",
    "p",
    "pre",
    "s",
    "strong",
    "u",
    "ul",
    "video",
];

/// Attributes kept on emitted elements.
pub const ALLOWED_ATTRS: &[&str] = &["href", "src"];

static ALLOWED_TAG_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ALLOWED_TAGS.iter().copied().collect());

static ALLOWED_ATTR_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ALLOWED_ATTRS.iter().copied().collect());

/// Returns true if elements named `tag` survive conversion.
pub fn is_allowed_tag(tag: &str) -> bool {
    ALLOWED_TAG_SET.contains(tag)
}

/// Returns true if attributes named `name` are kept on emitted elements.
pub fn is_allowed_attr(name: &str) -> bool {
    ALLOWED_ATTR_SET.contains(name)
}

/// Converts HTML into the content nodes found under its `<body>`.
///
/// The parser synthesizes `<html><body>` around bare fragments, so empty input
/// yields an empty sequence. A document whose tree has no body element (a
/// frameset document) fails with [`ContentError::NoBodyFound`]. Allowed
/// elements nested deeper than [`MAX_DEPTH`] fail with
/// [`ContentError::TooDeep`].
pub fn html_to_content(html: &str) -> Result<Vec<Node>, ContentError> {
    let doc = Html::parse_document(html);
    let body = find_body(doc.tree.root()).ok_or(ContentError::NoBodyFound)?;
    convert_children(body, 0)
}

/// Depth-first, document-order search for the first `<body>` element.
fn find_body(root: NodeRef<'_, DomNode>) -> Option<NodeRef<'_, DomNode>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let DomNode::Element(el) = node.value() {
            if el.name() == "body" {
                return Some(node);
            }
        }
        // Reversed so the first child is popped next.
        stack.extend(node.children().rev());
    }
    None
}

/// Converts the children of an element holding `depth` allowed ancestors.
fn convert_children(parent: NodeRef<'_, DomNode>, depth: usize) -> Result<Vec<Node>, ContentError> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        if let Some(node) = convert_node(child, depth)? {
            nodes.push(node);
        }
    }
    trim_edges(&mut nodes);
    Ok(nodes)
}

fn convert_node(node: NodeRef<'_, DomNode>, depth: usize) -> Result<Option<Node>, ContentError> {
    match node.value() {
        DomNode::Text(text) => {
            if text.trim().is_empty() {
                return Ok(None);
            }
            Ok(Some(Node::Text(text.to_string())))
        }
        DomNode::Element(el) => {
            let tag = el.name();
            if !is_allowed_tag(tag) {
                return Ok(None);
            }
            if depth >= MAX_DEPTH {
                return Err(ContentError::TooDeep(MAX_DEPTH));
            }
            let attrs = el
                .attrs()
                .filter(|(name, _)| is_allowed_attr(name))
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            Ok(Some(Node::Element(Element {
                tag: tag.to_string(),
                attrs,
                children: convert_children(node, depth + 1)?,
            })))
        }
        _ => Ok(None),
    }
}

/// Trims leading whitespace from the first emitted child and trailing
/// whitespace from the last, when those are text. Spacing between inline
/// siblings is kept.
fn trim_edges(nodes: &mut [Node]) {
    if let Some(Node::Text(s)) = nodes.first_mut() {
        let trimmed = s.trim_start().to_string();
        *s = trimmed;
    }
    if let Some(Node::Text(s)) = nodes.last_mut() {
        let trimmed = s.trim_end().to_string();
        *s = trimmed;
    }
}
