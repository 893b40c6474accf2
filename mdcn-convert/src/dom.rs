//! HTML tree capability layer
//!
//! Thin wrappers over the `html5ever` + `rcdom` ecosystem so the rest of the
//! crate can load, query, rewrite and re-serialize HTML without touching
//! parser internals. The surface mirrors what the transform passes need:
//! load a fragment, walk it in document order, swap nodes in place, move
//! children between containers, and serialize a container's children back
//! to markup.
//!
//! # Library Choice
//!
//! `html5ever` is the Servo project's browser-grade HTML5 parser and
//! `markup5ever_rcdom` its reference-counted DOM. Malformed input is
//! handled by the parser's own error recovery, which is exactly the
//! tolerance the normalizer promises; no validation happens here.
//!
//! The document parser supplies the implicit `<html>/<head>/<body>` shell
//! around a fragment, so a fragment round-trips as the body's children.

use crate::error::ConvertError;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_document, Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Parse an HTML fragment (or full document) into a mutable tree.
/// Parsing is best-effort; malformed markup never fails here.
pub fn load_fragment(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// The `<body>` element of a parsed tree.
pub fn body(dom: &RcDom) -> Result<Handle, ConvertError> {
    let html = child_element(&dom.document, "html")
        .ok_or_else(|| ConvertError::ParseError("document has no <html> element".to_string()))?;
    child_element(&html, "body")
        .ok_or_else(|| ConvertError::ParseError("document has no <body> element".to_string()))
}

fn child_element(node: &Handle, tag: &str) -> Option<Handle> {
    node.children
        .borrow()
        .iter()
        .find(|child| is_element(child, tag))
        .cloned()
}

/// Whether a node is an element with the given local name.
pub fn is_element(node: &Handle, tag: &str) -> bool {
    matches!(&node.data, NodeData::Element { name, .. } if &*name.local == tag)
}

/// Whether a node is an element with any of the given local names.
pub fn is_any_element(node: &Handle, tags: &[&str]) -> bool {
    tags.iter().any(|tag| is_element(node, tag))
}

/// The local name of an element node.
pub fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// The value of an attribute on an element node.
pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    if let NodeData::Element { attrs, .. } = &node.data {
        for attr in attrs.borrow().iter() {
            if &*attr.name.local == name {
                return Some(attr.value.to_string());
            }
        }
    }
    None
}

/// Collect every descendant of `root` matching the predicate, in document
/// order. `root` itself is not considered.
pub fn query_all<F>(root: &Handle, matches: F) -> Vec<Handle>
where
    F: Fn(&Handle) -> bool,
{
    let mut found = Vec::new();
    collect_matching(root, &matches, &mut found);
    found
}

fn collect_matching<F>(node: &Handle, matches: &F, found: &mut Vec<Handle>)
where
    F: Fn(&Handle) -> bool,
{
    for child in node.children.borrow().iter() {
        if matches(child) {
            found.push(child.clone());
        }
        collect_matching(child, matches, found);
    }
}

/// The parent of a node, if it is still attached.
pub fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take()?;
    let parent = weak.upgrade();
    node.parent.set(Some(weak));
    parent
}

/// Swap `new` into `old`'s position under `old`'s parent. `old` is detached.
pub fn replace_node(old: &Handle, new: Handle) -> Result<(), ConvertError> {
    let parent = parent_of(old).ok_or_else(|| {
        ConvertError::SerializationError("cannot replace a node without a parent".to_string())
    })?;
    let mut children = parent.children.borrow_mut();
    let index = children
        .iter()
        .position(|child| Rc::ptr_eq(child, old))
        .ok_or_else(|| {
            ConvertError::SerializationError("node not found under its parent".to_string())
        })?;
    new.parent.set(Some(Rc::downgrade(&parent)));
    old.parent.set(None);
    children[index] = new;
    Ok(())
}

/// Move every child of `from` to the end of `to`, preserving order and
/// node identity (descendants keep their own subtrees untouched).
pub fn move_children(from: &Handle, to: &Handle) {
    let mut source = from.children.borrow_mut();
    let mut target = to.children.borrow_mut();
    for child in source.drain(..) {
        child.parent.set(Some(Rc::downgrade(to)));
        target.push(child);
    }
}

/// Append a child to a parent, fixing up the parent pointer.
pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Concatenated text of all descendant text nodes.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, text: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        text.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, text);
    }
}

/// Create a detached HTML element with attributes.
pub fn create_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(*name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a detached text node.
pub fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the children of a node (its "inner HTML") to a string.
pub fn serialize_children(node: &Handle) -> Result<String, ConvertError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| ConvertError::SerializationError(format!("HTML serialization failed: {e}")))?;
    String::from_utf8(output)
        .map_err(|e| ConvertError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}
