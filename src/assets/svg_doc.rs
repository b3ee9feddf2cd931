//! Owned, immutable SVG element tree.
//!
//! Source documents are parsed once with `roxmltree` into [`SvgElement`] values. Edits never
//! mutate a tree in place: they build a new tree, so the same parsed source can be themed for
//! many backgrounds concurrently.

use std::fmt::Write as _;

use crate::foundation::error::{HitsterError, HitsterResult};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Child of an [`SvgElement`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SvgNode {
    Element(SvgElement),
    Text(String),
}

/// One SVG element with its attributes in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SvgElement {
    pub(crate) name: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<SvgNode>,
}

impl SvgElement {
    #[cfg(test)]
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Parse an SVG document, keeping only elements and attributes that affect rendering.
    ///
    /// Editor metadata in foreign namespaces (Inkscape, Sodipodi, ...) is dropped.
    pub(crate) fn parse(text: &str) -> HitsterResult<Self> {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, opts)
            .map_err(|e| HitsterError::processing(format!("parse svg xml: {e}")))?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" || !is_svg_ns(root.tag_name().namespace()) {
            return Err(HitsterError::processing(format!(
                "root element is <{}>, expected <svg>",
                root.tag_name().name()
            )));
        }
        convert(root).ok_or_else(|| HitsterError::processing("empty svg document"))
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Copy of `self` with `name` set to `value`, replacing any existing value in place.
    pub(crate) fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
        self
    }

    pub(crate) fn child_elements(&self) -> impl Iterator<Item = &SvgElement> {
        self.children.iter().filter_map(|c| match c {
            SvgNode::Element(e) => Some(e),
            SvgNode::Text(_) => None,
        })
    }

    /// `self` and all descendant elements in document (pre-)order.
    pub(crate) fn descendants(&self) -> Vec<&SvgElement> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(el) = stack.pop() {
            out.push(el);
            let children: Vec<_> = el.child_elements().collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Serialize as a standalone SVG document.
    pub(crate) fn to_xml(&self) -> String {
        let mut out = String::with_capacity(4096);
        write_element(&mut out, self, true);
        out
    }
}

fn is_svg_ns(ns: Option<&str>) -> bool {
    matches!(ns, None | Some(SVG_NS))
}

fn convert(node: roxmltree::Node<'_, '_>) -> Option<SvgElement> {
    if !node.is_element() || !is_svg_ns(node.tag_name().namespace()) {
        return None;
    }

    let attrs = node
        .attributes()
        .filter_map(|a| {
            let name = match a.namespace() {
                None => a.name().to_owned(),
                Some(XLINK_NS) => format!("xlink:{}", a.name()),
                Some(XML_NS) => format!("xml:{}", a.name()),
                Some(_) => return None,
            };
            Some((name, a.value().to_owned()))
        })
        .collect();

    // Text runs separated by dropped nodes collapse into one.
    let mut children: Vec<SvgNode> = Vec::new();
    for child in node.children() {
        if child.is_text() {
            let Some(text) = child.text() else { continue };
            match children.last_mut() {
                Some(SvgNode::Text(prev)) => prev.push_str(text),
                _ => children.push(SvgNode::Text(text.to_owned())),
            }
        } else if let Some(el) = convert(child) {
            children.push(SvgNode::Element(el));
        }
    }

    Some(SvgElement {
        name: node.tag_name().name().to_owned(),
        attrs,
        children,
    })
}

fn write_element(out: &mut String, el: &SvgElement, is_root: bool) {
    let _ = write!(out, "<{}", el.name);
    if is_root {
        let _ = write!(out, " xmlns=\"{SVG_NS}\" xmlns:xlink=\"{XLINK_NS}\"");
    }
    for (k, v) in &el.attrs {
        let _ = write!(out, " {k}=\"{}\"", escape(v));
    }
    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &el.children {
        match child {
            SvgNode::Element(e) => write_element(out, e, false),
            SvgNode::Text(t) => out.push_str(&escape(t)),
        }
    }
    let _ = write!(out, "</{}>", el.name);
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_doc.rs"]
mod tests;
