//! Minimal event-driven XML-to-tree reader.
//!
//! CLDR's XML shape — many same-tag siblings distinguished only by a
//! `type` attribute, e.g. twelve sibling `<month type="1">`..`<month
//! type="12">` elements under one `<monthWidth>` — doesn't fit a single
//! serde-derived struct the way a simpler document would. Every file is
//! read once into this small generic node tree with `quick_xml`'s
//! event-based `Reader`, then walked imperatively by the section parsers
//! in `locale.rs` / `global.rs` / `rbnf.rs` / `plurals.rs`, the same way
//! `examples/original_source/scripts/import_cldr.py` walks an
//! `ElementTree` with repeated `.//tag` / `.findall(...)` traversals.

use std::collections::HashMap;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ImportError;

#[derive(Debug, Clone, Default)]
pub struct XmlNode {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub children: Vec<XmlNode>,
    pub text: String,
}

impl XmlNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    pub fn child_named(&self, tag: &str) -> Option<&XmlNode> {
        self.children_named(tag).next()
    }

    /// First descendant anywhere below this node with the given tag,
    /// depth first — the `.//tag` XPath idiom the original importer
    /// leans on throughout.
    pub fn find(&self, tag: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.find(tag) {
                return Some(found);
            }
        }
        None
    }

    fn find_all<'a>(&'a self, tag: &str, out: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.tag == tag {
                out.push(child);
            }
            child.find_all(tag, out);
        }
    }

    /// Every descendant anywhere below this node with the given tag.
    pub fn findall(&self, tag: &str) -> Vec<&XmlNode> {
        let mut out = Vec::new();
        self.find_all(tag, &mut out);
        out
    }

    /// Concatenated text of this node and all descendants, in document
    /// order, trimmed. Mirrors `_text()` in the original importer, used
    /// for patterns and names that may contain nested inline markup.
    pub fn full_text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.full_text());
        }
        out.trim().to_string()
    }
}

pub fn parse_file(path: &Path) -> Result<XmlNode, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::Io(path.display().to_string(), e))?;
    parse_str(&content)
}

pub fn parse_str(content: &str) -> Result<XmlNode, ImportError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    // A synthetic root holds whatever the document's single top-level
    // element parses into; popped off before returning.
    let mut stack: Vec<XmlNode> = vec![XmlNode::default()];
    let mut buf = Vec::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| ImportError::Xml(e.to_string()))?
        {
            Event::Start(e) => {
                let node = node_from_start(&e)?;
                stack.push(node);
            }
            Event::Empty(e) => {
                let node = node_from_start(&e)?;
                top(&mut stack).children.push(node);
            }
            Event::End(_) => {
                let finished = stack.pop().expect("end event without matching start");
                top(&mut stack).children.push(finished);
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| ImportError::Xml(e.to_string()))?;
                top(&mut stack).text.push_str(&text);
            }
            Event::CData(t) => {
                let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                top(&mut stack).text.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let mut root = stack.pop().expect("root always present");
    root.children
        .pop()
        .ok_or_else(|| ImportError::Xml("empty document".to_string()))
}

fn top<'a>(stack: &'a mut [XmlNode]) -> &'a mut XmlNode {
    stack.last_mut().expect("stack always has the synthetic root")
}

fn node_from_start(e: &BytesStart) -> Result<XmlNode, ImportError> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ImportError::Xml(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| ImportError::Xml(err.to_string()))?
            .into_owned();
        attrs.insert(key, value);
    }
    Ok(XmlNode { tag, attrs, children: Vec::new(), text: String::new() })
}

/// CLDR draft/alternate entries (spec §9's "skip drafts" convention,
/// `_should_skip_elem` in the original importer): a `draft` or `alt`
/// attribute marks a value that should only be used if nothing better
/// has already been recorded for `already_present`.
pub fn is_draft_or_alt(node: &XmlNode, already_present: bool) -> bool {
    (node.has_attr("draft") || node.has_attr("alt")) && already_present
}
