//! Owned element values.
//!
//! Pattern-eligible elements are fully materialized from the event stream
//! before expansion: attributes in document order, subtree captured as owned
//! nodes. Clones produced during expansion are plain value copies; nothing
//! is shared or mutated after serialization.

use crate::error::{Error, Result};
use crate::xml::{entities, local_name, Reader, StartTag, XmlEvent};

/// A materialized element: tag name, insertion-ordered attributes and the
/// captured subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// One node of a captured subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

impl Element {
    /// Build an element (no children yet) from a start-tag event.
    pub fn from_start(tag: &StartTag<'_>) -> Self {
        Element {
            name: tag.name.to_string(),
            attrs: tag
                .attrs
                .iter()
                .map(|a| (a.name.to_string(), a.value.to_string()))
                .collect(),
            children: Vec::new(),
        }
    }

    /// Element name with any namespace prefix stripped.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing in place to preserve document order, or
    /// appending if the attribute was not present.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    /// Serialize to XML text. Childless elements use the self-closing form.
    pub fn to_xml(&self) -> String {
        let mut buf = String::with_capacity(128);
        self.write_into(&mut buf);
        buf
    }

    fn write_into(&self, buf: &mut String) {
        open_tag_into(&self.name, &self.attrs, buf);
        if self.children.is_empty() {
            buf.truncate(buf.len() - 1);
            buf.push_str("/>");
            return;
        }
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_into(buf),
                Node::Text(t) => entities::escape_into(t, buf),
                Node::CData(t) => {
                    buf.push_str("<![CDATA[");
                    buf.push_str(t);
                    buf.push_str("]]>");
                }
                Node::Comment(t) => {
                    buf.push_str("<!--");
                    buf.push_str(t);
                    buf.push_str("-->");
                }
            }
        }
        buf.push_str("</");
        buf.push_str(&self.name);
        buf.push('>');
    }
}

/// Write an open tag `<name a="v" ...>` into the buffer.
pub fn open_tag_into(name: &str, attrs: &[(String, String)], buf: &mut String) {
    buf.push('<');
    buf.push_str(name);
    for (attr_name, attr_value) in attrs {
        buf.push(' ');
        buf.push_str(attr_name);
        buf.push_str("=\"");
        entities::escape_into(attr_value, buf);
        buf.push('"');
    }
    buf.push('>');
}

/// Consume events until the end tag matching `start`, building the full
/// element. The reader is left positioned just past the end tag.
pub fn materialize<'a>(start: &StartTag<'a>, reader: &mut Reader<'a>) -> Result<Element> {
    let mut stack: Vec<Element> = vec![Element::from_start(start)];

    loop {
        let event = reader.next_event().ok_or_else(|| {
            Error::malformed(
                format!("unclosed element <{}>", stack[0].name),
                Reader::position(reader),
            )
        })?;
        match event {
            XmlEvent::Start(tag) => stack.push(Element::from_start(&tag)),
            XmlEvent::Empty(tag) => {
                let child = Element::from_start(&tag);
                stack.last_mut().unwrap().children.push(Node::Element(child));
            }
            XmlEvent::End(name) => {
                let done = stack.pop().unwrap();
                if done.name != name {
                    return Err(Error::malformed(
                        format!("end tag </{name}> does not match <{}>", done.name),
                        Reader::position(reader),
                    ));
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(done)),
                    None => return Ok(done),
                }
            }
            XmlEvent::Text(t) => stack
                .last_mut()
                .unwrap()
                .children
                .push(Node::Text(t.into_owned())),
            XmlEvent::CData(t) => stack
                .last_mut()
                .unwrap()
                .children
                .push(Node::CData(t.to_string())),
            XmlEvent::Comment(t) => stack
                .last_mut()
                .unwrap()
                .children
                .push(Node::Comment(t.to_string())),
        }
    }
}
