//! Pull-style XML event reader.
//!
//! Walks a document string and yields one event per tag or text run.
//! Lenient: no DTD processing, no namespace resolution; declarations and
//! DOCTYPE sections are skipped. Tag balance is the caller's concern.

use super::attributes::{local_name, parse_attributes, Attr};
use super::entities::decode;
use memchr::memchr;
use std::borrow::Cow;

/// An XML parsing event.
#[derive(Debug, Clone)]
pub enum XmlEvent<'a> {
    /// Start of an element: `<name attrs...>`
    Start(StartTag<'a>),
    /// Empty element: `<name attrs.../>`
    Empty(StartTag<'a>),
    /// End of an element: `</name>`
    End(&'a str),
    /// Text content between tags, entities decoded
    Text(Cow<'a, str>),
    /// CDATA section content, verbatim
    CData(&'a str),
    /// Comment content, verbatim
    Comment(&'a str),
}

/// Start-tag event data: element name plus its attributes in document order.
#[derive(Debug, Clone)]
pub struct StartTag<'a> {
    pub name: &'a str,
    pub attrs: Vec<Attr<'a>>,
}

impl<'a> StartTag<'a> {
    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_ref())
    }

    /// Element name with any namespace prefix stripped.
    pub fn local_name(&self) -> &'a str {
        local_name(self.name)
    }
}

/// Pull reader over a document string.
pub struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Reader { input, pos: 0 }
    }

    /// Byte offset of the next unread content, for error reporting.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the next event, or None at end of input.
    pub fn next_event(&mut self) -> Option<XmlEvent<'a>> {
        loop {
            let bytes = self.input.as_bytes();
            if self.pos >= bytes.len() {
                return None;
            }

            if bytes[self.pos] != b'<' {
                // Text run up to the next tag
                let start = self.pos;
                let end = match memchr(b'<', &bytes[start..]) {
                    Some(off) => start + off,
                    None => bytes.len(),
                };
                self.pos = end;
                return Some(XmlEvent::Text(decode(&self.input[start..end])));
            }

            let rest = &self.input[self.pos..];
            if let Some(body) = rest.strip_prefix("<!--") {
                let content_start = self.pos + 4;
                match body.find("-->") {
                    Some(off) => {
                        self.pos = content_start + off + 3;
                        return Some(XmlEvent::Comment(
                            &self.input[content_start..content_start + off],
                        ));
                    }
                    None => {
                        // Unterminated comment swallows the rest
                        self.pos = bytes.len();
                        return Some(XmlEvent::Comment(&self.input[content_start..]));
                    }
                }
            }
            if let Some(body) = rest.strip_prefix("<![CDATA[") {
                let content_start = self.pos + 9;
                match body.find("]]>") {
                    Some(off) => {
                        self.pos = content_start + off + 3;
                        return Some(XmlEvent::CData(
                            &self.input[content_start..content_start + off],
                        ));
                    }
                    None => {
                        self.pos = bytes.len();
                        return Some(XmlEvent::CData(&self.input[content_start..]));
                    }
                }
            }
            if rest.starts_with("<?") || rest.starts_with("<!") {
                // Declaration, processing instruction or DOCTYPE: skip
                match scan_tag_end(bytes, self.pos + 1) {
                    Some(end) => self.pos = end + 1,
                    None => self.pos = bytes.len(),
                }
                continue;
            }

            // Ordinary start or end tag
            let tag_end = match scan_tag_end(bytes, self.pos + 1) {
                Some(end) => end,
                None => {
                    // Unterminated tag: drop the fragment
                    self.pos = bytes.len();
                    return None;
                }
            };

            if bytes[self.pos + 1] == b'/' {
                let name = self.input[self.pos + 2..tag_end].trim();
                self.pos = tag_end + 1;
                return Some(XmlEvent::End(name));
            }

            let empty = bytes[tag_end - 1] == b'/';
            let content_end = if empty { tag_end - 1 } else { tag_end };
            let content = &self.input[self.pos + 1..content_end];
            self.pos = tag_end + 1;

            let name_len = content
                .bytes()
                .position(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'/'))
                .unwrap_or(content.len());
            let name = &content[..name_len];
            let attrs = parse_attributes(&content[name_len..]);
            let tag = StartTag { name, attrs };
            return Some(if empty {
                XmlEvent::Empty(tag)
            } else {
                XmlEvent::Start(tag)
            });
        }
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = XmlEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

/// Find the '>' closing the tag that starts before `from`, ignoring '>'
/// inside quoted attribute values.
fn scan_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut in_single = false;
    let mut in_double = false;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match b {
            b'"' if !in_single => in_double = !in_double,
            b'\'' if !in_double => in_single = !in_single,
            b'>' if !in_single && !in_double => return Some(i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(input: &str) -> Vec<XmlEvent<'_>> {
        Reader::new(input).collect()
    }

    #[test]
    fn test_simple_element() {
        let ev = events("<root>hello</root>");
        assert_eq!(ev.len(), 3);
        assert!(matches!(&ev[0], XmlEvent::Start(t) if t.name == "root"));
        assert!(matches!(&ev[1], XmlEvent::Text(t) if t == "hello"));
        assert!(matches!(&ev[2], XmlEvent::End(n) if *n == "root"));
    }

    #[test]
    fn test_empty_element_with_attrs() {
        let ev = events("<exposure-monitor production-type=\"Beef cattle\"/>");
        assert_eq!(ev.len(), 1);
        match &ev[0] {
            XmlEvent::Empty(t) => {
                assert_eq!(t.name, "exposure-monitor");
                assert_eq!(t.attr("production-type"), Some("Beef cattle"));
            }
            other => panic!("expected Empty, got {other:?}"),
        }
    }

    #[test]
    fn test_declaration_and_doctype_skipped() {
        let ev = events("<?xml version=\"1.0\"?><!DOCTYPE params><root/>");
        assert_eq!(ev.len(), 1);
        assert!(matches!(&ev[0], XmlEvent::Empty(t) if t.name == "root"));
    }

    #[test]
    fn test_comment_and_cdata() {
        let ev = events("<a><!-- note --><![CDATA[1 < 2]]></a>");
        assert!(matches!(&ev[1], XmlEvent::Comment(c) if *c == " note "));
        assert!(matches!(&ev[2], XmlEvent::CData(c) if *c == "1 < 2"));
    }

    #[test]
    fn test_gt_inside_attribute_value() {
        let ev = events("<a note=\"x > y\">t</a>");
        match &ev[0] {
            XmlEvent::Start(t) => assert_eq!(t.attr("note"), Some("x > y")),
            other => panic!("expected Start, got {other:?}"),
        }
    }

    #[test]
    fn test_entity_decoded_in_text() {
        let ev = events("<a>1 &lt; 2</a>");
        assert!(matches!(&ev[1], XmlEvent::Text(t) if t == "1 < 2"));
    }

    #[test]
    fn test_prefixed_name() {
        let ev = events("<naadsm:detection-model production-type=\"x\"></naadsm:detection-model>");
        match &ev[0] {
            XmlEvent::Start(t) => {
                assert_eq!(t.name, "naadsm:detection-model");
                assert_eq!(t.local_name(), "detection-model");
            }
            other => panic!("expected Start, got {other:?}"),
        }
    }
}
