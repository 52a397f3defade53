//! Streaming document transformer.
//!
//! Walks the parameter document one event at a time. Model and monitor
//! elements are materialized and expanded; whitelisted metadata elements are
//! echoed whole; every other element passes through shallowly so nested
//! model elements are still seen as independent events. Each emitted item
//! goes on its own line, after a fixed declaration header.

use super::element::{materialize, open_tag_into, Element};
use super::expander::expand;
use super::resolve::Resolver;
use super::route::{classify, ElementRoute};
use crate::error::{Error, Result};
use crate::herds::ProductionTypes;
use crate::xml::{Reader, StartTag, XmlEvent};
use std::io::Write;

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Expand every production-type pattern in the document, writing the result
/// to `out`. The universe must already be built; input is processed in a
/// single pass.
pub fn expand_document<W: Write>(
    xml: &str,
    types: &ProductionTypes,
    out: &mut W,
) -> Result<()> {
    let mut resolver = Resolver::new(types);
    let mut reader = Reader::new(xml);
    // Open shallow tags awaiting their close events
    let mut open: Vec<&str> = Vec::new();

    writeln!(out, "{DECLARATION}")?;

    while let Some(event) = reader.next_event() {
        match event {
            XmlEvent::Start(tag) => match classify(tag.local_name()) {
                ElementRoute::Expand => {
                    let element = materialize(&tag, &mut reader)?;
                    for expanded in expand(element, &mut resolver) {
                        writeln!(out, "{}", expanded.to_xml())?;
                    }
                }
                ElementRoute::EchoSubtree => {
                    let element = materialize(&tag, &mut reader)?;
                    writeln!(out, "{}", element.to_xml())?;
                }
                ElementRoute::Shallow => {
                    writeln!(out, "{}", shallow_open(&tag))?;
                    open.push(tag.name);
                }
            },
            XmlEvent::Empty(tag) => match classify(tag.local_name()) {
                ElementRoute::Expand => {
                    for expanded in expand(Element::from_start(&tag), &mut resolver) {
                        writeln!(out, "{}", expanded.to_xml())?;
                    }
                }
                ElementRoute::EchoSubtree => {
                    writeln!(out, "{}", Element::from_start(&tag).to_xml())?;
                }
                ElementRoute::Shallow => {
                    // Self-closing shorthand becomes an explicit pair
                    writeln!(out, "{}", shallow_open(&tag))?;
                    writeln!(out, "</{}>", tag.name)?;
                }
            },
            XmlEvent::End(name) => {
                let opened = open.pop().ok_or_else(|| {
                    Error::malformed(format!("unexpected end tag </{name}>"), reader.position())
                })?;
                if opened != name {
                    return Err(Error::malformed(
                        format!("end tag </{name}> does not match <{opened}>"),
                        reader.position(),
                    ));
                }
                writeln!(out, "</{name}>")?;
            }
            // Text and comments between shallow tags are not carried over;
            // only element structure survives at those positions.
            XmlEvent::Text(_) | XmlEvent::CData(_) | XmlEvent::Comment(_) => {}
        }
    }

    if let Some(name) = open.last() {
        return Err(Error::malformed(
            format!("unclosed element <{name}>"),
            reader.position(),
        ));
    }

    Ok(())
}

fn shallow_open(tag: &StartTag<'_>) -> String {
    let attrs: Vec<(String, String)> = tag
        .attrs
        .iter()
        .map(|a| (a.name.to_string(), a.value.to_string()))
        .collect();
    let mut buf = String::with_capacity(64);
    open_tag_into(tag.name, &attrs, &mut buf);
    buf
}
