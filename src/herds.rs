//! Production-type universe, loaded from a herd file.
//!
//! A herd file lists units, each carrying a `<production-type>` element.
//! The loader collects every distinct production-type name; patterns in the
//! parameter file are resolved against this set.

use crate::error::{Error, Result};
use crate::xml::{Reader, XmlEvent};
use std::collections::BTreeSet;

/// The full set of known production-type names: unique, case-preserved,
/// sorted lexicographically. Built once per run, immutable afterward.
#[derive(Debug, Clone, Default)]
pub struct ProductionTypes {
    names: Vec<String>,
}

impl ProductionTypes {
    /// Scan a herd document for `<production-type>` elements and collect
    /// their trimmed text content. Unbalanced tags are a fatal error.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::new(xml);
        let mut open: Vec<&str> = Vec::new();
        let mut names = BTreeSet::new();
        // Depth of the innermost open production-type element, if any
        let mut capture_depth: Option<usize> = None;
        let mut text = String::new();

        while let Some(event) = reader.next_event() {
            match event {
                XmlEvent::Start(tag) => {
                    if capture_depth.is_none() && tag.local_name() == "production-type" {
                        capture_depth = Some(open.len());
                        text.clear();
                    }
                    open.push(tag.name);
                }
                XmlEvent::Empty(_) => {}
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
                    if capture_depth == Some(open.len()) {
                        capture_depth = None;
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            names.insert(trimmed.to_string());
                        }
                    }
                }
                XmlEvent::Text(t) if capture_depth.is_some() => text.push_str(&t),
                XmlEvent::CData(t) if capture_depth.is_some() => text.push_str(t),
                _ => {}
            }
        }

        if let Some(name) = open.last() {
            return Err(Error::malformed(
                format!("unclosed element <{name}>"),
                reader.position(),
            ));
        }

        Ok(ProductionTypes {
            names: names.into_iter().collect(),
        })
    }

    /// Build directly from a list of names; deduplicates and sorts.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        ProductionTypes {
            names: set.into_iter().collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_sorted_unique_names() {
        let xml = "<herds>\
            <herd><id>1</id><production-type>Dairy cattle</production-type></herd>\
            <herd><id>2</id><production-type>Beef cattle</production-type></herd>\
            <herd><id>3</id><production-type>Dairy cattle</production-type></herd>\
            </herds>";
        let types = ProductionTypes::from_xml(xml).unwrap();
        assert_eq!(types.names(), ["Beef cattle", "Dairy cattle"]);
    }

    #[test]
    fn test_text_is_trimmed() {
        let xml = "<herds><herd><production-type>\n  Swine  \n</production-type></herd></herds>";
        let types = ProductionTypes::from_xml(xml).unwrap();
        assert_eq!(types.names(), ["Swine"]);
    }

    #[test]
    fn test_text_accumulated_across_entities() {
        let xml = "<h><production-type>Dairy &amp; goats</production-type></h>";
        let types = ProductionTypes::from_xml(xml).unwrap();
        assert_eq!(types.names(), ["Dairy & goats"]);
    }

    #[test]
    fn test_prefixed_production_type_element() {
        let xml = "<h xmlns:x=\"urn:x\"><x:production-type>Beef</x:production-type></h>";
        let types = ProductionTypes::from_xml(xml).unwrap();
        assert_eq!(types.names(), ["Beef"]);
    }

    #[test]
    fn test_no_production_types_yields_empty_universe() {
        let types = ProductionTypes::from_xml("<herds></herds>").unwrap();
        assert!(types.is_empty());
    }

    #[test]
    fn test_unbalanced_document_is_fatal() {
        assert!(ProductionTypes::from_xml("<herds><herd></herds>").is_err());
        assert!(ProductionTypes::from_xml("<herds>").is_err());
    }

    #[test]
    fn test_from_names_dedups_and_sorts() {
        let types = ProductionTypes::from_names(["b", "a", "b"]);
        assert_eq!(types.names(), ["a", "b"]);
        assert_eq!(types.len(), 2);
    }
}
