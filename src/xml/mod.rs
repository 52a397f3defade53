//! Minimal pull-based XML layer: event reader, attribute parsing and
//! entity handling.
//!
//! Parameter and herd files are small and read fully into memory, so the
//! reader borrows from a single input string and yields zero-copy events
//! wherever no entity decoding is needed.

pub mod attributes;
pub mod entities;
pub mod reader;

pub use attributes::{local_name, Attr};
pub use reader::{Reader, StartTag, XmlEvent};
