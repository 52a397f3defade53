//! Parameter-document expansion: element capture, tag routing, attribute
//! resolution and the streaming driver.

pub mod element;
pub mod expander;
pub mod resolve;
pub mod route;
pub mod transform;

pub use element::{Element, Node};
pub use expander::expand;
pub use resolve::{Resolved, Resolver};
pub use route::{classify, ElementRoute};
pub use transform::expand_document;
