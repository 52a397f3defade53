//! ptexpand - production-type pattern expansion for simulation parameter
//! files.
//!
//! A parameter file may give a model's production type as a search pattern:
//!
//! ```xml
//! <contact-spread-model from-production-type="$beef" to-production-type="$dairy -milking">
//! ```
//!
//! The `$` marks the value as a pattern over the production types found in
//! a herd file. This crate resolves every such pattern, rewriting each
//! affected element either into one element with a concrete comma-joined
//! attribute or into one copy per matched type (per pairing, for from/to
//! attributes).
//!
//! Pipeline: build the production-type universe from the herd file
//! ([`herds::ProductionTypes`]), then stream the parameter document through
//! [`expand::expand_document`], which resolves patterns with the
//! [`query`] engine and re-serializes the result.

pub mod error;
pub mod expand;
pub mod herds;
pub mod query;
pub mod xml;

pub use error::{Error, Result};
pub use expand::expand_document;
pub use herds::ProductionTypes;
pub use query::Query;
