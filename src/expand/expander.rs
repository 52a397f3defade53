//! Element expansion.
//!
//! Given a materialized model/monitor element, produces the elements to
//! serialize in its place: the element unchanged, one element with rewritten
//! attributes, or a set of clones covering every matched production type
//! (or every from/to pairing).

use super::element::Element;
use super::resolve::{Resolved, Resolver};
use super::route::{collapses_dual, collapses_single};

const SINGLE_ATTR: &str = "production-type";
const FROM_ATTR: &str = "from-production-type";
const TO_ATTR: &str = "to-production-type";

/// Expand one element. Output order is deterministic: universe order for
/// single-attribute clones, from-major/to-minor for pairings.
pub fn expand(element: Element, resolver: &mut Resolver<'_>) -> Vec<Element> {
    let single = element.attr(SINGLE_ATTR).unwrap_or("").to_string();
    let from = element.attr(FROM_ATTR).unwrap_or("").to_string();
    let to = element.attr(TO_ATTR).unwrap_or("").to_string();

    // A missing attribute and an empty one are equivalent here: an element
    // with no production-type attributes at all passes through untouched.
    if single.is_empty() && from.is_empty() && to.is_empty() {
        return vec![element];
    }

    if !single.is_empty() {
        expand_single(element, &single, resolver)
    } else {
        expand_from_to(element, &from, &to, resolver)
    }
}

fn expand_single(mut element: Element, raw: &str, resolver: &mut Resolver<'_>) -> Vec<Element> {
    if !raw.starts_with('$') {
        log::debug!("{}: literal production type {raw:?}", element.name);
        return vec![element];
    }

    let resolved = resolver.resolve(raw);
    if collapses_single(element.local_name()) {
        element.set_attr(SINGLE_ATTR, joined_or_shorthand(&resolved));
        return vec![element];
    }

    resolved
        .values
        .iter()
        .map(|prodtype| {
            let mut clone = element.clone();
            clone.set_attr(SINGLE_ATTR, prodtype.as_str());
            clone
        })
        .collect()
}

fn expand_from_to(
    mut element: Element,
    from_raw: &str,
    to_raw: &str,
    resolver: &mut Resolver<'_>,
) -> Vec<Element> {
    // Both sides already literal: nothing to resolve, no cloning needed.
    if is_concrete(from_raw) && is_concrete(to_raw) {
        log::debug!(
            "{}: literal from/to production types {from_raw:?} -> {to_raw:?}",
            element.name
        );
        return vec![element];
    }

    let from = resolver.resolve(from_raw);
    let to = resolver.resolve(to_raw);

    if collapses_dual(element.local_name()) {
        element.set_attr(FROM_ATTR, joined_or_shorthand(&from));
        element.set_attr(TO_ATTR, joined_or_shorthand(&to));
        return vec![element];
    }

    let mut clones = Vec::with_capacity(from.values.len() * to.values.len());
    for from_type in &from.values {
        for to_type in &to.values {
            let mut clone = element.clone();
            clone.set_attr(FROM_ATTR, from_type.as_str());
            clone.set_attr(TO_ATTR, to_type.as_str());
            clones.push(clone);
        }
    }
    clones
}

/// A value that needs no resolution: non-empty and not a pattern.
fn is_concrete(raw: &str) -> bool {
    !raw.is_empty() && !raw.starts_with('$')
}

/// The rewritten attribute value: the empty-string shorthand when the
/// resolution covers every production type, else the comma-joined list.
fn joined_or_shorthand(resolved: &Resolved) -> String {
    if resolved.exhausts_universe {
        String::new()
    } else {
        resolved.values.join(",")
    }
}
