//! Resolution of a raw production-type attribute value.
//!
//! Three shapes of value reach the resolver: the empty string (shorthand
//! for every production type), a `$`-prefixed search pattern, and a literal
//! name that is already concrete.

use crate::herds::ProductionTypes;
use crate::query::QueryCache;

/// The concrete production types an attribute value denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Matching names, in universe order
    pub values: Vec<String>,
    /// True when `values` covers the whole universe, by count
    pub exhausts_universe: bool,
}

/// Resolves raw attribute values against the production-type universe,
/// caching parsed patterns across calls.
pub struct Resolver<'a> {
    types: &'a ProductionTypes,
    cache: QueryCache,
}

impl<'a> Resolver<'a> {
    pub fn new(types: &'a ProductionTypes) -> Self {
        Resolver {
            types,
            cache: QueryCache::new(),
        }
    }

    pub fn types(&self) -> &ProductionTypes {
        self.types
    }

    pub fn resolve(&mut self, raw: &str) -> Resolved {
        if raw.is_empty() {
            return Resolved {
                values: self.types.names().to_vec(),
                exhausts_universe: true,
            };
        }
        if let Some(pattern) = raw.strip_prefix('$') {
            let query = self.cache.get_or_parse(pattern);
            let values: Vec<String> = query
                .matches(self.types.names())
                .into_iter()
                .map(str::to_owned)
                .collect();
            log::debug!(
                "pattern {raw:?} ({}) matched {} of {} production types",
                query.to_english(),
                values.len(),
                self.types.len()
            );
            let exhausts_universe = values.len() == self.types.len();
            return Resolved {
                values,
                exhausts_universe,
            };
        }
        // A literal is already concrete. It never exhausts the universe,
        // even for a one-type herd file, so it is never collapsed into the
        // empty-string shorthand.
        Resolved {
            values: vec![raw.to_string()],
            exhausts_universe: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::herds::ProductionTypes;

    fn resolver_over(names: &[&str]) -> ProductionTypes {
        ProductionTypes::from_names(names.iter().copied())
    }

    #[test]
    fn test_empty_value_is_whole_universe() {
        let types = resolver_over(&["Beef cattle", "Dairy cattle"]);
        let mut resolver = Resolver::new(&types);
        let resolved = resolver.resolve("");
        assert_eq!(resolved.values, ["Beef cattle", "Dairy cattle"]);
        assert!(resolved.exhausts_universe);
    }

    #[test]
    fn test_pattern_resolves_in_universe_order() {
        let types = resolver_over(&["Beef cattle", "Dairy cattle", "Dairy goats"]);
        let mut resolver = Resolver::new(&types);
        let resolved = resolver.resolve("$dairy");
        assert_eq!(resolved.values, ["Dairy cattle", "Dairy goats"]);
        assert!(!resolved.exhausts_universe);
    }

    #[test]
    fn test_pattern_matching_everything_exhausts() {
        let types = resolver_over(&["Beef cattle", "Dairy cattle"]);
        let mut resolver = Resolver::new(&types);
        let resolved = resolver.resolve("$cattle");
        assert_eq!(resolved.values.len(), 2);
        assert!(resolved.exhausts_universe);
    }

    #[test]
    fn test_pattern_matching_nothing() {
        let types = resolver_over(&["Beef cattle"]);
        let mut resolver = Resolver::new(&types);
        let resolved = resolver.resolve("$llama");
        assert!(resolved.values.is_empty());
        assert!(!resolved.exhausts_universe);
    }

    #[test]
    fn test_literal_is_single_value() {
        let types = resolver_over(&["Beef cattle", "Dairy cattle"]);
        let mut resolver = Resolver::new(&types);
        let resolved = resolver.resolve("Beef cattle");
        assert_eq!(resolved.values, ["Beef cattle"]);
        assert!(!resolved.exhausts_universe);
    }

    #[test]
    fn test_literal_never_exhausts_one_type_universe() {
        let types = resolver_over(&["Swine"]);
        let mut resolver = Resolver::new(&types);
        let resolved = resolver.resolve("Swine");
        assert!(!resolved.exhausts_universe);
    }

    #[test]
    fn test_empty_value_on_empty_universe() {
        let types = resolver_over(&[]);
        let mut resolver = Resolver::new(&types);
        let resolved = resolver.resolve("");
        assert!(resolved.values.is_empty());
        assert!(resolved.exhausts_universe);
    }
}
