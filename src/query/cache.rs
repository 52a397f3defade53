//! LRU cache of parsed queries.
//!
//! Parameter files repeat the same pattern across many elements, so the
//! parsed term groups are cached keyed by the raw pattern text.

use super::Query;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::rc::Rc;

const CACHE_CAPACITY: usize = 128;

pub struct QueryCache {
    cache: LruCache<String, Rc<Query>>,
}

impl QueryCache {
    pub fn new() -> Self {
        QueryCache {
            cache: LruCache::new(NonZeroUsize::new(CACHE_CAPACITY).unwrap()),
        }
    }

    /// Look up a parsed query for the pattern, parsing and inserting on miss.
    pub fn get_or_parse(&mut self, pattern: &str) -> Rc<Query> {
        if let Some(query) = self.cache.get(pattern) {
            return Rc::clone(query);
        }
        let query = Rc::new(Query::parse(pattern));
        self.cache.put(pattern.to_string(), Rc::clone(&query));
        query
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
