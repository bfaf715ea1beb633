use crate::internal::models::Hit;
use std::collections::HashMap;

/// Accumulated results for one query: every fetched page's hits in insertion
/// order, plus the last fetched page index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    pub hits: Vec<Hit>,
    pub page: u32,
}

/// Per-query results store, keyed by the submitted query string.
///
/// Entries grow monotonically: pages append to an existing entry's hits,
/// dismissals filter them, and nothing is ever evicted.
#[derive(Debug, Clone, Default)]
pub struct ResultsCache {
    entries: HashMap<String, QueryResult>,
}

impl ResultsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&QueryResult> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Merge one fetched page into the entry for `key`.
    ///
    /// Existing hits always precede the new page's hits; the base list is
    /// never reordered. `page` records the last fetched page index.
    pub fn merge_page(&mut self, key: &str, hits: Vec<Hit>, page: u32) {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.hits.extend(hits);
                entry.page = page;
            }
            None => {
                self.entries.insert(key.to_string(), QueryResult { hits, page });
            }
        }
    }

    /// Remove at most one hit with the given id from the entry for `key`.
    ///
    /// No-op when the key has no entry or the id is absent. The entry's
    /// `page` is left unchanged.
    pub fn dismiss(&mut self, key: &str, id: &str) {
        if let Some(entry) = self.entries.get_mut(key)
            && let Some(pos) = entry.hits.iter().position(|hit| hit.id == id)
        {
            entry.hits.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str) -> Hit {
        Hit {
            id: id.to_string(),
            title: format!("title {}", id),
            author: format!("author {}", id),
            ..Hit::default()
        }
    }

    #[test]
    fn test_merge_creates_entry_on_first_page() {
        let mut cache = ResultsCache::new();
        cache.merge_page("redux", vec![hit("1"), hit("2")], 0);

        let entry = cache.get("redux").unwrap();
        assert_eq!(entry.page, 0);
        assert_eq!(entry.hits.len(), 2);
    }

    #[test]
    fn test_merge_appends_next_page_in_order() {
        let mut cache = ResultsCache::new();
        cache.merge_page("redux", vec![hit("1"), hit("2")], 0);
        cache.merge_page("redux", vec![hit("3"), hit("4")], 1);

        let entry = cache.get("redux").unwrap();
        assert_eq!(entry.page, 1);
        let ids: Vec<&str> = entry.hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_merge_does_not_deduplicate() {
        let mut cache = ResultsCache::new();
        cache.merge_page("redux", vec![hit("1")], 0);
        cache.merge_page("redux", vec![hit("1")], 1);

        assert_eq!(cache.get("redux").unwrap().hits.len(), 2);
    }

    #[test]
    fn test_dismiss_removes_one_and_keeps_order() {
        let mut cache = ResultsCache::new();
        cache.merge_page("redux", vec![hit("1"), hit("2"), hit("3")], 0);
        cache.dismiss("redux", "2");

        let entry = cache.get("redux").unwrap();
        let ids: Vec<&str> = entry.hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(entry.page, 0);
    }

    #[test]
    fn test_dismiss_removes_at_most_one_duplicate() {
        let mut cache = ResultsCache::new();
        cache.merge_page("redux", vec![hit("1"), hit("1")], 0);
        cache.dismiss("redux", "1");

        assert_eq!(cache.get("redux").unwrap().hits.len(), 1);
    }

    #[test]
    fn test_dismiss_unknown_key_or_id_is_noop() {
        let mut cache = ResultsCache::new();
        cache.dismiss("missing", "1");

        cache.merge_page("redux", vec![hit("1")], 0);
        cache.dismiss("redux", "99");
        assert_eq!(cache.get("redux").unwrap().hits.len(), 1);
    }

    #[test]
    fn test_dismiss_isolates_cache_entries() {
        let mut cache = ResultsCache::new();
        cache.merge_page("redux", vec![hit("1"), hit("2")], 0);
        cache.merge_page("react", vec![hit("1"), hit("2")], 0);

        cache.dismiss("redux", "1");

        assert_eq!(cache.get("redux").unwrap().hits.len(), 1);
        assert_eq!(cache.get("react").unwrap().hits.len(), 2);
    }
}
