//! Natural-language names are the de facto primary keys of the cache, so
//! they are normalized before every lookup and insert: whitespace trimmed
//! and inner runs collapsed to a single space. Case folding is handled at
//! the storage layer (`COLLATE NOCASE` unique columns), keeping the
//! display casing the model produced.

/// Normalize a name for use as a cache key.
pub fn normalize(name: &str) -> String {
  name.split_whitespace().collect::<Vec<_>>().join(" ")
}
