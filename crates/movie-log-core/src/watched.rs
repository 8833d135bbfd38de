use movie_log_models::{WatchedEntry, WatchedSummary};
use tracing::{debug, info, warn};
use crate::rating::{MAX_RATING, MIN_RATING};
use crate::store::{KeyValueStore, StoreError};
use crate::summary::summarize;

/// The user's watched titles, mirrored into a key-value store.
///
/// The list is the only owner of the entries. Every mutation rewrites the
/// whole list under `key` before returning; if that write fails the
/// in-memory list is rolled back so memory and store never disagree.
pub struct WatchedList<S: KeyValueStore> {
    store: S,
    key: String,
    entries: Vec<WatchedEntry>,
}

impl<S: KeyValueStore> WatchedList<S> {
    /// Read the list stored under `key`.
    ///
    /// An absent slot gives an empty list. Whenever stored data has to be
    /// dropped (an unreadable blob, or single rows that no longer decode) the
    /// raw content is first copied to `<key>.bak` so it can be recovered by
    /// hand. Ratings outside 1-10 are clamped. Only a failing store read is
    /// an error.
    pub fn load(store: S, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        let Some(raw) = store.load(&key)? else {
            debug!(key = %key, "No watched list stored yet");
            return Ok(Self { store, key, entries: Vec::new() });
        };

        let rows = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(key = %key, error = %e, "Stored watched list is corrupt; starting empty");
                backup(&store, &key, &raw);
                return Ok(Self { store, key, entries: Vec::new() });
            }
        };

        let total = rows.len();
        let mut entries: Vec<WatchedEntry> = Vec::with_capacity(total);
        for (index, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<WatchedEntry>(row) {
                Ok(entry) if entries.iter().any(|e| e.imdb_id == entry.imdb_id) => {
                    warn!(key = %key, index, imdb_id = %entry.imdb_id, "Skipping duplicate watched entry");
                }
                Ok(mut entry) => {
                    let clamped = entry.user_rating.clamp(MIN_RATING, MAX_RATING);
                    if clamped != entry.user_rating {
                        warn!(
                            imdb_id = %entry.imdb_id,
                            stored = entry.user_rating,
                            clamped,
                            "Stored rating out of range; clamped"
                        );
                        entry.user_rating = clamped;
                    }
                    entries.push(entry);
                }
                Err(e) => warn!(key = %key, index, error = %e, "Skipping unreadable watched entry"),
            }
        }

        if entries.len() < total {
            backup(&store, &key, &raw);
        }
        info!(key = %key, entries = entries.len(), skipped = total - entries.len(), "Loaded watched list");

        Ok(Self { store, key, entries })
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn get(&self, imdb_id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.imdb_id == imdb_id)
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.get(imdb_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> WatchedSummary {
        summarize(&self.entries)
    }

    /// Append `entry`, or, when its id is already listed, take over its user
    /// rating and decision count in place (position is kept).
    pub fn add(&mut self, entry: WatchedEntry) -> Result<&[WatchedEntry], StoreError> {
        if self.contains(&entry.imdb_id) {
            self.update_rating(&entry.imdb_id, entry.user_rating, entry.rating_decisions)?;
        } else {
            let imdb_id = entry.imdb_id.clone();
            self.mutate(|entries| {
                entries.push(entry);
                true
            })?;
            info!(imdb_id = %imdb_id, "Added to watched list");
        }
        Ok(&self.entries)
    }

    /// Change the rating of a listed title. Returns `false` if it is not listed.
    pub fn update_rating(&mut self, imdb_id: &str, user_rating: u8, rating_decisions: u32) -> Result<bool, StoreError> {
        let updated = self.mutate(|entries| match entries.iter_mut().find(|e| e.imdb_id == imdb_id) {
            Some(existing) => {
                existing.user_rating = user_rating;
                existing.rating_decisions = rating_decisions;
                true
            }
            None => false,
        })?;
        if updated {
            info!(imdb_id = %imdb_id, user_rating, "Updated watched rating");
        }
        Ok(updated)
    }

    /// Drop a title; unknown ids are a no-op.
    pub fn remove(&mut self, imdb_id: &str) -> Result<&[WatchedEntry], StoreError> {
        let removed = self.mutate(|entries| {
            let before = entries.len();
            entries.retain(|e| e.imdb_id != imdb_id);
            entries.len() != before
        })?;
        if removed {
            info!(imdb_id = %imdb_id, "Removed from watched list");
        } else {
            debug!(imdb_id = %imdb_id, "Remove ignored, title not in watched list");
        }
        Ok(&self.entries)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.mutate(|entries| {
            entries.clear();
            true
        })?;
        Ok(())
    }

    /// Apply `change`; when it reports a modification, persist or roll back.
    fn mutate<F>(&mut self, change: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut Vec<WatchedEntry>) -> bool,
    {
        let previous = self.entries.clone();
        if !change(&mut self.entries) {
            return Ok(false);
        }
        if let Err(e) = self.persist() {
            self.entries = previous;
            return Err(e);
        }
        Ok(true)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.save(&self.key, &json)
    }
}

/// Keep a copy of stored data that is about to be dropped
fn backup<S: KeyValueStore>(store: &S, key: &str, raw: &str) {
    let backup_key = format!("{}.bak", key);
    match store.save(&backup_key, raw) {
        Ok(()) => info!(key = %key, backup = %backup_key, "Backed up stored watched list"),
        Err(e) => warn!(key = %key, error = %e, "Could not back up stored watched list"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    const KEY: &str = "watched";

    fn entry(id: &str, user_rating: u8) -> WatchedEntry {
        WatchedEntry {
            imdb_id: id.to_string(),
            title: format!("Title {}", id),
            poster: None,
            imdb_rating: Some(7.5),
            runtime_minutes: 120,
            user_rating,
            rating_decisions: 1,
        }
    }

    fn stored(store: &MemoryStore) -> Vec<WatchedEntry> {
        serde_json::from_str(&store.load(KEY).unwrap().unwrap()).unwrap()
    }

    /// Store whose writes can be switched off
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: AtomicBool,
    }

    impl KeyValueStore for FlakyStore {
        fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.load(key)
        }

        fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Io {
                    path: key.into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            self.inner.save(key, value)
        }
    }

    #[test]
    fn test_load_absent_is_empty() {
        let list = WatchedList::load(MemoryStore::new(), KEY).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty_and_backed_up() {
        let store = Arc::new(MemoryStore::with_value(KEY, "{not json"));

        let list = WatchedList::load(store.clone(), KEY).unwrap();

        assert!(list.is_empty());
        assert_eq!(store.load("watched.bak").unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_load_keeps_readable_rows_of_mixed_blob() {
        let blob = r#"[
            {"imdbID":"tt1","Title":"One","Poster":"N/A","imdbRating":7.5,"runtime":120,"userRating":5,"countRatingDecisions":1},
            {"imdbID":"tt2","Title":"Two","Poster":"N/A","imdbRating":null,"runtime":null,"userRating":7,"countRatingDecisions":2},
            {"imdbID":"tt3","Title":"Three"}
        ]"#;
        let store = Arc::new(MemoryStore::with_value(KEY, blob));

        let list = WatchedList::load(store.clone(), KEY).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get("tt2").unwrap().runtime_minutes, 0);
        assert_eq!(list.get("tt2").unwrap().imdb_rating, None);
        assert!(!list.contains("tt3"));
        assert_eq!(store.load("watched.bak").unwrap().as_deref(), Some(blob));
    }

    #[test]
    fn test_load_clean_blob_writes_no_backup() {
        let store = Arc::new(MemoryStore::new());
        let mut list = WatchedList::load(store.clone(), KEY).unwrap();
        list.add(entry("a", 5)).unwrap();

        WatchedList::load(store.clone(), KEY).unwrap();

        assert_eq!(store.load("watched.bak").unwrap(), None);
    }

    #[test]
    fn test_load_clamps_out_of_range_ratings() {
        let blob = r#"[
            {"imdbID":"hi","Title":"High","runtime":90,"userRating":42},
            {"imdbID":"lo","Title":"Low","runtime":90,"userRating":0}
        ]"#;

        let list = WatchedList::load(MemoryStore::with_value(KEY, blob), KEY).unwrap();

        assert_eq!(list.get("hi").unwrap().user_rating, 10);
        assert_eq!(list.get("lo").unwrap().user_rating, 1);
    }

    #[test]
    fn test_add_appends_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut list = WatchedList::load(store.clone(), KEY).unwrap();

        list.add(entry("a", 5)).unwrap();
        let entries = list.add(entry("b", 7)).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(stored(&store), vec![entry("a", 5), entry("b", 7)]);
    }

    #[test]
    fn test_add_existing_replaces_in_place() {
        let store = Arc::new(MemoryStore::new());
        let mut list = WatchedList::load(store.clone(), KEY).unwrap();
        list.add(entry("a", 5)).unwrap();
        list.add(entry("b", 6)).unwrap();

        let mut again = entry("a", 8);
        again.rating_decisions = 3;
        let entries = list.add(again).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].imdb_id, "a");
        assert_eq!(entries[0].user_rating, 8);
        assert_eq!(entries[0].rating_decisions, 3);
        assert_eq!(stored(&store)[0].user_rating, 8);
    }

    #[test]
    fn test_update_rating_unknown_id() {
        let store = Arc::new(MemoryStore::new());
        let mut list = WatchedList::load(store.clone(), KEY).unwrap();

        assert!(!list.update_rating("nope", 4, 1).unwrap());
        assert!(store.load(KEY).unwrap().is_none());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let store = Arc::new(MemoryStore::new());
        let mut list = WatchedList::load(store.clone(), KEY).unwrap();
        list.add(entry("a", 5)).unwrap();

        let entries = list.remove("z").unwrap();

        assert_eq!(entries, [entry("a", 5)]);
        assert_eq!(stored(&store), vec![entry("a", 5)]);
    }

    #[test]
    fn test_remove_present() {
        let store = Arc::new(MemoryStore::new());
        let mut list = WatchedList::load(store.clone(), KEY).unwrap();
        list.add(entry("a", 5)).unwrap();
        list.add(entry("b", 6)).unwrap();

        list.remove("a").unwrap();

        assert_eq!(stored(&store), vec![entry("b", 6)]);
    }

    #[test]
    fn test_reload_preserves_order() {
        let store = Arc::new(MemoryStore::new());
        let mut list = WatchedList::load(store.clone(), KEY).unwrap();
        for (id, rating) in [("c", 3), ("a", 9), ("b", 6)] {
            list.add(entry(id, rating)).unwrap();
        }

        let reloaded = WatchedList::load(store, KEY).unwrap();
        assert_eq!(reloaded.entries(), list.entries());
    }

    #[test]
    fn test_clear() {
        let store = Arc::new(MemoryStore::new());
        let mut list = WatchedList::load(store.clone(), KEY).unwrap();
        list.add(entry("a", 5)).unwrap();

        list.clear().unwrap();

        assert!(list.is_empty());
        assert!(stored(&store).is_empty());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let store = Arc::new(FlakyStore::default());
        let mut list = WatchedList::load(store.clone(), KEY).unwrap();
        list.add(entry("a", 5)).unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        assert!(list.add(entry("b", 6)).is_err());
        assert!(list.update_rating("a", 9, 2).is_err());

        assert_eq!(list.entries(), [entry("a", 5)]);
    }
}
