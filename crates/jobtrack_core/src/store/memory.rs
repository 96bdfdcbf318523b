//! In-process key-value store.
//!
//! Keeps insertion order for enumeration. Writes, or all access, can be
//! switched off to exercise failure paths without a database.

use crate::store::{RecordStore, StoreError, StoreResult};

/// Ephemeral record store held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecordStore {
    entries: Vec<(String, String)>,
    read_only: bool,
    offline: bool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects subsequent `set_item`/`remove_item` calls when `true`.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Rejects every call, reads included, when `true`.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }

    fn ensure_writable(&self) -> StoreResult<()> {
        self.ensure_online()?;
        if self.read_only {
            return Err(StoreError::Unavailable("store is read-only".to_string()));
        }
        Ok(())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(existing, _)| existing == key)
    }
}

impl RecordStore for MemoryRecordStore {
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.ensure_writable()?;
        match self.position(key) {
            Some(index) => self.entries[index].1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_online()?;
        Ok(self.position(key).map(|index| self.entries[index].1.clone()))
    }

    fn get_all_keys(&self) -> StoreResult<Vec<String>> {
        self.ensure_online()?;
        Ok(self.entries.iter().map(|(key, _)| key.clone()).collect())
    }

    fn multi_get(&self, keys: &[String]) -> StoreResult<Vec<(String, Option<String>)>> {
        keys.iter()
            .map(|key| Ok((key.clone(), self.get_item(key)?)))
            .collect()
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.ensure_writable()?;
        self.entries.retain(|(existing, _)| existing != key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryRecordStore;
    use crate::store::{RecordStore, StoreError};

    #[test]
    fn enumerates_in_insertion_order() {
        let mut store = MemoryRecordStore::new();
        store.set_item("b", "2").unwrap();
        store.set_item("a", "1").unwrap();
        store.set_item("b", "22").unwrap();

        assert_eq!(store.get_all_keys().unwrap(), vec!["b", "a"]);
        assert_eq!(store.get_item("b").unwrap().as_deref(), Some("22"));
    }

    #[test]
    fn read_only_rejects_writes_but_allows_reads() {
        let mut store = MemoryRecordStore::new();
        store.set_item("a", "1").unwrap();
        store.set_read_only(true);

        assert!(matches!(
            store.set_item("b", "2"),
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.remove_item("a").is_err());
        assert_eq!(store.len(), 1);
        assert!(store.contains_key("a").unwrap());
    }

    #[test]
    fn offline_rejects_reads() {
        let mut store = MemoryRecordStore::new();
        store.set_item("a", "1").unwrap();
        store.set_offline(true);

        assert!(store.get_all_keys().is_err());
        assert!(store.get_item("a").is_err());
        assert!(store.set_item("b", "2").is_err());

        store.set_offline(false);
        assert_eq!(store.get_all_keys().unwrap(), vec!["a"]);
    }
}
