//! SQLite-backed key-value store over the `kv_entries` table.
//!
//! # Invariants
//! - Connection must come from `db::open_db*` so the schema exists.
//! - Keys enumerate in first-insertion order (`rowid`), like the memory store.

use crate::store::{RecordStore, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Record store backed by a migrated SQLite connection.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn get_all_keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY rowid ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn multi_get(&self, keys: &[String]) -> StoreResult<Vec<(String, Option<String>)>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT value FROM kv_entries WHERE key = ?1;")?;
        let mut pairs = Vec::with_capacity(keys.len());
        for key in keys {
            let value = stmt
                .query_row([key.as_str()], |row| row.get::<_, String>(0))
                .optional()?;
            pairs.push((key.clone(), value));
        }
        Ok(pairs)
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteRecordStore;
    use crate::db::open_db_in_memory;
    use crate::store::RecordStore;

    #[test]
    fn set_item_replaces_existing_value() {
        let conn = open_db_in_memory().unwrap();
        let mut store = SqliteRecordStore::new(&conn);

        store.set_item("k", "one").unwrap();
        store.set_item("k", "two").unwrap();

        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.get_all_keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn multi_get_preserves_order_and_reports_missing() {
        let conn = open_db_in_memory().unwrap();
        let mut store = SqliteRecordStore::new(&conn);
        store.set_item("a", "1").unwrap();
        store.set_item("c", "3").unwrap();

        let keys = vec!["c".to_string(), "b".to_string(), "a".to_string()];
        let pairs = store.multi_get(&keys).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("c".to_string(), Some("3".to_string())),
                ("b".to_string(), None),
                ("a".to_string(), Some("1".to_string())),
            ]
        );
    }

    #[test]
    fn remove_missing_key_is_noop() {
        let conn = open_db_in_memory().unwrap();
        let mut store = SqliteRecordStore::new(&conn);
        store.remove_item("ghost").unwrap();
        assert!(!store.contains_key("ghost").unwrap());
    }
}
