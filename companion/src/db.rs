use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result};
use std::path::Path;

/// Key-value store used when no host platform is available.
pub struct DbConn {
    db: Connection,
}

impl DbConn {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(db: Connection) -> Result<Self> {
        db.execute(
            "CREATE TABLE IF NOT EXISTS kv_store
                (
                    key            TEXT PRIMARY KEY,
                    value          TEXT NOT NULL,
                    update_time    INTEGER NOT NULL
                );",
            (),
        )?;
        Ok(Self { db })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.db
            .query_row("SELECT value FROM kv_store WHERE key = ?1", (key,), |row| {
                row.get(0)
            })
            .optional()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let time = Local::now().timestamp_millis();
        self.db.execute(
            "INSERT INTO kv_store(key, value, update_time) VALUES (?1, ?2, ?3) \
                ON CONFLICT(key) DO UPDATE SET value = excluded.value, update_time = excluded.update_time",
            (key, value, time),
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.db
            .execute("DELETE FROM kv_store WHERE key = ?1", (key,))?;
        Ok(())
    }
}
