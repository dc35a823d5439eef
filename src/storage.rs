use std::{collections::HashMap, path::Path};

use log::{info, warn};
use rusqlite::{Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

pub const USER_KEY: &str = "user";
pub const LANGUAGE_KEY: &str = "language";
pub const FONT_SIZE_KEY: &str = "fontSize";
pub const REDUCED_MOTION_KEY: &str = "reducedAnimations";

const TEMPLATE_STORAGE_UP_SQL: &str = "
CREATE TABLE IF NOT EXISTS local_storage (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);";

/// Durable key-value storage holding JSON text
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;

    /// Read and deserialize a value; unreadable values count as missing
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let text = match self.get_item(key) {
            Ok(text) => text?,
            Err(e) => {
                warn!("Failed to read `{}`: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring unreadable `{}`: {}", key, e);
                None
            }
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let text = serde_json::to_string(value)?;
        self.set_item(key, &text)
    }
}

/// Local storage backed by a SQLite file
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = if path.exists() {
            info!("Opening local storage: {}", path.display());
            Connection::open(path)?
        } else {
            info!("Creating local storage: {}", path.display());
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Connection::open(path)?
        };
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(TEMPLATE_STORAGE_UP_SQL)?;
        Ok(Self { conn })
    }
}

impl LocalStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?", [key])?;
        Ok(())
    }
}

/// Local storage that lives as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage(HashMap<String, String>);

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.0.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.0.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chirper.db");

        let mut storage = SqliteStorage::open(&path).unwrap();
        storage.save(LANGUAGE_KEY, &"Spanish").unwrap();
        storage.save(LANGUAGE_KEY, &"French").unwrap();
        storage.save(REDUCED_MOTION_KEY, &true).unwrap();
        drop(storage);

        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(storage.load::<String>(LANGUAGE_KEY).as_deref(), Some("French"));
        assert_eq!(storage.load::<bool>(REDUCED_MOTION_KEY), Some(true));
        assert_eq!(storage.load::<String>(FONT_SIZE_KEY), None);
    }

    #[test]
    fn remove_and_unreadable_values() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage.set_item(FONT_SIZE_KEY, "not json").unwrap();
        assert_eq!(storage.load::<String>(FONT_SIZE_KEY), None);

        storage.remove_item(FONT_SIZE_KEY).unwrap();
        assert_eq!(storage.get_item(FONT_SIZE_KEY).unwrap(), None);
    }
}
