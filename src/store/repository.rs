use serde_json::Value;
use tracing::{debug, warn};

use super::{KeyValueStore, SESSION_LOG_KEY};
use crate::error::StoreError;
use crate::session::SessionRecord;
use crate::tracking::TableEntries;

/// Persistence used by the engine
pub trait Repository {
    /// Rows of a named table; absent or unreadable tables are empty
    fn load_table(&self, name: &str) -> TableEntries;

    fn save_table(&mut self, name: &str, entries: &TableEntries) -> Result<(), StoreError>;

    fn append_session(&mut self, record: &SessionRecord) -> Result<(), StoreError>;

    /// Every readable, valid session record, oldest first
    fn list_sessions(&self) -> Vec<SessionRecord>;
}

impl<R: Repository + ?Sized> Repository for &mut R {
    fn load_table(&self, name: &str) -> TableEntries {
        (**self).load_table(name)
    }

    fn save_table(&mut self, name: &str, entries: &TableEntries) -> Result<(), StoreError> {
        (**self).save_table(name, entries)
    }

    fn append_session(&mut self, record: &SessionRecord) -> Result<(), StoreError> {
        (**self).append_session(record)
    }

    fn list_sessions(&self) -> Vec<SessionRecord> {
        (**self).list_sessions()
    }
}

/// JSON tables and session log over a [`KeyValueStore`]
#[derive(Debug, Clone, Default)]
pub struct KeyValueRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KeyValueRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored value");
                None
            }
        }
    }

    /// Raw log entries. Absent reads as empty; a log that cannot be read
    /// or parsed is an error.
    fn read_log(&self) -> Result<Vec<Value>, StoreError> {
        let Some(text) = self.store.get(SESSION_LOG_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
            key: SESSION_LOG_KEY.to_string(),
            source,
        })
    }
}

impl<S: KeyValueStore> Repository for KeyValueRepository<S> {
    fn load_table(&self, name: &str) -> TableEntries {
        let Some(text) = self.read(name) else {
            return TableEntries::new();
        };
        match serde_json::from_str::<TableEntries>(&text) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(name, error = %e, "table unreadable, using empty table");
                TableEntries::new()
            }
        }
    }

    fn save_table(&mut self, name: &str, entries: &TableEntries) -> Result<(), StoreError> {
        let text = serde_json::to_string(entries)?;
        self.store.put(name, &text)
    }

    fn append_session(&mut self, record: &SessionRecord) -> Result<(), StoreError> {
        // Unreadable entries already in the log are carried along untouched
        let mut entries = self.read_log()?;
        entries.push(serde_json::to_value(record)?);
        let text = serde_json::to_string(&entries)?;
        self.store.put(SESSION_LOG_KEY, &text)
    }

    fn list_sessions(&self) -> Vec<SessionRecord> {
        let entries = match self.read_log() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "session log unreadable, listing nothing");
                Vec::new()
            }
        };
        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<SessionRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(error = %e, "skipping malformed session record");
                    None
                }
            })
            .filter(|record| record.configuration.validate().is_ok())
            .collect()
    }
}
