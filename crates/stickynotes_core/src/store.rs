//! Async note store handle.
//!
//! # Responsibility
//! - Own the single SQLite connection for the process or test.
//! - Expose `add`, `add_many` and `list_ordered` as futures resolving to a
//!   result, running the SQL on tokio's blocking pool.
//!
//! # Invariants
//! - Clones share one connection; the mutex plus engine transactions
//!   serialize conflicting work.
//! - A read awaited after a write's future resolved observes that write.
//! - There is no cancellation. Dropping a future does not abort a
//!   transaction already handed to the blocking pool.

use crate::clock::{Clock, SystemClock};
use crate::db::{ensure_notes_schema, open_db, open_db_in_memory};
use crate::error::{EngineFailure, StoreError, StoreResult};
use crate::model::direction::ScanDirection;
use crate::model::note::Note;
use crate::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Explicitly constructed handle to the notes store.
#[derive(Clone)]
pub struct NoteStore {
    conn: Arc<Mutex<Connection>>,
    clock: Arc<dyn Clock>,
}

impl NoteStore {
    /// Wraps an already bootstrapped connection.
    ///
    /// # Errors
    /// - `StoreError::Open` when the notes table or timestamp index is missing.
    pub fn new(conn: Connection) -> StoreResult<Self> {
        ensure_notes_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            clock: Arc::new(SystemClock),
        })
    }

    /// Opens (creating or upgrading as needed) a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::new(open_db(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::new(open_db_in_memory()?)
    }

    /// Replaces the timestamp source for subsequent inserts.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Inserts one note stamped with the current clock reading.
    ///
    /// # Errors
    /// - `StoreError::Write` when the transaction does not commit.
    pub async fn add(&self, text: impl Into<String>) -> StoreResult<Note> {
        let text = text.into();
        self.run(StoreError::Write, move |repo| repo.insert_note(&text))
            .await
    }

    /// Inserts every text in one transaction; all commit or none do.
    ///
    /// Each note gets the clock reading taken at its own insert, so
    /// timestamps inside one batch may differ.
    ///
    /// # Errors
    /// - `StoreError::Write` when any insert or the commit fails.
    pub async fn add_many<I, S>(&self, texts: I) -> StoreResult<Vec<Note>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        self.run(StoreError::Write, move |repo| repo.insert_notes(&texts))
            .await
    }

    /// Reads all notes ordered by timestamp.
    ///
    /// `Forward` is oldest first with equal timestamps in insertion order;
    /// `Reverse` is the exact reverse. The full list is collected before the
    /// future resolves.
    ///
    /// # Errors
    /// - `StoreError::Read` when the transaction or cursor fails.
    pub async fn list_ordered(&self, direction: ScanDirection) -> StoreResult<Vec<Note>> {
        self.run(StoreError::Read, move |repo| repo.list_notes(direction))
            .await
    }

    async fn run<T, F>(&self, fail: fn(EngineFailure) -> StoreError, work: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteNoteRepository<'_>) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let clock = Arc::clone(&self.clock);
        let joined = tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| fail(EngineFailure::internal("database mutex poisoned")))?;
            let mut repo = SqliteNoteRepository::attach(&mut guard, clock.as_ref());
            work(&mut repo)
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(err) => Err(fail(EngineFailure::internal(format!(
                "store task failed: {err}"
            )))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NoteStore;
    use crate::clock::ManualClock;
    use crate::model::direction::ScanDirection;
    use std::sync::Arc;

    #[tokio::test]
    async fn clones_share_one_database() {
        let store = NoteStore::open_in_memory().unwrap();
        let other = store.clone();

        store.add("from first handle").await.unwrap();
        let listed = other.list_ordered(ScanDirection::Forward).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].text, "from first handle");
    }

    #[tokio::test]
    async fn with_clock_controls_timestamps() {
        let clock = Arc::new(ManualClock::new(42));
        let store = NoteStore::open_in_memory()
            .unwrap()
            .with_clock(clock.clone());

        let note = store.add("pinned").await.unwrap();

        assert_eq!(note.timestamp, 42);
    }
}
