//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Run the three note transactions: insert one, insert many, ordered scan.
//! - Stamp each insert with the clock reading taken at that insert.
//! - Translate engine failures into `StoreError::Write` / `StoreError::Read`.
//!
//! # Invariants
//! - Every write runs in one `IMMEDIATE` transaction; a failed insert or
//!   commit rolls back the whole batch.
//! - Scans walk `notes_timestamp` ordered by `(timestamp, key)` in the
//!   requested direction and return only after the cursor is exhausted.
//! - Note text is never written to logs.

use crate::clock::{Clock, SystemClock};
use crate::db::ensure_notes_schema;
use crate::error::{EngineFailure, StoreError, StoreResult};
use crate::model::direction::ScanDirection;
use crate::model::note::{Note, NoteKey};
use crate::repo::tx::{TxMode, TxTracker};
use log::{error, info};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::time::Instant;

static SYSTEM_CLOCK: SystemClock = SystemClock;

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Inserts one note in its own write transaction.
    fn insert_note(&mut self, text: &str) -> StoreResult<Note>;
    /// Inserts all notes in one write transaction, in input order.
    fn insert_notes(&mut self, texts: &[String]) -> StoreResult<Vec<Note>>;
    /// Reads every note ordered by timestamp in `direction`.
    fn list_notes(&mut self, direction: ScanDirection) -> StoreResult<Vec<Note>>;
}

/// SQLite-backed note repository over a borrowed connection.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
    clock: &'conn dyn Clock,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository stamping notes with wall-clock time.
    ///
    /// # Errors
    /// - `StoreError::Open` when the notes table or timestamp index is missing.
    pub fn try_new(conn: &'conn mut Connection) -> StoreResult<Self> {
        Self::with_clock(conn, &SYSTEM_CLOCK)
    }

    /// Constructs a repository stamping notes from `clock`.
    pub fn with_clock(conn: &'conn mut Connection, clock: &'conn dyn Clock) -> StoreResult<Self> {
        ensure_notes_schema(conn)?;
        Ok(Self::attach(conn, clock))
    }

    /// Wraps a connection whose schema was already verified.
    pub(crate) fn attach(conn: &'conn mut Connection, clock: &'conn dyn Clock) -> Self {
        Self { conn, clock }
    }

    fn write(&mut self, op: &'static str, texts: &[&str]) -> StoreResult<Vec<Note>> {
        let started_at = Instant::now();
        let mut tracker = TxTracker::new(op, TxMode::ReadWrite);

        let outcome = match self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
        {
            Ok(tx) => {
                tracker.opened();
                insert_rows(&tx, self.clock, texts, &mut tracker)
                    .and_then(|notes| tx.commit().map(|()| notes))
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(notes) => {
                tracker.committed();
                info!(
                    "event={} module=repo status=ok count={} duration_ms={}",
                    op,
                    notes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(notes)
            }
            Err(err) => {
                tracker.aborted();
                let err = StoreError::write(&err);
                error!(
                    "event={} module=repo status=error count={} duration_ms={} error_code={} engine_code={:?} error={}",
                    op,
                    texts.len(),
                    started_at.elapsed().as_millis(),
                    err.kind(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&mut self, text: &str) -> StoreResult<Note> {
        let mut notes = self.write("note_add", &[text])?;
        notes.pop().ok_or_else(|| {
            StoreError::Write(EngineFailure::internal(
                "insert committed without producing a row",
            ))
        })
    }

    fn insert_notes(&mut self, texts: &[String]) -> StoreResult<Vec<Note>> {
        let borrowed: Vec<&str> = texts.iter().map(String::as_str).collect();
        self.write("note_add_many", &borrowed)
    }

    fn list_notes(&mut self, direction: ScanDirection) -> StoreResult<Vec<Note>> {
        let started_at = Instant::now();
        let mut tracker = TxTracker::new("note_list", TxMode::ReadOnly);

        let outcome = match self
            .conn
            .transaction_with_behavior(TransactionBehavior::Deferred)
        {
            Ok(tx) => {
                tracker.opened();
                scan_timestamp_index(&tx, direction, &mut tracker)
                    .and_then(|notes| tx.commit().map(|()| notes))
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(notes) => {
                tracker.committed();
                info!(
                    "event=note_list module=repo status=ok direction={} count={} duration_ms={}",
                    direction.as_log_value(),
                    notes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(notes)
            }
            Err(err) => {
                tracker.aborted();
                let err = StoreError::read(&err);
                error!(
                    "event=note_list module=repo status=error direction={} duration_ms={} error_code={} engine_code={:?} error={}",
                    direction.as_log_value(),
                    started_at.elapsed().as_millis(),
                    err.kind(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn insert_rows(
    tx: &Transaction<'_>,
    clock: &dyn Clock,
    texts: &[&str],
    tracker: &mut TxTracker,
) -> rusqlite::Result<Vec<Note>> {
    let mut stmt = tx.prepare("INSERT INTO notes (text, timestamp) VALUES (?1, ?2);")?;
    let mut notes = Vec::with_capacity(texts.len());
    for text in texts {
        tracker.request();
        let timestamp = clock.now_ms();
        stmt.execute(params![text, timestamp])?;
        notes.push(Note::committed(
            NoteKey::from_row_id(tx.last_insert_rowid()),
            (*text).to_string(),
            timestamp,
        ));
    }
    Ok(notes)
}

fn scan_timestamp_index(
    tx: &Transaction<'_>,
    direction: ScanDirection,
    tracker: &mut TxTracker,
) -> rusqlite::Result<Vec<Note>> {
    let order = direction.as_sql();
    let mut stmt = tx.prepare(&format!(
        "SELECT key, text, timestamp
         FROM notes INDEXED BY notes_timestamp
         ORDER BY timestamp {order}, key {order};"
    ))?;

    let mut rows = stmt.query([])?;
    let mut notes = Vec::new();
    loop {
        tracker.request();
        let Some(row) = rows.next()? else {
            break;
        };
        notes.push(Note::committed(
            NoteKey::from_row_id(row.get("key")?),
            row.get("text")?,
            row.get("timestamp")?,
        ));
    }
    Ok(notes)
}
