//! Note board use-case service.
//!
//! # Responsibility
//! - Submit notes and refresh the displayed list once the write commits.
//! - Own the caller-controlled scan direction toggle.
//! - Hand each fresh ordered view to a `NoteDisplay` sink.
//!
//! # Invariants
//! - The display only ever receives a complete, ordered list.
//! - Every store failure is logged and returned; the display is left
//!   showing its previous view.
//! - The direction lives in memory only and is never persisted.

use crate::error::{StoreError, StoreResult};
use crate::model::direction::ScanDirection;
use crate::model::note::Note;
use crate::store::NoteStore;
use log::error;

/// Output sink for ordered note views.
///
/// Implementations render (and escape) text themselves; core never does.
pub trait NoteDisplay {
    fn display(&mut self, notes: &[Note]);
}

/// UI-facing facade over a `NoteStore` and a display sink.
pub struct NoteBoard<D: NoteDisplay> {
    store: NoteStore,
    direction: ScanDirection,
    display: D,
}

impl<D: NoteDisplay> NoteBoard<D> {
    /// Creates a board listing in `Forward` order.
    pub fn new(store: NoteStore, display: D) -> Self {
        Self {
            store,
            direction: ScanDirection::Forward,
            display,
        }
    }

    pub fn direction(&self) -> ScanDirection {
        self.direction
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Adds one note, then refreshes the view.
    ///
    /// # Errors
    /// - `StoreError::Write`: the note was not stored; retrying is safe.
    /// - `StoreError::Read`: the note was stored and only the refresh
    ///   failed. Retrying the submit would store a duplicate; call
    ///   [`NoteBoard::refresh`] instead.
    pub async fn submit(&mut self, text: impl Into<String>) -> StoreResult<Note> {
        let note = self
            .store
            .add(text)
            .await
            .inspect_err(|err| log_failure("note_submit", err))?;
        self.refresh().await?;
        Ok(note)
    }

    /// Adds a batch of notes in one transaction, then refreshes the view.
    ///
    /// # Errors
    /// - `StoreError::Write`: no note of the batch was stored.
    /// - `StoreError::Read`: the whole batch was stored and only the
    ///   refresh failed; call [`NoteBoard::refresh`] rather than resubmit.
    pub async fn submit_many<I, S>(&mut self, texts: I) -> StoreResult<Vec<Note>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let notes = self
            .store
            .add_many(texts)
            .await
            .inspect_err(|err| log_failure("note_submit_many", err))?;
        self.refresh().await?;
        Ok(notes)
    }

    /// Flips the scan direction and refreshes the view.
    ///
    /// The direction stays flipped even if the refresh fails.
    pub async fn flip_order(&mut self) -> StoreResult<ScanDirection> {
        self.direction = self.direction.flipped();
        self.refresh().await?;
        Ok(self.direction)
    }

    /// Reads all notes in the current direction and displays them.
    pub async fn refresh(&mut self) -> StoreResult<()> {
        let notes = self
            .store
            .list_ordered(self.direction)
            .await
            .inspect_err(|err| log_failure("note_refresh", err))?;
        self.display.display(&notes);
        Ok(())
    }
}

fn log_failure(event: &str, err: &StoreError) {
    error!(
        "event={} module=service status=error error_code={} engine_code={:?} error={}",
        event,
        err.kind(),
        err.code(),
        err
    );
}
