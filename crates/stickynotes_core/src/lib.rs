//! Core of the sticky notes demo.
//! Persists short text notes with insert timestamps in a local SQLite store
//! and hands them back in timestamp order.

pub mod clock;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{EngineFailure, StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::direction::ScanDirection;
pub use model::note::{Note, NoteKey};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use service::note_board::{NoteBoard, NoteDisplay};
pub use store::NoteStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
