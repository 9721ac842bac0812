//! Note domain model.
//!
//! # Responsibility
//! - Define the only persisted entity: a short text with an insert time.
//!
//! # Invariants
//! - `text` is stored verbatim; escaping belongs to whoever renders it.
//! - `timestamp` is assigned by the store, never by callers.
//! - `key` is store-assigned and opaque; callers can compare it but cannot
//!   construct one.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned auto-increment identity of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteKey(i64);

impl NoteKey {
    pub(crate) fn from_row_id(row_id: i64) -> Self {
        Self(row_id)
    }
}

impl Display for NoteKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One committed sticky note.
///
/// Serializes as the persisted record shape `{text, timestamp}`; the key
/// lives outside the record payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(skip)]
    key: Option<NoteKey>,
    /// User-supplied text, possibly empty.
    pub text: String,
    /// Insert time in epoch milliseconds.
    pub timestamp: i64,
}

impl Note {
    pub(crate) fn committed(key: NoteKey, text: String, timestamp: i64) -> Self {
        Self {
            key: Some(key),
            text,
            timestamp,
        }
    }

    /// Returns the store key, or `None` for a note that did not come out of
    /// the store (for example one deserialized from a bare record).
    pub fn key(&self) -> Option<NoteKey> {
        self.key
    }
}
