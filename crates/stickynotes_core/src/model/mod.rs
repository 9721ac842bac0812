//! Domain model for sticky notes.
//!
//! # Responsibility
//! - Define the note record and the scan direction used by ordered reads.
//!
//! # Invariants
//! - Notes are immutable once committed; there is no update/delete model.

pub mod direction;
pub mod note;
