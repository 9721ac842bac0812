//! Repository layer for note persistence.
//!
//! # Responsibility
//! - Keep SQL and transaction handling out of the async store and services.
//! - Track each transaction's lifecycle for diagnostics.

pub mod note_repo;
pub mod tx;
