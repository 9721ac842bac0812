//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into UI-facing flows.
//! - Keep UI layers decoupled from storage details.

pub mod note_board;
