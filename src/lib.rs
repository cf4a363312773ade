//! Core library surface for the CIU Stats data-entry application.
//!
//! The public modules exposed here provide an intentionally small API so both
//! `bin` targets (the interactive TUI and the seeding utility) can reuse the
//! same persistence and domain pieces.
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer. These functions are
/// typically used by the binaries to initialize the embedded SQLite store and
/// load the initial rows.
pub use db::{ensure_schema, fetch_records};

/// The one domain type every layer manipulates.
pub use models::CaseRecord;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
