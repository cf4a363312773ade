//! Ratatui front-end: the entry form, the command panel, and the table view,
//! plus the event loop that binds them together. The three components only
//! talk to storage through the `db` module, so every mutation path stays
//! testable without a terminal.

mod app;
mod form;
mod helpers;
mod panel;
mod table;
mod terminal;

pub use app::App;
pub use terminal::run_app;
