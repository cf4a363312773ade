//! Binary entry point that glues the SQLite-backed case records to the TUI:
//! bring up the database, hydrate the initial rows, and drive the Ratatui
//! event loop until the user exits.
use ciu_stats::{ensure_schema, fetch_records, run_app, App};

/// Initialize persistence, load the persisted rows, and launch the Ratatui
/// event loop.
///
/// Returning a `Result` bubbles fatal initialization problems (an unopenable
/// database, a broken terminal) up to the shell instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let conn = ensure_schema()?;
    let records = fetch_records(&conn)?;

    let mut app = App::new(conn, records);
    run_app(&mut app)
}
