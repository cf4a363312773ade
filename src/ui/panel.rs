//! The command panel's four actions. Each one takes the storage handle
//! explicitly so the whole mutation path can be exercised in tests without a
//! terminal.

use anyhow::Result;
use rusqlite::Connection;

use crate::db::{delete_records, insert_record};
use crate::models::CaseRecord;

use super::form::{EntryForm, Field};
use super::table::TableView;

/// Button labels and their key chords, in display order.
pub(crate) const BUTTONS: [(&str, &str); 4] = [
    ("ADD", "Ctrl+A"),
    ("DELETE", "Ctrl+D"),
    ("EXPORT", "Ctrl+E"),
    ("PRINT", "Ctrl+P"),
];

/// Persist the form's current values as one new case record, reload the
/// table, and clear the form while preserving the detective. On failure
/// (typically a duplicate CRN) nothing is reloaded or cleared, so the user
/// can correct the entry in place.
pub(crate) fn add_record(
    conn: &Connection,
    form: &mut EntryForm,
    table: &mut TableView,
) -> Result<CaseRecord> {
    let record = form.read_all();
    insert_record(conn, &record)?;
    table.reload(conn)?;
    form.clear(&[Field::Detective]);
    Ok(record)
}

/// Delete every row the table currently has selected and reload. An empty
/// selection deletes nothing and reports zero; it is not an error.
pub(crate) fn delete_selected(conn: &Connection, table: &mut TableView) -> Result<usize> {
    let ids = table.selected_ids();
    if ids.is_empty() {
        return Ok(0);
    }
    let deleted = delete_records(conn, &ids)?;
    table.reload(conn)?;
    Ok(deleted)
}

/// Export has no defined behavior yet; the button exists and does nothing.
pub(crate) fn export_report() {}

/// Print has no defined behavior yet; the button exists and does nothing.
pub(crate) fn print_report() {}
