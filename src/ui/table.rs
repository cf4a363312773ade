use std::collections::HashSet;

use anyhow::Result;
use rusqlite::Connection;

use crate::db::fetch_records;
use crate::models::CaseRecord;

/// Read-through projection of the stats table. Holds no state of its own
/// beyond the cursor and the user's selection: every mutation elsewhere
/// triggers a full `reload`, which keeps the displayed rows trivially
/// consistent with storage.
pub(crate) struct TableView {
    records: Vec<CaseRecord>,
    cursor: usize,
    selected: HashSet<String>,
}

impl TableView {
    pub(crate) fn new(records: Vec<CaseRecord>) -> Self {
        Self {
            records,
            cursor: 0,
            selected: HashSet::new(),
        }
    }

    /// Discard all displayed rows and re-fetch everything from storage,
    /// sorted ascending by CRN. Selection entries whose CRN no longer exists
    /// are dropped and the cursor is clamped back into bounds.
    pub(crate) fn reload(&mut self, conn: &Connection) -> Result<()> {
        self.records = fetch_records(conn)?;
        let live: HashSet<&str> = self.records.iter().map(|r| r.crn.as_str()).collect();
        self.selected.retain(|crn| live.contains(crn.as_str()));
        self.ensure_in_bounds();
        Ok(())
    }

    /// CRNs of the rows currently marked selected. Empty when none are.
    pub(crate) fn selected_ids(&self) -> HashSet<String> {
        self.selected.clone()
    }

    /// Toggle selection of the row under the cursor.
    pub(crate) fn toggle_selected(&mut self) {
        if let Some(record) = self.records.get(self.cursor) {
            let crn = record.crn.clone();
            if !self.selected.remove(&crn) {
                self.selected.insert(crn);
            }
        }
    }

    pub(crate) fn is_selected(&self, crn: &str) -> bool {
        self.selected.contains(crn)
    }

    pub(crate) fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn move_cursor(&mut self, offset: isize) {
        if self.records.is_empty() {
            return;
        }
        let len = self.records.len() as isize;
        let mut new = self.cursor as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.cursor = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.records.is_empty() {
            self.cursor = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.records.is_empty() {
            self.cursor = self.records.len() - 1;
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.records.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.records.len() {
            self.cursor = self.records.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_record, open_in_memory};

    fn record(crn: &str) -> CaseRecord {
        CaseRecord {
            crn: crn.to_string(),
            report_date: String::new(),
            date_filed: String::new(),
            description: String::new(),
            in_custody: String::new(),
            charges: 0,
            warrants: 0,
            detective: String::new(),
        }
    }

    #[test]
    fn reload_orders_rows_by_crn_regardless_of_insertion_order() {
        let conn = open_in_memory().unwrap();
        for crn in ["24-00003", "24-00001", "24-00002"] {
            insert_record(&conn, &record(crn)).unwrap();
        }

        let mut table = TableView::new(Vec::new());
        table.reload(&conn).unwrap();

        let crns: Vec<&str> = table.records().iter().map(|r| r.crn.as_str()).collect();
        assert_eq!(crns, vec!["24-00001", "24-00002", "24-00003"]);
    }

    #[test]
    fn selection_toggles_and_reports_ids() {
        let conn = open_in_memory().unwrap();
        insert_record(&conn, &record("24-00001")).unwrap();
        insert_record(&conn, &record("24-00002")).unwrap();

        let mut table = TableView::new(Vec::new());
        table.reload(&conn).unwrap();
        assert!(table.selected_ids().is_empty());

        table.toggle_selected();
        assert!(table.is_selected("24-00001"));
        table.toggle_selected();
        assert!(table.selected_ids().is_empty());
    }

    #[test]
    fn reload_prunes_selections_for_vanished_rows_and_clamps_cursor() {
        let conn = open_in_memory().unwrap();
        insert_record(&conn, &record("24-00001")).unwrap();
        insert_record(&conn, &record("24-00002")).unwrap();

        let mut table = TableView::new(Vec::new());
        table.reload(&conn).unwrap();
        table.select_last();
        table.toggle_selected();
        assert!(table.is_selected("24-00002"));

        let targets: HashSet<String> = ["24-00002".to_string()].into_iter().collect();
        crate::db::delete_records(&conn, &targets).unwrap();
        table.reload(&conn).unwrap();

        assert!(table.selected_ids().is_empty());
        assert_eq!(table.cursor(), 0);
    }

    #[test]
    fn cursor_movement_stays_in_bounds() {
        let mut table = TableView::new(vec![record("0"), record("1"), record("2")]);
        table.move_cursor(-5);
        assert_eq!(table.cursor(), 0);
        table.move_cursor(10);
        assert_eq!(table.cursor(), 2);
        table.select_first();
        assert_eq!(table.cursor(), 0);
    }
}
