//! Bulk helpers behind the `ciu-seed` maintenance utility. These live in the
//! library instead of the binary so the numbering rules stay testable without
//! spawning a process.

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::records::insert_record;
use crate::models::CaseRecord;

/// Remove every row from the stats table, returning how many were dropped.
pub fn clear_records(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM stats", [])
        .context("failed to clear stats table")
}

/// The CRN the next synthetic row should carry. Continues from the numeric
/// maximum of the stored CRNs plus one; an empty table or a table with no
/// integer CRNs falls back to 0. The maximum must be taken numerically, not
/// with SQL MAX on the text column, or "9" would outrank "10" and the next
/// insert would collide with an existing row.
pub fn next_crn(conn: &Connection) -> Result<i64> {
    let mut stmt = conn
        .prepare("SELECT crn FROM stats")
        .context("failed to prepare CRN query")?;

    let mut rows = stmt.query([]).context("failed to execute CRN query")?;

    let mut max: Option<i64> = None;
    while let Some(row) = rows.next().context("failed to fetch CRN row")? {
        let crn: String = row.get(0).context("failed to read CRN value")?;
        if let Ok(value) = crn.parse::<i64>() {
            max = Some(max.map_or(value, |current| current.max(value)));
        }
    }

    Ok(max.map(|value| value + 1).unwrap_or(0))
}

/// Append `rows` synthetic case records with deterministic values, returning
/// the CRNs that were inserted. CRN numbering continues from wherever
/// `next_crn` says the table left off.
pub fn seed_records(conn: &Connection, rows: u32) -> Result<Vec<String>> {
    let start = next_crn(conn)?;

    let mut added = Vec::with_capacity(rows as usize);
    for offset in 0..i64::from(rows) {
        let n = start + offset;
        let record = CaseRecord {
            crn: n.to_string(),
            report_date: "01/01/2024".to_string(),
            date_filed: "01/02/2024".to_string(),
            description: format!("TEST ROW {n}"),
            in_custody: if n % 2 == 0 {
                "X".to_string()
            } else {
                String::new()
            },
            charges: n % 10,
            warrants: n % 3,
            detective: "TEST".to_string(),
        };
        insert_record(conn, &record)?;
        added.push(record.crn);
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{fetch_records, open_in_memory};
    use crate::models::CaseRecord;
    use std::collections::HashSet;

    #[test]
    fn seeding_an_empty_table_numbers_from_zero() {
        let conn = open_in_memory().unwrap();
        let added = seed_records(&conn, 5).unwrap();
        assert_eq!(added, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn seeding_continues_from_the_current_maximum() {
        let conn = open_in_memory().unwrap();
        seed_records(&conn, 3).unwrap();
        let added = seed_records(&conn, 2).unwrap();
        assert_eq!(added, vec!["3", "4"]);
    }

    #[test]
    fn seeding_past_ten_rows_keeps_numeric_ordering() {
        let conn = open_in_memory().unwrap();
        let added = seed_records(&conn, 11).unwrap();
        assert_eq!(added.last().map(String::as_str), Some("10"));

        // Lexicographically "9" outranks "10"; numbering must not fall back
        // to it and collide with the existing rows.
        let added = seed_records(&conn, 2).unwrap();
        assert_eq!(added, vec!["11", "12"]);
    }

    #[test]
    fn unparsable_maximum_falls_back_to_zero() {
        let conn = open_in_memory().unwrap();
        let record = CaseRecord {
            crn: "24-00001".to_string(),
            report_date: String::new(),
            date_filed: String::new(),
            description: String::new(),
            in_custody: String::new(),
            charges: 0,
            warrants: 0,
            detective: String::new(),
        };
        crate::db::insert_record(&conn, &record).unwrap();

        assert_eq!(next_crn(&conn).unwrap(), 0);
    }

    #[test]
    fn seed_delete_clear_scenario() {
        let conn = open_in_memory().unwrap();

        seed_records(&conn, 3).unwrap();
        let crns: Vec<String> = fetch_records(&conn)
            .unwrap()
            .into_iter()
            .map(|r| r.crn)
            .collect();
        assert_eq!(crns, vec!["0", "1", "2"]);

        let targets: HashSet<String> = ["1".to_string()].into_iter().collect();
        crate::db::delete_records(&conn, &targets).unwrap();
        let crns: Vec<String> = fetch_records(&conn)
            .unwrap()
            .into_iter()
            .map(|r| r.crn)
            .collect();
        assert_eq!(crns, vec!["0", "2"]);

        assert_eq!(clear_records(&conn).unwrap(), 2);
        assert!(fetch_records(&conn).unwrap().is_empty());
    }
}
