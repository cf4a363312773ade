use std::collections::HashSet;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Error as SqlError, ErrorCode};
use thiserror::Error;

use crate::models::CaseRecord;

/// Storage failures the UI is expected to surface rather than crash on. The
/// only constraint in the schema today is CRN uniqueness, but keeping this a
/// typed enum leaves room for future constraints.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("CRN {crn} already exists.")]
    DuplicateCrn { crn: String },
}

/// Retrieve every case record sorted ascending by CRN. CRN is a text column,
/// so the ordering is lexicographic: "24-00010" sorts before "24-00002". The
/// sort column is deliberately fixed rather than parameterized; CRN is the
/// only ordering any caller wants, and the query doubles as the single source
/// of truth for how rows are ordered in the table view.
pub fn fetch_records(conn: &Connection) -> Result<Vec<CaseRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT crn, report_date, date_filed, description,
                    in_custody, charges, warrants, detective
             FROM stats
             ORDER BY crn",
        )
        .context("failed to prepare case record query")?;

    let records = stmt
        .query_map([], |row| {
            Ok(CaseRecord {
                crn: row.get(0)?,
                report_date: row.get(1)?,
                date_filed: row.get(2)?,
                description: row.get(3)?,
                in_custody: row.get(4)?,
                charges: row.get(5)?,
                warrants: row.get(6)?,
                detective: row.get(7)?,
            })
        })
        .context("failed to load case records")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect case records")?;

    Ok(records)
}

/// Insert one case record. No field validation happens here or upstream; the
/// values arrive exactly as the entry form held them. A duplicate CRN maps to
/// `StorageError::DuplicateCrn` so the UI can show a readable message.
pub fn insert_record(conn: &Connection, record: &CaseRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO stats (crn, report_date, date_filed, description,
                            in_custody, charges, warrants, detective)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.crn,
            record.report_date,
            record.date_filed,
            record.description,
            record.in_custody,
            record.charges,
            record.warrants,
            record.detective,
        ],
    )
    .map_err(|err| map_unique_constraint(err, &record.crn))
    .context("failed to insert case record")?;

    Ok(())
}

/// Delete every record whose CRN appears in the given set, returning how many
/// rows went away. An empty set is a no-op, not an error, because the delete
/// action fires regardless of whether the user selected anything.
pub fn delete_records(conn: &Connection, crns: &HashSet<String>) -> Result<usize> {
    let mut deleted = 0;
    for crn in crns {
        deleted += conn
            .execute("DELETE FROM stats WHERE crn = ?1", params![crn])
            .context("failed to delete case record")?;
    }
    Ok(deleted)
}

/// Coerce SQLite constraint errors into the typed storage error. Anything
/// that is not a constraint violation passes through untouched.
fn map_unique_constraint(err: SqlError, crn: &str) -> anyhow::Error {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        StorageError::DuplicateCrn {
            crn: crn.to_string(),
        }
        .into()
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn sample(crn: &str) -> CaseRecord {
        CaseRecord {
            crn: crn.to_string(),
            report_date: "01/15/2024".to_string(),
            date_filed: "01/20/2024".to_string(),
            description: "BURGLARY".to_string(),
            in_custody: "X".to_string(),
            charges: 2,
            warrants: 1,
            detective: "HOLT".to_string(),
        }
    }

    #[test]
    fn insert_then_fetch_round_trips_every_field() {
        let conn = open_in_memory().unwrap();
        let record = sample("24-00001");
        insert_record(&conn, &record).unwrap();

        let rows = fetch_records(&conn).unwrap();
        assert_eq!(rows, vec![record]);
    }

    #[test]
    fn fetch_sorts_lexicographically_by_crn() {
        let conn = open_in_memory().unwrap();
        for crn in ["24-00003", "24-00001", "24-00002"] {
            insert_record(&conn, &sample(crn)).unwrap();
        }

        let crns: Vec<String> = fetch_records(&conn)
            .unwrap()
            .into_iter()
            .map(|r| r.crn)
            .collect();
        assert_eq!(crns, vec!["24-00001", "24-00002", "24-00003"]);
    }

    #[test]
    fn duplicate_crn_is_rejected_and_leaves_table_unchanged() {
        let conn = open_in_memory().unwrap();
        insert_record(&conn, &sample("24-00001")).unwrap();

        let mut dup = sample("24-00001");
        dup.description = "ROBBERY".to_string();
        let err = insert_record(&conn, &dup).unwrap_err();
        assert!(err.chain().any(|cause| cause
            .to_string()
            .contains("CRN 24-00001 already exists")));

        let rows = fetch_records(&conn).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "BURGLARY");
    }

    #[test]
    fn delete_removes_exactly_the_named_crns() {
        let conn = open_in_memory().unwrap();
        for crn in ["0", "1", "2"] {
            insert_record(&conn, &sample(crn)).unwrap();
        }

        let targets: HashSet<String> = ["1".to_string()].into_iter().collect();
        assert_eq!(delete_records(&conn, &targets).unwrap(), 1);

        let crns: Vec<String> = fetch_records(&conn)
            .unwrap()
            .into_iter()
            .map(|r| r.crn)
            .collect();
        assert_eq!(crns, vec!["0", "2"]);
    }

    #[test]
    fn delete_with_empty_set_is_a_no_op() {
        let conn = open_in_memory().unwrap();
        insert_record(&conn, &sample("24-00001")).unwrap();

        assert_eq!(delete_records(&conn, &HashSet::new()).unwrap(), 0);
        assert_eq!(fetch_records(&conn).unwrap().len(), 1);
    }

    #[test]
    fn custody_flag_round_trips_as_x_or_empty() {
        let conn = open_in_memory().unwrap();
        let mut held = sample("24-00001");
        held.in_custody = "X".to_string();
        let mut free = sample("24-00002");
        free.in_custody = String::new();
        insert_record(&conn, &held).unwrap();
        insert_record(&conn, &free).unwrap();

        let rows = fetch_records(&conn).unwrap();
        assert_eq!(rows[0].in_custody, "X");
        assert_eq!(rows[1].in_custody, "");
    }
}
