//! Domain model shared by the persistence and presentation layers. The single
//! entity stays a plain data holder so the database module can hydrate it from
//! rows and the TUI can render it without any conversion glue in between.

/// One tracked incident for the Criminal Investigations Unit. Fields appear in
/// the fixed column order used everywhere: the `stats` table schema, the entry
/// form's tab order, and the table view's columns all agree with this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    /// Case Record Number. Human-assigned, stored as text, and used as the
    /// sort key and the deletion key. Uniqueness is enforced by the schema.
    pub crn: String,
    /// Formatted date text. No format validation is performed anywhere.
    pub report_date: String,
    /// Formatted date text, same rules as `report_date`.
    pub date_filed: String,
    /// Free-text incident description.
    pub description: String,
    /// Custody flag. Exactly `"X"` when the subject is in custody, otherwise
    /// the empty string. No other value is ever written.
    pub in_custody: String,
    /// Charge count, 0-100. The bound lives in the entry widget, not here.
    pub charges: i64,
    /// Search warrant count, same bounds as `charges`.
    pub warrants: i64,
    /// Detective name. The entry form keeps this populated between
    /// consecutive adds as a convenience default.
    pub detective: String,
}

impl CaseRecord {
    /// Column headers in display order, matching the field order above.
    pub const HEADERS: [&'static str; 8] = [
        "CRN",
        "REPORT DATE",
        "DATE FILED",
        "INCIDENT DESCRIPTION",
        "IN CUSTODY",
        "CHARGES",
        "SEARCH WARRANTS",
        "DETECTIVE",
    ];

    /// Snapshot every field as display text, in fixed column order. The table
    /// view renders rows from this so it can never disagree with the schema
    /// about ordering.
    pub fn values(&self) -> [String; 8] {
        [
            self.crn.clone(),
            self.report_date.clone(),
            self.date_filed.clone(),
            self.description.clone(),
            self.in_custody.clone(),
            self.charges.to_string(),
            self.warrants.to_string(),
            self.detective.clone(),
        ]
    }
}
