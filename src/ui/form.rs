use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::CaseRecord;

/// Upper bound on the two counter fields, enforced at the keystroke level
/// like a spinbox widget. Storage never checks this.
const COUNTER_MAX: i64 = 100;

/// The eight entry fields, in tab order. The order matches `CaseRecord` and
/// the stats table schema exactly.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Field {
    Crn,
    ReportDate,
    DateFiled,
    Description,
    InCustody,
    Charges,
    Warrants,
    Detective,
}

impl Default for Field {
    fn default() -> Self {
        Field::Crn
    }
}

impl Field {
    /// Tab order for focus cycling, wrapping at both ends.
    pub(crate) const TAB_ORDER: [Field; 8] = [
        Field::Crn,
        Field::ReportDate,
        Field::DateFiled,
        Field::Description,
        Field::InCustody,
        Field::Charges,
        Field::Warrants,
        Field::Detective,
    ];

    /// Label shown next to the field in the entry pane.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Field::Crn => "CRN",
            Field::ReportDate => "REPORT DATE",
            Field::DateFiled => "DATE FILED",
            Field::Description => "INCIDENT DESCRIPTION",
            Field::InCustody => "IN CUSTODY",
            Field::Charges => "CHARGES",
            Field::Warrants => "SEARCH WARRANTS",
            Field::Detective => "DETECTIVE",
        }
    }

    fn is_counter(self) -> bool {
        matches!(self, Field::Charges | Field::Warrants)
    }
}

/// Holds the current unsaved record's field values. No validation happens
/// here: empty CRNs and malformed dates are accepted and forwarded downstream
/// unchanged. The only constrained inputs are the counter fields, which the
/// keystroke handlers bound to 0-100, and the custody flag, which is toggled
/// rather than typed.
#[derive(Default, Clone)]
pub(crate) struct EntryForm {
    crn: String,
    report_date: String,
    date_filed: String,
    description: String,
    custody: bool,
    charges: String,
    warrants: String,
    detective: String,
    active: Field,
}

impl EntryForm {
    /// Snapshot all eight fields in fixed column order. Text fields return
    /// raw content, custody collapses to `"X"` or `""`, and an empty counter
    /// display reads as zero.
    pub(crate) fn read_all(&self) -> CaseRecord {
        CaseRecord {
            crn: self.crn.clone(),
            report_date: self.report_date.clone(),
            date_filed: self.date_filed.clone(),
            description: self.description.clone(),
            in_custody: if self.custody {
                "X".to_string()
            } else {
                String::new()
            },
            charges: self.charges.trim().parse().unwrap_or(0),
            warrants: self.warrants.trim().parse().unwrap_or(0),
            detective: self.detective.clone(),
        }
    }

    /// Reset every field to its empty/default state except the fields named
    /// in `preserve`. The add action preserves the detective so consecutive
    /// entries by the same investigator need no retyping.
    pub(crate) fn clear(&mut self, preserve: &[Field]) {
        for field in Field::TAB_ORDER {
            if preserve.contains(&field) {
                continue;
            }
            match field {
                Field::Crn => self.crn.clear(),
                Field::ReportDate => self.report_date.clear(),
                Field::DateFiled => self.date_filed.clear(),
                Field::Description => self.description.clear(),
                Field::InCustody => self.custody = false,
                Field::Charges => self.charges.clear(),
                Field::Warrants => self.warrants.clear(),
                Field::Detective => self.detective.clear(),
            }
        }
    }

    /// Currently focused field.
    pub(crate) fn active(&self) -> Field {
        self.active
    }

    /// Move focus directly to a particular field.
    pub(crate) fn focus(&mut self, field: Field) {
        self.active = field;
    }

    /// Advance focus to the next field in tab order, wrapping past the end.
    pub(crate) fn next_field(&mut self) {
        self.active = Self::neighbor(self.active, 1);
    }

    /// Move focus to the previous field in tab order, wrapping past the
    /// start.
    pub(crate) fn prev_field(&mut self) {
        self.active = Self::neighbor(self.active, Field::TAB_ORDER.len() - 1);
    }

    fn neighbor(field: Field, step: usize) -> Field {
        let idx = Field::TAB_ORDER
            .iter()
            .position(|candidate| *candidate == field)
            .unwrap_or(0);
        Field::TAB_ORDER[(idx + step) % Field::TAB_ORDER.len()]
    }

    /// Append a character to the active field. Counter fields accept only
    /// digits that keep the displayed value within bounds; the custody flag
    /// ignores typing entirely.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            Field::Crn => self.crn.push(ch),
            Field::ReportDate => self.report_date.push(ch),
            Field::DateFiled => self.date_filed.push(ch),
            Field::Description => self.description.push(ch),
            Field::InCustody => return false,
            Field::Charges => return push_counter_digit(&mut self.charges, ch),
            Field::Warrants => return push_counter_digit(&mut self.warrants, ch),
            Field::Detective => self.detective.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            Field::Crn => {
                self.crn.pop();
            }
            Field::ReportDate => {
                self.report_date.pop();
            }
            Field::DateFiled => {
                self.date_filed.pop();
            }
            Field::Description => {
                self.description.pop();
            }
            Field::InCustody => {}
            Field::Charges => {
                self.charges.pop();
            }
            Field::Warrants => {
                self.warrants.pop();
            }
            Field::Detective => {
                self.detective.pop();
            }
        }
    }

    /// Flip the custody flag. Only meaningful while the custody field has
    /// focus, but safe to call any time.
    pub(crate) fn toggle_custody(&mut self) {
        self.custody = !self.custody;
    }

    /// Step the focused counter field up or down, clamped to 0-100. Ignored
    /// when a non-counter field has focus.
    pub(crate) fn spin(&mut self, delta: i64) {
        let value = match self.active {
            Field::Charges => &mut self.charges,
            Field::Warrants => &mut self.warrants,
            _ => return,
        };
        let current: i64 = value.trim().parse().unwrap_or(0);
        let next = (current + delta).clamp(0, COUNTER_MAX);
        *value = next.to_string();
    }

    /// Raw display text of a field, as the user currently sees it.
    pub(crate) fn display_value(&self, field: Field) -> String {
        match field {
            Field::Crn => self.crn.clone(),
            Field::ReportDate => self.report_date.clone(),
            Field::DateFiled => self.date_filed.clone(),
            Field::Description => self.description.clone(),
            Field::InCustody => {
                if self.custody {
                    "[X]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            Field::Charges => self.charges.clone(),
            Field::Warrants => self.warrants.clone(),
            Field::Detective => self.detective.clone(),
        }
    }

    /// Render a styled line for one field of the entry pane. Focused fields
    /// show yellow, empty unfocused fields dim out.
    pub(crate) fn build_line(&self, field: Field, focused: bool) -> Line<'static> {
        let value = self.display_value(field);
        let is_active = focused && self.active == field;

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(value, style),
        ])
    }

    /// Character count of the active field's display text, used to position
    /// the cursor.
    pub(crate) fn value_len(&self) -> usize {
        self.display_value(self.active).chars().count()
    }
}

fn push_counter_digit(value: &mut String, ch: char) -> bool {
    if !ch.is_ascii_digit() {
        return false;
    }
    let candidate = format!("{value}{ch}");
    match candidate.parse::<i64>() {
        Ok(parsed) if parsed <= COUNTER_MAX => {
            *value = candidate;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> EntryForm {
        let mut form = EntryForm::default();
        form.focus(Field::Crn);
        for ch in "24-00001".chars() {
            form.push_char(ch);
        }
        form.focus(Field::ReportDate);
        for ch in "01/15/2024".chars() {
            form.push_char(ch);
        }
        form.focus(Field::Description);
        for ch in "BURGLARY".chars() {
            form.push_char(ch);
        }
        form.focus(Field::InCustody);
        form.toggle_custody();
        form.focus(Field::Charges);
        form.push_char('2');
        form.focus(Field::Detective);
        for ch in "HOLT".chars() {
            form.push_char(ch);
        }
        form
    }

    #[test]
    fn read_all_returns_fields_in_column_order() {
        let record = filled_form().read_all();
        assert_eq!(record.crn, "24-00001");
        assert_eq!(record.report_date, "01/15/2024");
        assert_eq!(record.date_filed, "");
        assert_eq!(record.description, "BURGLARY");
        assert_eq!(record.in_custody, "X");
        assert_eq!(record.charges, 2);
        assert_eq!(record.warrants, 0);
        assert_eq!(record.detective, "HOLT");
    }

    #[test]
    fn custody_reads_as_x_or_empty_only() {
        let mut form = EntryForm::default();
        assert_eq!(form.read_all().in_custody, "");
        form.toggle_custody();
        assert_eq!(form.read_all().in_custody, "X");
        form.toggle_custody();
        assert_eq!(form.read_all().in_custody, "");
    }

    #[test]
    fn clear_preserves_only_named_fields() {
        let mut form = filled_form();
        form.clear(&[Field::Detective]);

        let record = form.read_all();
        assert_eq!(record.crn, "");
        assert_eq!(record.report_date, "");
        assert_eq!(record.description, "");
        assert_eq!(record.in_custody, "");
        assert_eq!(record.charges, 0);
        assert_eq!(record.detective, "HOLT");
    }

    #[test]
    fn tab_order_wraps_both_directions() {
        let mut form = EntryForm::default();
        assert_eq!(form.active(), Field::Crn);
        for _ in 0..Field::TAB_ORDER.len() {
            form.next_field();
        }
        assert_eq!(form.active(), Field::Crn);
        form.prev_field();
        assert_eq!(form.active(), Field::Detective);
    }

    #[test]
    fn counter_fields_refuse_input_past_the_bound() {
        let mut form = EntryForm::default();
        form.focus(Field::Charges);
        assert!(form.push_char('9'));
        assert!(form.push_char('9'));
        assert!(!form.push_char('9'));
        assert_eq!(form.read_all().charges, 99);

        assert!(!form.push_char('a'));
    }

    #[test]
    fn spin_clamps_to_range() {
        let mut form = EntryForm::default();
        form.focus(Field::Warrants);
        form.spin(-1);
        assert_eq!(form.read_all().warrants, 0);
        for _ in 0..150 {
            form.spin(1);
        }
        assert_eq!(form.read_all().warrants, 100);
    }

    #[test]
    fn typing_into_custody_is_ignored() {
        let mut form = EntryForm::default();
        form.focus(Field::InCustody);
        assert!(!form.push_char('X'));
        assert_eq!(form.read_all().in_custody, "");
    }
}
