use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::models::CaseRecord;

use super::form::{EntryForm, Field};
use super::helpers::{fit_column, surface_error};
use super::panel;
use super::table::TableView;

/// Rows reserved for the entry pane: eight fields plus the border.
const FORM_HEIGHT: u16 = 10;
/// Height of the command button bar.
const BUTTON_BAR_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Fixed display width per column, indexed like `CaseRecord::HEADERS`. Wide
/// enough for every header; long descriptions get clipped rather than
/// breaking the grid.
const COLUMN_WIDTHS: [usize; 8] = [10, 12, 12, 28, 10, 8, 15, 16];

/// The two keyboard focus zones. The form has focus on startup because this
/// is first and foremost a data-entry screen; Esc hops over to the table for
/// row selection.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Focus {
    Form,
    Table,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the storage handle
/// and lends it to the command panel per action, so nothing else ever holds a
/// connection.
pub struct App {
    conn: Connection,
    form: EntryForm,
    table: TableView,
    focus: Focus,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection, records: Vec<CaseRecord>) -> Self {
        Self {
            conn,
            form: EntryForm::default(),
            table: TableView::new(records),
            focus: Focus::Form,
            status: None,
        }
    }

    /// Fire the Add action: persist the form, reload the table, clear the
    /// form keeping the detective. Constraint failures land in the footer
    /// instead of tearing down the event loop.
    pub(crate) fn handle_ctrl_a(&mut self) -> Result<()> {
        match panel::add_record(&self.conn, &mut self.form, &mut self.table) {
            Ok(record) => {
                self.form.focus(Field::Crn);
                let message = if record.crn.is_empty() {
                    "Record added.".to_string()
                } else {
                    format!("Added CRN {}.", record.crn)
                };
                self.set_status(message, StatusKind::Info);
            }
            Err(err) => {
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
        Ok(())
    }

    /// Fire the Delete action against the table's current selection.
    pub(crate) fn handle_ctrl_d(&mut self) -> Result<()> {
        match panel::delete_selected(&self.conn, &mut self.table) {
            Ok(0) => self.set_status("No rows selected.", StatusKind::Info),
            Ok(deleted) => {
                let plural = if deleted == 1 { "" } else { "s" };
                self.set_status(format!("Deleted {deleted} record{plural}."), StatusKind::Info);
            }
            Err(err) => {
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
        Ok(())
    }

    /// Export is wired but intentionally has no behavior yet.
    pub(crate) fn handle_ctrl_e(&mut self) -> Result<()> {
        panel::export_report();
        Ok(())
    }

    /// Print is wired but intentionally has no behavior yet.
    pub(crate) fn handle_ctrl_p(&mut self) -> Result<()> {
        panel::print_report();
        Ok(())
    }

    /// Dispatch a non-chord keypress. Returns `true` when the app should
    /// exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match self.focus {
            Focus::Form => self.handle_form_key(code),
            Focus::Table => return self.handle_table_key(code),
        }
        Ok(false)
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.focus = Focus::Table;
            }
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Up => self.form.spin(1),
            KeyCode::Down => self.form.spin(-1),
            KeyCode::Enter => {
                if self.form.active() == Field::InCustody {
                    self.form.toggle_custody();
                } else {
                    self.form.next_field();
                }
            }
            KeyCode::Char(ch) => {
                if ch == ' ' && self.form.active() == Field::InCustody {
                    self.form.toggle_custody();
                } else {
                    self.form.push_char(ch);
                }
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                self.focus = Focus::Form;
            }
            KeyCode::Up => self.table.move_cursor(-1),
            KeyCode::Down => self.table.move_cursor(1),
            KeyCode::PageUp => self.table.move_cursor(-5),
            KeyCode::PageDown => self.table.move_cursor(5),
            KeyCode::Home => self.table.select_first(),
            KeyCode::End => self.table.select_last(),
            KeyCode::Char(' ') => self.table.toggle_selected(),
            _ => {}
        }
        Ok(false)
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FORM_HEIGHT),
                Constraint::Length(BUTTON_BAR_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        self.draw_form(frame, chunks[0]);
        self.draw_buttons(frame, chunks[1]);
        self.draw_table(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Form;
        let title = if focused {
            "Case Entry (focused)"
        } else {
            "Case Entry"
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);

        let lines: Vec<Line> = Field::TAB_ORDER
            .iter()
            .map(|field| self.form.build_line(*field, focused))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);

        // Park the terminal cursor at the end of the focused text field. The
        // custody flag is toggled, not typed, so it gets no cursor.
        if focused && self.form.active() != Field::InCustody {
            if let Some(row) = Field::TAB_ORDER
                .iter()
                .position(|field| *field == self.form.active())
            {
                let label = self.form.active().label();
                let cursor_x =
                    inner.x + label.len() as u16 + 2 + self.form.value_len() as u16;
                let cursor_y = inner.y + row as u16;
                if cursor_y < inner.y + inner.height {
                    frame.set_cursor_position((cursor_x, cursor_y));
                }
            }
        }
    }

    fn draw_buttons(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for (label, chord) in panel::BUTTONS {
            spans.push(Span::styled(format!("[{label}]"), key_style));
            spans.push(Span::raw(format!(" {chord}   ")));
        }

        let bar = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Commands").borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(bar, area);
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Table;
        let title = if focused {
            "Case Records (focused)"
        } else {
            "Case Records"
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return;
        }

        if self.table.is_empty() {
            let message = Paragraph::new("No case records yet.")
                .alignment(Alignment::Center);
            frame.render_widget(message, inner);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let header = Line::from(Span::styled(
            format!("    {}", header_row()),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let items: Vec<ListItem> = self
            .table
            .records()
            .iter()
            .map(|record| {
                let marker = if self.table.is_selected(&record.crn) {
                    "[x] "
                } else {
                    "[ ] "
                };
                let style = if self.table.is_selected(&record.crn) {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{marker}{}", record_row(record)),
                    style,
                )))
            })
            .collect();

        let highlight = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let mut state = ListState::default();
        state.select(Some(self.table.cursor()));
        let list = List::new(items).highlight_style(highlight);
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match self.focus {
            Focus::Form => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Ctrl+A]", key_style),
                Span::raw(" Add   "),
                Span::styled("[Ctrl+D]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Table   "),
                Span::styled("[Ctrl+C]", key_style),
                Span::raw(" Quit"),
            ]),
            Focus::Table => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Move   "),
                Span::styled("[Space]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Ctrl+D]", key_style),
                Span::raw(" Delete Selected   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Entry Form   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }
}

/// Fixed-width header text, columns aligned with `record_row`.
fn header_row() -> String {
    CaseRecord::HEADERS
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(header, width)| fit_column(header, width))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fixed-width row text for one record.
fn record_row(record: &CaseRecord) -> String {
    record
        .values()
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(value, width)| fit_column(value, width))
        .collect::<Vec<_>>()
        .join(" ")
}
