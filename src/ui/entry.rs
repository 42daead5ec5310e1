use std::mem;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::db::CustomerStore;

use super::forms::{CustomerField, CustomerForm, LABEL_WIDTH};
use super::helpers::centered_rect;
use super::terminal::Screen;

const WINDOW_TITLE: &str = "Customer Information Management";
const SUCCESS_MESSAGE: &str = "Customer information has been successfully submitted.";
/// Footer space reserved for key hints.
const FOOTER_HEIGHT: u16 = 3;
/// Rows above the first field inside the form block: heading and spacer.
const FIELDS_TOP: u16 = 2;

/// Severity of a notice, which picks its title and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    ValidationError,
    Success,
    DatabaseError,
}

impl NoticeKind {
    pub fn title(self) -> &'static str {
        match self {
            NoticeKind::ValidationError => "Validation Error",
            NoticeKind::Success => "Success",
            NoticeKind::DatabaseError => "Database Error",
        }
    }

    fn style(self) -> Style {
        match self {
            NoticeKind::Success => Style::default().fg(Color::Green),
            NoticeKind::ValidationError | NoticeKind::DatabaseError => {
                Style::default().fg(Color::Red)
            }
        }
    }
}

/// Modal message shown after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

enum Mode {
    Editing,
    Notice(Notice),
}

/// State of the entry screen: the form being edited plus any notice raised by
/// the last submission.
pub struct EntryApp {
    store: CustomerStore,
    form: CustomerForm,
    mode: Mode,
}

impl EntryApp {
    pub fn new(ctx: &AppContext) -> Self {
        Self::with_store(ctx.store.clone())
    }

    pub(crate) fn with_store(store: CustomerStore) -> Self {
        Self {
            store,
            form: CustomerForm::default(),
            mode: Mode::Editing,
        }
    }

    /// Notice currently covering the form, if any.
    pub fn notice(&self) -> Option<&Notice> {
        match &self.mode {
            Mode::Notice(notice) => Some(notice),
            Mode::Editing => None,
        }
    }

    /// Validate the form and write it. The write runs to completion before
    /// this returns; the outcome is left as a notice over the form.
    pub(crate) fn submit(&mut self) {
        let customer = match self.form.parse_inputs() {
            Ok(customer) => customer,
            Err(err) => {
                info!("submission rejected: {err}");
                self.show(NoticeKind::ValidationError, err.to_string());
                return;
            }
        };

        match self.store.append(&customer) {
            Ok(saved) => {
                self.form.clear();
                self.show(
                    NoticeKind::Success,
                    format!("{SUCCESS_MESSAGE} Record #{} saved.", saved.id),
                );
            }
            Err(err) => {
                warn!(error = %err, "failed to save customer");
                self.show(
                    NoticeKind::DatabaseError,
                    format!("An error occurred while submitting the data: {err}"),
                );
            }
        }
    }

    fn show<S: Into<String>>(&mut self, kind: NoticeKind, message: S) {
        self.mode = Mode::Notice(Notice {
            kind,
            message: message.into(),
        });
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_previous(),
            KeyCode::Left => {
                self.form.cycle_contact_method(false);
            }
            KeyCode::Right => {
                self.form.cycle_contact_method(true);
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(' ') if self.form.active == CustomerField::ContactMethod => {
                self.form.cycle_contact_method(true);
            }
            KeyCode::Char(ch) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.form.push_char(ch);
                }
            }
            _ => {}
        }
        false
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(WINDOW_TITLE)
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let mut lines = vec![
            Line::from(Span::styled(
                "Customer Information",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(CustomerField::ALL.iter().map(|field| self.form.build_line(*field)));
        lines.push(Line::from(""));

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);

        let submit_area = Rect {
            y: inner.y + FIELDS_TOP + CustomerField::ALL.len() as u16 + 1,
            height: 1,
            ..inner
        };
        if submit_area.bottom() <= inner.bottom() {
            let submit = Paragraph::new(Span::styled(
                "[ Submit ]",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Right);
            frame.render_widget(submit, submit_area);
        }

        if matches!(self.mode, Mode::Editing) && self.form.active != CustomerField::ContactMethod {
            let row = CustomerField::ALL
                .iter()
                .position(|field| *field == self.form.active)
                .unwrap_or_default() as u16;
            let cursor_x = inner.x + LABEL_WIDTH as u16 + self.form.value_len(self.form.active) as u16;
            let cursor_y = inner.y + FIELDS_TOP + row;
            if cursor_y < inner.bottom() && cursor_x < inner.right() {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::styled("[Tab]", key_style),
            Span::raw(" Next field   "),
            Span::styled("[←→]", key_style),
            Span::raw(" Contact method   "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Submit   "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Quit"),
        ]);
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), inner);
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect, notice: &Notice) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(notice.kind.title())
            .borders(Borders::ALL)
            .border_style(notice.kind.style());
        let lines = vec![
            Line::from(Span::styled(notice.message.clone(), notice.kind.style())),
            Line::from(""),
            Line::from(Span::styled(
                "Enter or Esc to continue",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

impl Screen for EntryApp {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        self.draw_form(frame, content_area);
        if let Some(footer_area) = footer_area {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::Notice(notice) = &self.mode {
            self.draw_notice(frame, area, notice);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        let mode = mem::replace(&mut self.mode, Mode::Editing);
        let exit = match mode {
            Mode::Editing => self.handle_editing_key(key),
            Mode::Notice(notice) => {
                if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.mode = Mode::Notice(notice);
                }
                false
            }
        };
        Ok(exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fetch_customers;
    use crate::models::ContactMethod;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use rusqlite::Connection;
    use tempfile::TempDir;

    fn app_with_schema() -> (TempDir, EntryApp) {
        let dir = tempfile::tempdir().unwrap();
        let store = CustomerStore::new(dir.path().join("customers.db"));
        store.ensure_schema().unwrap();
        (dir, EntryApp::with_store(store))
    }

    fn press(app: &mut EntryApp, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_text(app: &mut EntryApp, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn stored_rows(app: &EntryApp) -> Vec<crate::models::Customer> {
        app.store.load_all().unwrap()
    }

    fn screen_text(app: &mut EntryApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn empty_name_never_writes() {
        let (_dir, mut app) = app_with_schema();
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1990-01-01");
        press(&mut app, KeyCode::Enter);

        let notice = app.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::ValidationError);
        assert_eq!(notice.message, "Full Name is a required field.");
        assert!(stored_rows(&app).is_empty());
        assert_eq!(app.form.birthday, "1990-01-01");
    }

    #[test]
    fn successful_submit_appends_and_resets() {
        let (_dir, mut app) = app_with_schema();
        type_text(&mut app, "Ada Lovelace");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1815-12-10");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ada@example.com");
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);

        let notice = app.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(
            notice.message,
            "Customer information has been successfully submitted. Record #1 saved."
        );
        let rows = stored_rows(&app);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ada Lovelace");
        assert_eq!(rows[0].birthday, "1815-12-10");
        assert_eq!(rows[0].email, "ada@example.com");
        assert_eq!(rows[0].phone, "");
        assert_eq!(rows[0].address, "");
        assert_eq!(rows[0].contact_method, "Mail");

        for field in CustomerField::ALL {
            if field == CustomerField::ContactMethod {
                assert_eq!(app.form.value(field), "Email");
            } else {
                assert!(app.form.value(field).is_empty());
            }
        }
    }

    #[test]
    fn whitespace_name_is_saved_as_typed() {
        let (_dir, mut app) = app_with_schema();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.notice().unwrap().kind, NoticeKind::Success);
        let rows = stored_rows(&app);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, " ");
    }

    #[test]
    fn contact_method_defaults_to_email_when_untouched() {
        let (_dir, mut app) = app_with_schema();
        type_text(&mut app, "Grace Hopper");
        press(&mut app, KeyCode::Enter);

        assert_eq!(stored_rows(&app)[0].contact_method, ContactMethod::Email.as_str());
    }

    #[test]
    fn ids_follow_each_submission() {
        let (_dir, mut app) = app_with_schema();
        for name in ["First", "Second"] {
            type_text(&mut app, name);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
        }

        let ids: Vec<i64> = stored_rows(&app).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn storage_failure_keeps_entered_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-table.db");
        Connection::open(&path)
            .unwrap()
            .execute("CREATE TABLE other (x INTEGER)", [])
            .unwrap();
        let mut app = EntryApp::with_store(CustomerStore::new(&path));

        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1815-12-10");
        press(&mut app, KeyCode::Enter);

        let notice = app.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::DatabaseError);
        assert!(notice
            .message
            .starts_with("An error occurred while submitting the data:"));
        assert!(notice.message.contains("no such table"));
        assert_eq!(app.form.name, "Ada");
        assert_eq!(app.form.birthday, "1815-12-10");
    }

    #[test]
    fn notice_swallows_keys_until_dismissed() {
        let (_dir, mut app) = app_with_schema();
        press(&mut app, KeyCode::Enter);
        assert!(app.notice().is_some());

        press(&mut app, KeyCode::Char('x'));
        assert!(app.notice().is_some());
        assert!(app.form.name.is_empty());

        assert!(!press(&mut app, KeyCode::Esc));
        assert!(app.notice().is_none());
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn control_chords_do_not_type() {
        let (_dir, mut app) = app_with_schema();
        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.form.name.is_empty());
    }

    #[test]
    fn draw_shows_every_field_and_the_notice() {
        let (_dir, mut app) = app_with_schema();
        let text = screen_text(&mut app);
        for field in CustomerField::ALL {
            assert!(text.contains(field.label()), "missing {}", field.label());
        }
        assert!(text.contains("< Email >"));
        assert!(text.contains("[ Submit ]"));

        press(&mut app, KeyCode::Enter);
        let text = screen_text(&mut app);
        assert!(text.contains("Validation Error"));
    }

    #[test]
    fn rows_written_by_the_form_are_visible_to_plain_sql() {
        let (dir, mut app) = app_with_schema();
        type_text(&mut app, "Ada Lovelace");
        press(&mut app, KeyCode::Enter);

        let conn = Connection::open(dir.path().join("customers.db")).unwrap();
        let rows = fetch_customers(&conn).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
