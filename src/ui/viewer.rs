use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
    TableState, Wrap,
};
use ratatui::Frame;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::db::{headers, CustomerStore};

use super::terminal::Screen;

const WINDOW_TITLE: &str = "Customer Database Viewer";
/// Default width of every column, in terminal cells.
const COLUMN_WIDTH: u16 = 20;
const PAGE_SIZE: isize = 10;
const FOOTER_HEIGHT: u16 = 3;

/// Snapshot of the `customers` table taken when the viewer starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

enum ViewerState {
    Loaded(CustomerTable),
    Failed(String),
}

/// Read-only screen listing every stored record.
pub struct ViewerApp {
    state: ViewerState,
    table_state: TableState,
    column_offset: usize,
}

impl ViewerApp {
    pub fn load(ctx: &AppContext) -> Self {
        Self::from_store(&ctx.store)
    }

    /// Read the whole table once. Failures are kept and drawn in place of the
    /// table rather than returned.
    pub fn from_store(store: &CustomerStore) -> Self {
        let state = match store.load_all() {
            Ok(customers) => {
                info!(rows = customers.len(), "customer table loaded");
                ViewerState::Loaded(CustomerTable {
                    headers: headers(),
                    rows: customers.iter().map(|customer| customer.cells()).collect(),
                })
            }
            Err(err) => {
                warn!(error = %err, path = %store.path().display(), "failed to load customers");
                ViewerState::Failed(format!("Database Error: {err}"))
            }
        };

        let mut table_state = TableState::default();
        if matches!(&state, ViewerState::Loaded(table) if !table.rows.is_empty()) {
            table_state.select(Some(0));
        }

        Self {
            state,
            table_state,
            column_offset: 0,
        }
    }

    pub fn table(&self) -> Option<&CustomerTable> {
        match &self.state {
            ViewerState::Loaded(table) => Some(table),
            ViewerState::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewerState::Failed(message) => Some(message),
            ViewerState::Loaded(_) => None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    fn row_count(&self) -> usize {
        self.table().map_or(0, |table| table.rows.len())
    }

    fn column_count(&self) -> usize {
        self.table().map_or(0, |table| table.headers.len())
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.row_count() as isize;
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let new = (current + offset).clamp(0, len - 1);
        self.table_state.select(Some(new as usize));
    }

    fn scroll_columns(&mut self, offset: isize) {
        let len = self.column_count() as isize;
        if len == 0 {
            return;
        }
        self.column_offset = (self.column_offset as isize + offset).clamp(0, len - 1) as usize;
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect) {
        let ViewerState::Loaded(table) = &self.state else {
            return;
        };

        let block = Block::default().title(WINDOW_TITLE).borders(Borders::ALL);
        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let header = Row::new(
            table.headers[self.column_offset..]
                .iter()
                .map(|title| Cell::from(title.clone())),
        )
        .style(header_style);
        let rows = table.rows.iter().map(|row| {
            Row::new(
                row[self.column_offset..]
                    .iter()
                    .map(|value| Cell::from(value.clone())),
            )
        });
        let widths = vec![Constraint::Length(COLUMN_WIDTH); table.headers.len() - self.column_offset];

        let widget = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(widget, area, &mut self.table_state);

        let mut vertical = ScrollbarState::new(table.rows.len())
            .position(self.table_state.selected().unwrap_or(0));
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut vertical,
        );

        let mut horizontal =
            ScrollbarState::new(table.headers.len()).position(self.column_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::HorizontalBottom).thumb_symbol("▬"),
            area.inner(Margin {
                vertical: 0,
                horizontal: 1,
            }),
            &mut horizontal,
        );
    }

    fn draw_error(&self, frame: &mut Frame, area: Rect, message: &str) {
        let block = Block::default().title(WINDOW_TITLE).borders(Borders::ALL);
        let paragraph = Paragraph::new(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        ))
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut spans = Vec::new();
        if let Some(table) = self.table() {
            let noun = if table.rows.len() == 1 { "record" } else { "records" };
            spans.push(Span::raw(format!("{} {noun}   ", table.rows.len())));
            spans.push(Span::styled("[↑↓]", key_style));
            spans.push(Span::raw(" Rows   "));
            spans.push(Span::styled("[←→]", key_style));
            spans.push(Span::raw(" Columns   "));
        }
        spans.push(Span::styled("[q]", key_style));
        spans.push(Span::raw(" Quit"));

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

impl Screen for ViewerApp {
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

        if let ViewerState::Failed(message) = &self.state {
            self.draw_error(frame, content_area, message);
        } else {
            self.draw_table(frame, content_area);
        }
        if let Some(footer_area) = footer_area {
            self.draw_footer(frame, footer_area);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_SIZE),
            KeyCode::PageDown => self.move_selection(PAGE_SIZE),
            KeyCode::Home => self.move_selection(isize::MIN / 2),
            KeyCode::End => self.move_selection(isize::MAX / 2),
            KeyCode::Left => self.scroll_columns(-1),
            KeyCode::Right => self.scroll_columns(1),
            _ => {}
        }
        Ok(false)
    }
}
