use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

/// A full-screen view the event loop can drive.
pub trait Screen {
    fn draw(&mut self, frame: &mut Frame);

    /// Handle one key press. Returning `true` ends the loop.
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool>;
}

/// Spin up the terminal backend, enter the draw loop, and keep processing input
/// until the screen asks to quit. The terminal is restored even when the loop
/// fails.
pub fn run_app<S: Screen>(screen: &mut S) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;

    let result = event_loop(&mut terminal, screen);

    cleanup_terminal(&mut terminal)?;
    result
}

fn event_loop<S: Screen>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    screen: &mut S,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| screen.draw(frame))
            .context("failed to draw frame")?;

        if event::poll(Duration::from_millis(250)).context("event polling failed")? {
            if let Event::Key(key_event) = event::read().context("failed to read event")? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if key_event.modifiers.contains(KeyModifiers::CONTROL)
                    && key_event.code == KeyCode::Char('c')
                {
                    return Ok(());
                }
                if screen.handle_key(key_event)? {
                    return Ok(());
                }
            }
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}
