use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::path::PathBuf;

use super::app::{App, InputMode};
use super::events::handle_key_event;
use super::ui;
use crate::controller::Dashboard;
use crate::generator::RecordGenerator;
use crate::stats::HeatmapMode;

pub fn run_dashboard(
    generator: RecordGenerator,
    heatmap: HeatmapMode,
    output_dir: PathBuf,
) -> Result<()> {
    // Build state before touching the terminal so setup failures print normally
    let dashboard = Dashboard::new(generator, heatmap);
    info!(
        "Dashboard ready with {} records (seed {})",
        dashboard.records().len(),
        dashboard.seed()
    );
    let mut app = App::new(dashboard, output_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, event::read);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Terminal is restored; loop errors go to the caller.
    res.context("Dashboard event loop failed")
}

/// Draw, then block on `next_event` and handle it, until the user quits.
fn run_app<B, F>(terminal: &mut Terminal<B>, app: &mut App, mut next_event: F) -> io::Result<()>
where
    B: Backend,
    F: FnMut() -> io::Result<Event>,
{
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Nothing changes between key presses, so block until the next one.
        if let Event::Key(key) = next_event()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char('q') if app.input_mode == InputMode::Normal && !app.has_popup() => {
                    return Ok(());
                }
                _ => handle_key_event(key, app),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    fn app() -> App {
        App::new(
            Dashboard::new(RecordGenerator::new(3), HeatmapMode::ClassAverage),
            PathBuf::from("."),
        )
    }

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(200, 60)).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_event_source_error_is_returned() {
        let mut terminal = terminal();
        let mut app = app();
        let res = run_app(&mut terminal, &mut app, || {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "input closed"))
        });
        let err = res.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_keys_are_handled_until_quit() {
        let mut terminal = terminal();
        let mut app = app();
        let mut events: VecDeque<Event> = vec![
            key(KeyCode::Down),
            key(KeyCode::Enter),
            // 'q' is ignored while the detail popup is open.
            key(KeyCode::Char('q')),
            key(KeyCode::Esc),
            key(KeyCode::Char('q')),
        ]
        .into();
        let res = run_app(&mut terminal, &mut app, || {
            events
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more events"))
        });

        assert!(res.is_ok());
        assert!(events.is_empty());
        assert_eq!(app.selected_row, 1);
        assert!(!app.has_popup());
    }
}
