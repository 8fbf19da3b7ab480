use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, InputMode};

pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    if app.has_popup() {
        // Popups are modal: any of these keys dismisses, everything else is ignored.
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
            app.close_popup();
        }
        return;
    }

    match app.input_mode {
        InputMode::Search => handle_search_key(key, app),
        InputMode::Normal => handle_normal_key(key, app),
    }
}

fn handle_search_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.finish_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_search_char(c);
        }
        _ => {}
    }
}

fn handle_normal_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Tab => {
            app.focus_next();
        }
        KeyCode::BackTab => {
            app.focus_prev();
        }
        KeyCode::Right => {
            app.cycle_focused_filter(true);
        }
        KeyCode::Left => {
            app.cycle_focused_filter(false);
        }
        KeyCode::Char('/') => {
            app.start_search();
        }
        KeyCode::Up => {
            app.select_prev_row();
        }
        KeyCode::Down => {
            app.select_next_row();
        }
        KeyCode::Enter | KeyCode::Char('v') => {
            app.open_selected_detail();
        }
        KeyCode::Char('e') => {
            app.export();
        }
        KeyCode::Char('g') => {
            app.regenerate();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Dashboard;
    use crate::generator::RecordGenerator;
    use crate::stats::HeatmapMode;
    use std::path::PathBuf;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), app);
    }

    fn app() -> App {
        App::new(
            Dashboard::new(RecordGenerator::new(5), HeatmapMode::ClassAverage),
            PathBuf::from("."),
        )
    }

    #[test]
    fn test_search_mode_captures_letters() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('e'));
        // Typed into the search box rather than regenerating or exporting.
        assert_eq!(app.search_input, "ge");
        assert!(app.notice.is_none());
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.search_input, "g");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_popup_is_modal() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.dashboard.detail().is_some());

        press(&mut app, KeyCode::Tab);
        assert!(app.dashboard.detail().is_some());

        press(&mut app, KeyCode::Esc);
        assert!(app.dashboard.detail().is_none());
    }
}
