//! Keyboard input dispatch: overlays first, then the map keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }

        // Selection
        KeyCode::Char('j') | KeyCode::Down => app.map.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.map.select_prev(),
        KeyCode::Home => app.map.cursor = 0,
        KeyCode::End => app.map.cursor = app.map.rows.len().saturating_sub(1),

        // Navigation
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.request_drill(),
        KeyCode::Backspace | KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('h')
        | KeyCode::Left => app.request_back(),
        KeyCode::Char('r') => app.request_reload(),

        // View
        KeyCode::Char('+') | KeyCode::Char('=') => app.map.viewport.zoom_in(),
        KeyCode::Char('-') => app.map.viewport.zoom_out(),
        KeyCode::Char('w') => app.map.viewport.pan(0.0, 1.0),
        KeyCode::Char('s') => app.map.viewport.pan(0.0, -1.0),
        KeyCode::Char('a') => app.map.viewport.pan(-1.0, 0.0),
        KeyCode::Char('d') => app.map.viewport.pan(1.0, 0.0),
        KeyCode::Char('0') => app.map.viewport.reset(),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
