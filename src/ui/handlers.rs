use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{AppState, InputMode};

pub fn handle_key_event(app_state: &mut AppState, key: KeyEvent) {
    match app_state.input_mode {
        InputMode::Normal => handle_normal_mode(app_state, key.code),
        InputMode::Command => handle_command_mode(app_state, key.code),
        InputMode::Search => handle_search_mode(app_state, key),
        InputMode::Help => handle_help_mode(app_state, key.code),
        InputMode::Detail => handle_detail_mode(app_state, key.code),
    }
}

fn handle_command_mode(app_state: &mut AppState, key_code: KeyCode) {
    match key_code {
        KeyCode::Enter => app_state.execute_command(),
        KeyCode::Esc => app_state.cancel_input(),
        KeyCode::Backspace => app_state.delete_char_from_input(),
        KeyCode::Char(c) => app_state.add_char_to_input(c),
        _ => {}
    }
}

fn handle_normal_mode(app_state: &mut AppState, key_code: KeyCode) {
    if key_code != KeyCode::Char('g') {
        app_state.g_pressed = false;
    }

    match key_code {
        KeyCode::Char('h') | KeyCode::Left => app_state.move_cursor(0, -1),
        KeyCode::Char('j') | KeyCode::Down => app_state.move_cursor(1, 0),
        KeyCode::Char('k') | KeyCode::Up => app_state.move_cursor(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app_state.move_cursor(0, 1),
        KeyCode::Char('=') | KeyCode::Char('+') => app_state.adjust_info_panel_height(1),
        KeyCode::Char('-') => app_state.adjust_info_panel_height(-1),
        KeyCode::Char('[') => app_state.prev_tab(),
        KeyCode::Char(']') => app_state.next_tab(),
        KeyCode::Char('g') => {
            if app_state.g_pressed {
                app_state.jump_to_first_row();
                app_state.g_pressed = false;
            } else {
                app_state.g_pressed = true;
            }
        }
        KeyCode::Char('G') => app_state.jump_to_last_row(),
        KeyCode::Char('0') | KeyCode::Home => app_state.jump_to_first_column(),
        KeyCode::Char('$') | KeyCode::End => app_state.jump_to_last_column(),
        KeyCode::PageDown => app_state.page(true),
        KeyCode::PageUp => app_state.page(false),
        KeyCode::Char('s') => {
            if let Some(column) = app_state.selected_column() {
                app_state.sort_by(&column);
            }
        }
        KeyCode::Char('x') => {
            if let Some(column) = app_state.selected_column() {
                app_state.toggle_column(&column);
            }
        }
        KeyCode::Char('/') => app_state.start_search(),
        KeyCode::Char(':') => app_state.start_command_mode(),
        KeyCode::Char('?') | KeyCode::F(1) => app_state.show_help(),
        KeyCode::Enter => app_state.open_detail(),
        KeyCode::Char('q') => app_state.should_quit = true,
        _ => {}
    }
}

fn handle_search_mode(app_state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app_state.execute_search(),
        KeyCode::Esc => app_state.cancel_input(),
        _ => {
            app_state.text_area.input(key);
        }
    }
}

fn handle_help_mode(app_state: &mut AppState, key_code: KeyCode) {
    let line_count = app_state.help_text.lines().count();
    let max_scroll = line_count.saturating_sub(app_state.help_visible_lines);

    match key_code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => {
            app_state.input_mode = InputMode::Normal;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app_state.help_scroll = (app_state.help_scroll + 1).min(max_scroll);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app_state.help_scroll = app_state.help_scroll.saturating_sub(1);
        }
        KeyCode::Home => app_state.help_scroll = 0,
        KeyCode::End => app_state.help_scroll = max_scroll,
        _ => {}
    }
}

fn handle_detail_mode(app_state: &mut AppState, key_code: KeyCode) {
    match key_code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app_state.close_detail(),
        KeyCode::Char(':') => app_state.start_command_mode(),
        _ => {}
    }
}
