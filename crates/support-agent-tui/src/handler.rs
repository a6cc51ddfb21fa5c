use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use support_agent_core::SUGGESTIONS;

use crate::app::{App, InputMode};
use crate::tui::{AppEvent, EventSender};

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent, tx: &EventSender) {
    match event {
        AppEvent::Key(key) => handle_key(app, key, tx),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Reply(outcome) => app.apply_reply(outcome),
    }
}

fn handle_key(app: &mut App, key: KeyEvent, tx: &EventSender) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key, tx),
        InputMode::Editing => handle_editing_mode(app, key, tx),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent, tx: &EventSender) {
    let welcome = app.conversation.is_empty();

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('i') | KeyCode::Tab => {
            app.input_mode = InputMode::Editing;
            app.draft_cursor = app.conversation.draft().chars().count();
        }

        KeyCode::Char('j') | KeyCode::Down => {
            if welcome {
                app.suggestion_nav_down();
            } else {
                app.scroll_down();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if welcome {
                app.suggestion_nav_up();
            } else {
                app.scroll_up();
            }
        }
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),

        KeyCode::Enter if welcome => app.select_highlighted_suggestion(tx),

        // Number keys pick a suggestion directly
        KeyCode::Char(c @ '1'..='9') if welcome => {
            let index = (c as usize) - ('1' as usize);
            if index < SUGGESTIONS.len() {
                app.suggestion_state.select(Some(index));
                app.select_suggestion(index, tx);
            }
        }

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent, tx: &EventSender) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            // Ignored by the conversation while a reply is pending
            app.submit_draft(tx);
        }
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        KeyCode::Backspace => {
            if app.draft_cursor > 0 {
                app.draft_cursor -= 1;
                let byte_pos = char_to_byte_index(app.conversation.draft(), app.draft_cursor);
                app.conversation.draft_mut().remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.conversation.draft().chars().count();
            if app.draft_cursor < char_count {
                let byte_pos = char_to_byte_index(app.conversation.draft(), app.draft_cursor);
                app.conversation.draft_mut().remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.draft_cursor = app.draft_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.conversation.draft().chars().count();
            app.draft_cursor = (app.draft_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.draft_cursor = 0;
        }
        KeyCode::End => {
            app.draft_cursor = app.conversation.draft().chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(app.conversation.draft(), app.draft_cursor);
            app.conversation.draft_mut().insert(byte_pos, c);
            app.draft_cursor += 1;
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let in_chat = app
        .chat_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);
    if !in_chat {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            for _ in 0..3 {
                app.scroll_down();
            }
        }
        MouseEventKind::ScrollUp => {
            for _ in 0..3 {
                app.scroll_up();
            }
        }
        _ => {}
    }
}
