//! Scrolling and list navigation keyboard handler.
//!
//! Focus-aware: movement keys scroll the transcript when the input or the
//! transcript has focus, and move the list cursor when a sidebar list has
//! focus.

use crate::model::KeyAction;
use crate::state::{AppState, FocusPane};

/// Apply a movement action to whatever the focused pane controls.
///
/// `viewport_height` is the transcript height in lines, used for paging.
/// Non-movement actions are ignored.
pub fn handle_scroll_action(state: &mut AppState, action: KeyAction, viewport_height: usize) {
    match state.focus {
        FocusPane::Input | FocusPane::Transcript => {
            scroll_transcript(state, action, viewport_height)
        }
        FocusPane::History => {
            let len = state.session().ledger().len();
            state.history_cursor = move_cursor(state.history_cursor, len, action);
        }
        FocusPane::Suggestions => {
            let len = state.suggestions().len();
            state.suggestion_cursor = move_cursor(state.suggestion_cursor, len, action);
        }
    }
}

fn scroll_transcript(state: &mut AppState, action: KeyAction, viewport_height: usize) {
    let page = viewport_height.saturating_sub(1).max(1);
    let scroll = &mut state.transcript_scroll;
    match action {
        KeyAction::MoveUp => scroll.scroll_up(1),
        KeyAction::MoveDown => scroll.scroll_down(1),
        KeyAction::PageUp => scroll.scroll_up(page),
        KeyAction::PageDown => scroll.scroll_down(page),
        KeyAction::JumpTop => scroll.to_top(),
        KeyAction::JumpBottom => scroll.follow(),
        _ => {}
    }
}

/// New cursor position in a list of `len` items. Clamped, never wraps.
fn move_cursor(cursor: usize, len: usize, action: KeyAction) -> usize {
    if len == 0 {
        return 0;
    }
    let last = len - 1;
    let cursor = cursor.min(last);
    match action {
        KeyAction::MoveUp | KeyAction::PageUp => cursor.saturating_sub(1),
        KeyAction::MoveDown | KeyAction::PageDown => (cursor + 1).min(last),
        KeyAction::JumpTop => 0,
        KeyAction::JumpBottom => last,
        _ => cursor,
    }
}

#[cfg(test)]
#[path = "scroll_handler_tests.rs"]
mod tests;
