//! Message input handling (pure state transitions).
//!
//! The cursor counts characters, not bytes, so multi-byte input edits
//! cleanly. All functions take and return [`InputState`] by value.

/// Text being composed in the input box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    text: String,
    /// Cursor position in characters, `0..=char_count`.
    cursor: usize,
}

impl InputState {
    /// Input holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the input holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Text before the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_offset(self.cursor)]
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }
}

/// Insert `ch` at the cursor and advance it.
pub fn handle_char_input(mut state: InputState, ch: char) -> InputState {
    let at = state.byte_offset(state.cursor);
    state.text.insert(at, ch);
    state.cursor += 1;
    state
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut state: InputState) -> InputState {
    if state.cursor == 0 {
        return state;
    }
    let at = state.byte_offset(state.cursor - 1);
    state.text.remove(at);
    state.cursor -= 1;
    state
}

/// Delete the character under the cursor. No-op at the end.
pub fn handle_delete(mut state: InputState) -> InputState {
    if state.cursor >= state.char_count() {
        return state;
    }
    let at = state.byte_offset(state.cursor);
    state.text.remove(at);
    state
}

/// Move the cursor one character left, saturating at 0.
pub fn handle_cursor_left(mut state: InputState) -> InputState {
    state.cursor = state.cursor.saturating_sub(1);
    state
}

/// Move the cursor one character right, saturating at the end.
pub fn handle_cursor_right(mut state: InputState) -> InputState {
    state.cursor = (state.cursor + 1).min(state.char_count());
    state
}

/// Move the cursor to the start.
pub fn handle_home(mut state: InputState) -> InputState {
    state.cursor = 0;
    state
}

/// Move the cursor to the end.
pub fn handle_end(mut state: InputState) -> InputState {
    state.cursor = state.char_count();
    state
}

/// Take the text for sending and leave the input empty.
///
/// Blank input is left untouched and `None` is returned.
pub fn take_submission(state: InputState) -> (InputState, Option<String>) {
    if state.is_blank() {
        return (state, None);
    }
    (InputState::default(), Some(state.text))
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
