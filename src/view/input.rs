//! Message input box.

use super::styles::MessageStyles;
use crate::state::InputState;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Shown in the empty input box.
pub const PLACEHOLDER: &str = "Ask about courses, lessons or specific content...";

/// Single-line input box.
///
/// Long text scrolls horizontally so the cursor always stays visible.
pub struct MessageInput<'a> {
    input: &'a InputState,
    styles: &'a MessageStyles,
    focused: bool,
    busy: bool,
}

impl<'a> MessageInput<'a> {
    /// Create the widget.
    pub fn new(input: &'a InputState, styles: &'a MessageStyles, focused: bool, busy: bool) -> Self {
        Self {
            input,
            styles,
            focused,
            busy,
        }
    }

    /// Terminal position of the text cursor when the box fills `area`.
    pub fn cursor_position(&self, area: Rect) -> Position {
        let inner_width = area.width.saturating_sub(2);
        let before = cursor_column(self.input);
        let scroll = horizontal_scroll(before, inner_width);
        let column = before.saturating_sub(scroll).min(inner_width.saturating_sub(1));
        Position::new(area.x + 1 + column, area.y + 1)
    }
}

/// Display width of the text before the cursor.
fn cursor_column(input: &InputState) -> u16 {
    u16::try_from(input.before_cursor().width()).unwrap_or(u16::MAX)
}

/// Columns hidden on the left so the cursor cell fits inside `inner_width`.
fn horizontal_scroll(cursor_column: u16, inner_width: u16) -> u16 {
    cursor_column.saturating_sub(inner_width.saturating_sub(1))
}

impl Widget for MessageInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.busy {
            " Waiting for answer... "
        } else {
            " Message "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.styles.border(self.focused));

        let line = if self.input.text().is_empty() {
            Line::from(Span::styled(PLACEHOLDER, self.styles.muted()))
        } else {
            Line::from(self.input.text())
        };

        let scroll = horizontal_scroll(cursor_column(self.input), area.width.saturating_sub(2));
        Paragraph::new(line)
            .block(block)
            .scroll((0, scroll))
            .render(area, buf);
    }
}
