//! Screen layout and top-level frame rendering.
//!
//! Pure layout logic: [`ScreenLayout`] splits the terminal into header,
//! optional sidebar, transcript, input box and status bar. The same split
//! is used to size the transcript before drawing and to draw it.

use super::constants::{
    HEADER_HEIGHT, INPUT_HEIGHT, SIDEBAR_MIN_TERMINAL_WIDTH, SIDEBAR_WIDTH, STATUS_BAR_HEIGHT,
};
use super::input::MessageInput;
use super::styles::MessageStyles;
use super::{help, sidebar, transcript};
use crate::state::{AppState, FocusPane};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title bar.
    pub header: Rect,
    /// Courses, suggestions and history; `None` on narrow terminals.
    pub sidebar: Option<Rect>,
    /// Conversation pane, including its border.
    pub transcript: Rect,
    /// Message input box.
    pub input: Rect,
    /// Key hints.
    pub status: Rect,
}

impl ScreenLayout {
    /// Split `area`.
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(area);

        let (sidebar, main) = if area.width >= SIDEBAR_MIN_TERMINAL_WIDTH {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(rows[1]);
            (Some(columns[0]), columns[1])
        } else {
            (None, rows[1])
        };

        let main_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(INPUT_HEIGHT)])
            .split(main);

        Self {
            header: rows[0],
            sidebar,
            transcript: main_rows[0],
            input: main_rows[1],
            status: rows[2],
        }
    }

    /// Transcript text area inside its border: (width, height).
    pub fn transcript_inner(&self) -> (u16, u16) {
        (
            self.transcript.width.saturating_sub(2),
            self.transcript.height.saturating_sub(2),
        )
    }
}

/// Draw the whole screen.
///
/// `lines` are the prebuilt transcript lines the scroll bounds were
/// computed from.
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    styles: &MessageStyles,
    lines: Vec<Line<'static>>,
) {
    let layout = ScreenLayout::new(frame.area());

    render_header(frame, layout.header, styles);
    if let Some(area) = layout.sidebar {
        sidebar::render_sidebar(frame, area, state, styles);
    }
    transcript::render_transcript(frame, layout.transcript, state, lines, styles);

    let input_focused = state.focus == FocusPane::Input;
    let input = MessageInput::new(&state.input, styles, input_focused, state.session().is_busy());
    let cursor = input.cursor_position(layout.input);
    frame.render_widget(input, layout.input);

    render_status_bar(frame, layout.status, state, styles);

    if state.help_visible {
        help::render_help_overlay(frame, styles);
    } else if input_focused {
        frame.set_cursor_position(cursor);
    }
}

fn render_header(frame: &mut Frame, area: Rect, styles: &MessageStyles) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        " Course Materials Assistant",
        styles.header(),
    )));
    frame.render_widget(paragraph, area);
}

/// Context-sensitive key hints for the focused pane.
pub(crate) fn status_text(state: &AppState) -> String {
    let hints = match state.focus {
        FocusPane::Input => "Enter: send | Tab: next pane | Ctrl+n: new chat | Ctrl+c: quit",
        FocusPane::Transcript => "j/k: scroll | g/G: top/bottom | Tab: next pane | ?: help | q: quit",
        FocusPane::History => "j/k: select | Enter: open chat | n: new chat | ?: help | q: quit",
        FocusPane::Suggestions => "j/k: select | Enter: ask | Tab: next pane | ?: help | q: quit",
    };
    if state.session().is_busy() {
        format!("Waiting for answer... | {hints}")
    } else {
        hints.to_string()
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &MessageStyles) {
    let paragraph =
        Paragraph::new(Line::from(Span::styled(format!(" {}", status_text(state)), styles.muted())));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
