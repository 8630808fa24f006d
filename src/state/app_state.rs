//! Application state and transitions.
//!
//! AppState is the root state type. It wraps the [`ChatSession`] (domain
//! model) together with everything the terminal shell needs to draw a
//! frame: focus, input buffer, list cursors, transcript scroll and the
//! course statistics panel. Transitions never touch the terminal or the
//! network; the shell performs the side effects they ask for.

use super::input::{self, InputState};
use super::session::ChatSession;
use crate::bridge::{QueryRequest, QueryResponse, Ticket};
use crate::model::{BridgeError, CourseStats, CourseStatsState};
use tracing::{debug, warn};

/// Application state.
///
/// # State Machine
///
/// - **Focus**: Input → Transcript → History → Suggestions (Tab cycles)
/// - **Busy**: set while a query is in flight; input submission is refused
/// - **Help**: overlay on top of everything, closed by Esc or the help key
#[derive(Debug)]
pub struct AppState {
    session: ChatSession,

    /// Which pane receives keyboard input.
    pub focus: FocusPane,

    /// Text being composed.
    pub input: InputState,

    /// Whether the help overlay is visible.
    pub help_visible: bool,

    /// Scroll position of the transcript pane.
    pub transcript_scroll: TranscriptScroll,

    /// Cursor in the chat history list.
    pub history_cursor: usize,

    /// Cursor in the suggested questions list.
    pub suggestion_cursor: usize,

    suggestions: Vec<String>,

    /// Course statistics panel.
    pub course_stats: CourseStatsState,

    /// Animation frame counter, advanced on every timer tick.
    pub tick: u64,
}

impl AppState {
    /// State for a freshly restored session.
    pub fn new(session: ChatSession, suggestions: Vec<String>) -> Self {
        Self {
            session,
            focus: FocusPane::Input,
            input: InputState::default(),
            help_visible: false,
            transcript_scroll: TranscriptScroll::default(),
            history_cursor: 0,
            suggestion_cursor: 0,
            suggestions,
            course_stats: CourseStatsState::Loading,
            tick: 0,
        }
    }

    /// Conversation state.
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Suggested questions, in display order.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Cycle focus forward.
    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Cycle focus backward.
    pub fn cycle_focus_back(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Put focus back on the input box.
    pub fn focus_input(&mut self) {
        self.focus = FocusPane::Input;
    }

    /// Show or hide the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Send the composed text.
    ///
    /// Returns the request the shell must dispatch, or `None` when the input
    /// is blank or a query is already in flight. The input is cleared only
    /// when a request is produced.
    pub fn submit_input(&mut self) -> Option<(Ticket, QueryRequest)> {
        if self.session.is_busy() {
            return None;
        }
        let (rest, text) = input::take_submission(std::mem::take(&mut self.input));
        self.input = rest;
        let outgoing = self.session.submit(&text?)?;
        self.transcript_scroll.follow();
        Some(outgoing)
    }

    /// Send the highlighted suggestion exactly as if it had been typed.
    pub fn send_suggestion(&mut self) -> Option<(Ticket, QueryRequest)> {
        if self.session.is_busy() {
            return None;
        }
        let question = self.suggestions.get(self.suggestion_cursor)?.clone();
        self.input = InputState::with_text(question);
        self.submit_input()
    }

    /// Start a new chat and put the cursor on it.
    pub fn new_chat(&mut self) {
        let id = self.session.start_new_chat();
        self.input = InputState::default();
        self.transcript_scroll.follow();
        self.history_cursor = self.session.ledger().position_of(id).unwrap_or_default();
        debug!(id = %id, "New chat started");
    }

    /// Switch to the chat under the history cursor.
    pub fn activate_history(&mut self) {
        match self.session.switch_to(self.history_cursor) {
            Ok(()) => self.transcript_scroll.follow(),
            Err(err) => warn!(error = %err, "Ignoring chat switch"),
        }
    }

    /// Apply a finished query.
    pub fn apply_query_result(&mut self, ticket: Ticket, result: Result<QueryResponse, BridgeError>) {
        self.session.complete(ticket, result);
    }

    /// Record the course statistics outcome.
    pub fn set_course_stats(&mut self, result: Result<CourseStats, BridgeError>) {
        self.course_stats = match result {
            Ok(stats) => CourseStatsState::Loaded(stats),
            Err(err) => {
                warn!(error = %err, "Failed to load course stats");
                CourseStatsState::Failed
            }
        };
    }

    /// Advance the loading animation.
    pub fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

// ===== FocusPane =====

/// Which pane has focus. Exactly one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusPane {
    /// Message input box. Printable keys edit the text.
    #[default]
    Input,
    /// Transcript pane. Arrow keys scroll.
    Transcript,
    /// Chat history list. Enter switches chat.
    History,
    /// Suggested questions list. Enter sends the question.
    Suggestions,
}

impl FocusPane {
    const ORDER: [FocusPane; 4] = [
        FocusPane::Input,
        FocusPane::Transcript,
        FocusPane::History,
        FocusPane::Suggestions,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|p| *p == self).unwrap_or_default()
    }

    /// Next pane in Tab order, wrapping.
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Previous pane in Tab order, wrapping.
    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

// ===== TranscriptScroll =====

/// Vertical scroll of the transcript, in rendered lines.
///
/// While `follow_bottom` is set the view pins the last line to the bottom
/// edge, so new messages stay visible. Scrolling up releases it; reaching
/// the bottom again re-engages it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptScroll {
    offset: usize,
    max_offset: usize,
    follow_bottom: bool,
}

impl Default for TranscriptScroll {
    fn default() -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            follow_bottom: true,
        }
    }
}

impl TranscriptScroll {
    /// First visible line.
    pub fn offset(&self) -> usize {
        if self.follow_bottom {
            self.max_offset
        } else {
            self.offset.min(self.max_offset)
        }
    }

    /// Whether the view is pinned to the bottom.
    pub fn is_following(&self) -> bool {
        self.follow_bottom
    }

    /// Record the content and viewport height of the last layout.
    pub fn set_bounds(&mut self, content_lines: usize, viewport_height: usize) {
        self.max_offset = content_lines.saturating_sub(viewport_height);
        if self.offset >= self.max_offset && !self.follow_bottom {
            self.offset = self.max_offset;
        }
    }

    /// Pin to the bottom.
    pub fn follow(&mut self) {
        self.follow_bottom = true;
        self.offset = self.max_offset;
    }

    /// Scroll towards the top by `lines`.
    pub fn scroll_up(&mut self, lines: usize) {
        let current = self.offset();
        self.follow_bottom = false;
        self.offset = current.saturating_sub(lines);
    }

    /// Scroll towards the bottom by `lines`.
    pub fn scroll_down(&mut self, lines: usize) {
        let target = self.offset().saturating_add(lines);
        if target >= self.max_offset {
            self.follow();
        } else {
            self.offset = target;
        }
    }

    /// Jump to the first line.
    pub fn to_top(&mut self) {
        self.follow_bottom = false;
        self.offset = 0;
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
