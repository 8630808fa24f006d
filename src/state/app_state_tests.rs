//! Tests for AppState transitions.

use super::*;
use crate::model::{SessionId, WELCOME_TEXT};
use crate::store::MemoryStore;

fn test_state() -> AppState {
    let session = ChatSession::restore(Box::new(MemoryStore::new()), 3);
    AppState::new(
        session,
        vec!["First suggestion".to_string(), "Second suggestion".to_string()],
    )
}

fn ok(answer: &str) -> Result<QueryResponse, BridgeError> {
    Ok(QueryResponse {
        session_id: SessionId::new("s1").unwrap(),
        answer: answer.to_string(),
        sources: Vec::new(),
    })
}

// ===== focus =====

#[test]
fn focus_starts_on_input() {
    assert_eq!(test_state().focus, FocusPane::Input);
}

#[test]
fn cycle_focus_visits_all_panes_and_wraps() {
    let mut state = test_state();
    let mut seen = vec![state.focus];
    for _ in 0..4 {
        state.cycle_focus();
        seen.push(state.focus);
    }
    assert_eq!(
        seen,
        vec![
            FocusPane::Input,
            FocusPane::Transcript,
            FocusPane::History,
            FocusPane::Suggestions,
            FocusPane::Input,
        ]
    );
}

#[test]
fn cycle_focus_back_reverses() {
    let mut state = test_state();
    state.cycle_focus_back();
    assert_eq!(state.focus, FocusPane::Suggestions);
    state.cycle_focus_back();
    assert_eq!(state.focus, FocusPane::History);
}

#[test]
fn toggle_help_flips_visibility() {
    let mut state = test_state();
    state.toggle_help();
    assert!(state.help_visible);
    state.toggle_help();
    assert!(!state.help_visible);
}

// ===== submission =====

#[test]
fn submit_clears_input_and_appends_user_message() {
    let mut state = test_state();
    state.input = InputState::with_text("  hello  ");

    let (_, request) = state.submit_input().unwrap();

    assert_eq!(request.query, "hello");
    assert_eq!(state.input, InputState::default());
    let last = state.session().transcript().last().unwrap();
    assert_eq!(last.content, "hello");
}

#[test]
fn blank_submit_is_ignored() {
    let mut state = test_state();
    state.input = InputState::with_text("   ");

    assert!(state.submit_input().is_none());
    assert_eq!(state.input.text(), "   ");
    assert_eq!(state.session().transcript().len(), 1);
}

#[test]
fn submit_while_busy_keeps_input() {
    let mut state = test_state();
    state.input = InputState::with_text("first");
    state.submit_input().unwrap();

    state.input = InputState::with_text("second");
    assert!(state.submit_input().is_none());
    assert_eq!(state.input.text(), "second");
}

#[test]
fn send_suggestion_sends_selected_question() {
    let mut state = test_state();
    state.suggestion_cursor = 1;

    let (_, request) = state.send_suggestion().unwrap();

    assert_eq!(request.query, "Second suggestion");
    assert!(state.input.is_blank());
}

#[test]
fn completion_releases_input() {
    let mut state = test_state();
    state.input = InputState::with_text("q");
    let (ticket, _) = state.submit_input().unwrap();

    state.apply_query_result(ticket, ok("answer"));

    assert!(!state.session().is_busy());
    assert_eq!(state.session().transcript().last().unwrap().content, "answer");
}

// ===== chats =====

#[test]
fn new_chat_moves_history_cursor_to_new_entry() {
    let mut state = test_state();
    state.input = InputState::with_text("draft");

    state.new_chat();
    state.new_chat();

    assert_eq!(state.history_cursor, 1);
    assert!(state.input.is_blank());
    assert_eq!(state.session().transcript()[0].content, WELCOME_TEXT);
}

#[test]
fn activate_history_switches_chat() {
    let mut state = test_state();
    state.new_chat();
    state.new_chat();
    state.history_cursor = 0;

    state.activate_history();

    assert_eq!(state.session().ledger().highlighted(), Some(0));
}

#[test]
fn activate_history_on_empty_ledger_is_harmless() {
    let mut state = test_state();
    state.activate_history();
    assert!(state.session().is_transient());
}

// ===== course stats =====

#[test]
fn course_stats_failure_shows_failed_state() {
    let mut state = test_state();
    state.set_course_stats(Err(BridgeError::Server { status: 500 }));
    assert_eq!(state.course_stats, CourseStatsState::Failed);
    assert_eq!(state.course_stats.total(), 0);
}

#[test]
fn course_stats_success_is_stored() {
    let mut state = test_state();
    state.set_course_stats(Ok(CourseStats {
        total_courses: 4,
        course_titles: vec!["Intro".to_string()],
    }));
    assert_eq!(state.course_stats.total(), 4);
}

// ===== transcript scroll =====

#[test]
fn scroll_follows_bottom_by_default() {
    let mut scroll = TranscriptScroll::default();
    scroll.set_bounds(50, 10);
    assert!(scroll.is_following());
    assert_eq!(scroll.offset(), 40);
}

#[test]
fn scroll_up_releases_follow() {
    let mut scroll = TranscriptScroll::default();
    scroll.set_bounds(50, 10);

    scroll.scroll_up(5);
    scroll.set_bounds(60, 10);

    assert!(!scroll.is_following());
    assert_eq!(scroll.offset(), 35);
}

#[test]
fn scroll_down_to_bottom_reengages_follow() {
    let mut scroll = TranscriptScroll::default();
    scroll.set_bounds(50, 10);
    scroll.scroll_up(3);

    scroll.scroll_down(10);

    assert!(scroll.is_following());
    assert_eq!(scroll.offset(), 40);
}

#[test]
fn to_top_goes_to_first_line() {
    let mut scroll = TranscriptScroll::default();
    scroll.set_bounds(50, 10);
    scroll.to_top();
    assert_eq!(scroll.offset(), 0);
    assert!(!scroll.is_following());
}

#[test]
fn short_content_never_scrolls() {
    let mut scroll = TranscriptScroll::default();
    scroll.set_bounds(3, 10);
    scroll.scroll_up(2);
    assert_eq!(scroll.offset(), 0);
}
