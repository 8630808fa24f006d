//! Left sidebar: course statistics, suggested questions and chat history.

use super::constants::COURSES_BLOCK_HEIGHT;
use super::styles::MessageStyles;
use crate::model::CourseStatsState;
use crate::state::{AppState, FocusPane};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the three sidebar blocks stacked top to bottom.
pub fn render_sidebar(frame: &mut Frame, area: Rect, state: &AppState, styles: &MessageStyles) {
    let suggestions_height = u16::try_from(state.suggestions().len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(COURSES_BLOCK_HEIGHT),
            Constraint::Length(suggestions_height),
            Constraint::Min(3),
        ])
        .split(area);

    render_courses(frame, chunks[0], &state.course_stats, styles);
    render_suggestions(frame, chunks[1], state, styles);
    render_history(frame, chunks[2], state, styles);
}

/// Lines of the course statistics block.
pub(crate) fn course_lines(stats: &CourseStatsState, styles: &MessageStyles) -> Vec<Line<'static>> {
    let count = Line::from(vec![
        Span::styled("Courses: ", styles.section_header()),
        Span::raw(stats.total().to_string()),
    ]);

    let mut lines = vec![count];
    match stats {
        CourseStatsState::Loading => {
            lines.push(Line::from(Span::styled("Loading...", styles.muted())));
        }
        CourseStatsState::Failed => {
            lines.push(Line::from(Span::styled("Failed to load courses", styles.error())));
        }
        CourseStatsState::Loaded(loaded) if loaded.course_titles.is_empty() => {
            lines.push(Line::from(Span::styled("No courses available", styles.muted())));
        }
        CourseStatsState::Loaded(loaded) => {
            lines.extend(
                loaded
                    .course_titles
                    .iter()
                    .map(|title| Line::from(format!("- {title}"))),
            );
        }
    }
    lines
}

fn render_courses(frame: &mut Frame, area: Rect, stats: &CourseStatsState, styles: &MessageStyles) {
    let paragraph = Paragraph::new(course_lines(stats, styles))
        .block(
            Block::default()
                .title(" Courses ")
                .borders(Borders::ALL)
                .border_style(styles.border(false)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Suggested questions, with the cursor row reversed while focused.
pub(crate) fn suggestion_lines(state: &AppState, styles: &MessageStyles) -> Vec<Line<'static>> {
    let focused = state.focus == FocusPane::Suggestions;
    state
        .suggestions()
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let style = if focused && i == state.suggestion_cursor {
                styles.cursor_row()
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("> {question}"), style))
        })
        .collect()
}

fn render_suggestions(frame: &mut Frame, area: Rect, state: &AppState, styles: &MessageStyles) {
    let focused = state.focus == FocusPane::Suggestions;
    let paragraph = Paragraph::new(suggestion_lines(state, styles)).block(
        Block::default()
            .title(" Try asking ")
            .borders(Borders::ALL)
            .border_style(styles.border(focused)),
    );
    frame.render_widget(paragraph, area);
}

/// History rows, oldest first.
///
/// The highlighted chat is marked with `*`; the cursor row is reversed
/// while the list has focus.
pub(crate) fn history_lines(state: &AppState, styles: &MessageStyles) -> Vec<Line<'static>> {
    let ledger = state.session().ledger();
    if ledger.is_empty() {
        return vec![Line::from(Span::styled("No previous chats", styles.muted()))];
    }

    let focused = state.focus == FocusPane::History;
    ledger
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let active = ledger.highlighted() == Some(i);
            let marker = if active { "* " } else { "  " };
            let mut style = if active {
                styles.active_chat()
            } else {
                Style::default()
            };
            if focused && i == state.history_cursor {
                style = style.patch(styles.cursor_row());
            }
            Line::from(Span::styled(format!("{marker}{}", entry.title), style))
        })
        .collect()
}

fn render_history(frame: &mut Frame, area: Rect, state: &AppState, styles: &MessageStyles) {
    let focused = state.focus == FocusPane::History;
    let lines = history_lines(state, styles);

    // Keep the cursor row on screen in long histories.
    let visible = usize::from(area.height.saturating_sub(2)).max(1);
    let offset = if focused {
        (state.history_cursor + 1).saturating_sub(visible)
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Chats ")
                .borders(Borders::ALL)
                .border_style(styles.border(focused)),
        )
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}
