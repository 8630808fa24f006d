//! Transcript pane rendering.
//!
//! Messages are re-rendered from their structured form on every frame:
//! assistant answers go through `tui-markdown`, user questions stay
//! literal, and each answer's citations follow it as badges.

use super::constants::LOADING_FRAMES;
use super::styles::MessageStyles;
use crate::bridge::QueryTarget;
use crate::model::{ChatMessage, Citation, Role};
use crate::state::AppState;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_markdown::from_str;

/// Build every line of the viewed conversation, including the loading
/// indicator when the pending query belongs to it.
pub fn build_transcript_lines(state: &AppState, styles: &MessageStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, message) in state.session().transcript().iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(render_message(message, styles));
    }

    if awaiting_viewed_answer(state) {
        let frame = LOADING_FRAMES[(state.tick % LOADING_FRAMES.len() as u64) as usize];
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Assistant", styles.role_label(Role::Assistant))));
        lines.push(Line::from(Span::styled(format!("Thinking{frame}"), styles.muted())));
    }

    lines
}

/// Whether the outstanding query was sent from the conversation on screen.
fn awaiting_viewed_answer(state: &AppState) -> bool {
    let session = state.session();
    let Some(pending) = session.bridge().pending() else {
        return false;
    };
    match pending.target {
        QueryTarget::Transient => session.is_transient(),
        QueryTarget::Entry(id) => session.ledger().edited_entry().map(|e| e.id) == Some(id),
    }
}

/// Number of rows `lines` occupy when wrapped to `width` columns.
pub fn wrapped_line_count(lines: &[Line<'static>], width: u16) -> usize {
    if width == 0 {
        return 0;
    }
    Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width)
}

/// Render one message: role label, body, then citations.
fn render_message(message: &ChatMessage, styles: &MessageStyles) -> Vec<Line<'static>> {
    let label = match message.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    let mut lines = vec![Line::from(Span::styled(label, styles.role_label(message.role)))];

    let body_style = styles.style_for_role(message.role);
    match message.role {
        Role::User => lines.extend(render_literal(&message.content, body_style)),
        Role::Assistant if message.is_error => {
            lines.extend(render_literal(&message.content, styles.error()))
        }
        Role::Assistant => lines.extend(render_markdown_with_style(&message.content, body_style)),
    }

    if !message.sources.is_empty() {
        lines.extend(render_citations(&message.sources, styles));
    }
    lines
}

/// Plain text, one line per `\n`, no markdown interpretation.
fn render_literal(text: &str, style: Style) -> Vec<Line<'static>> {
    text.split('\n')
        .map(|line| Line::from(Span::styled(line.to_string(), style)))
        .collect()
}

/// Render markdown, layering its styling over `base_style`.
fn render_markdown_with_style(markdown_text: &str, base_style: Style) -> Vec<Line<'static>> {
    let text = from_str(markdown_text);

    text.lines
        .into_iter()
        .map(|line| {
            let owned_spans: Vec<_> = line
                .spans
                .into_iter()
                .map(|span| Span::styled(span.content.into_owned(), base_style.patch(span.style)))
                .collect();
            Line::from(owned_spans)
        })
        .collect()
}

/// "Sources" header followed by one badge per citation.
///
/// Linked citations show their URL after the label.
fn render_citations(citations: &[Citation], styles: &MessageStyles) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled("Sources", styles.citation()))];
    for citation in citations {
        let mut spans = vec![Span::styled(format!("  [{}]", citation.text), styles.citation())];
        if let Some(link) = &citation.link {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(link.clone(), styles.link()));
        }
        lines.push(Line::from(spans));
    }
    lines
}

/// Render the transcript pane.
///
/// `lines` comes from [`build_transcript_lines`]; the scroll offset was
/// clamped against the same lines before the frame started.
pub fn render_transcript(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    lines: Vec<Line<'static>>,
    styles: &MessageStyles,
) {
    let title = match state.session().ledger().edited_entry() {
        Some(entry) => format!(" {} ", entry.title),
        None => " New conversation ".to_string(),
    };
    let focused = state.focus == crate::state::FocusPane::Transcript;

    let offset = u16::try_from(state.transcript_scroll.offset()).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(styles.border(focused)),
        )
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
