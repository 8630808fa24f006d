//! Help overlay listing keyboard shortcuts.
//!
//! Centered modal on top of the chat screen. Opened by `?` or F1 from any
//! pane except the input box (where `?` is text), closed by Esc, `?` or F1.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::MessageStyles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut groups: (heading, [(keys, description)]).
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Chat",
        &[
            ("Enter", "Send message / open chat / ask suggestion"),
            ("Ctrl+n", "Start a new chat"),
            ("n", "New chat (outside the input box)"),
        ],
    ),
    (
        "Focus",
        &[
            ("Tab", "Next pane"),
            ("Shift+Tab", "Previous pane"),
            ("Esc, i", "Back to the input box"),
        ],
    ),
    (
        "Navigation",
        &[
            ("j/↓, k/↑", "Move selection or scroll"),
            ("Ctrl+d/PgDn", "Page down"),
            ("Ctrl+u/PgUp", "Page up"),
            ("g/Home, G/End", "Top / bottom"),
        ],
    ),
    (
        "Input box",
        &[
            ("←/→, Home/End", "Move cursor"),
            ("Backspace/Del", "Delete character"),
        ],
    ),
    (
        "Application",
        &[
            ("?, F1", "Toggle this help"),
            ("q", "Quit (outside the input box)"),
            ("Ctrl+c", "Quit"),
        ],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, styles: &MessageStyles) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(styles.border(true)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    if popup_area.height < 2 {
        return;
    }
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height - 1,
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        " Press Esc or ? to close ",
        styles.muted(),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

/// Rect of `percent_x` by `percent_y` of `area`, centered in it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content(styles: &MessageStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, (heading, shortcuts)) in HELP_SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*heading, styles.section_header())));
        for (keys, description) in shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<16}"), styles.key_hint()),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::styles::ColorConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn centered_rect_is_centered() {
        let rect = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(rect, Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn content_lists_every_section() {
        let styles = MessageStyles::with_color_config(ColorConfig::from_env_and_args(true));
        let text: Vec<String> = build_help_content(&styles)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        for (heading, _) in HELP_SECTIONS {
            assert!(text.iter().any(|l| l == heading), "missing section {heading}");
        }
        assert!(text.iter().any(|l| l.contains("Start a new chat")));
        assert!(text.iter().any(|l| l.starts_with("  Ctrl+c")));
    }

    #[test]
    fn overlay_renders_title_and_hint() {
        let styles = MessageStyles::with_color_config(ColorConfig::from_env_and_args(true));
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        terminal
            .draw(|frame| render_help_overlay(frame, &styles))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buffer[(x, y)].symbol().to_string())
            .collect();
        assert!(screen.contains("Keyboard Shortcuts"));
        assert!(screen.contains("Press Esc or ? to close"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let styles = MessageStyles::default();
        let mut terminal = Terminal::new(TestBackend::new(2, 1)).unwrap();
        terminal
            .draw(|frame| render_help_overlay(frame, &styles))
            .unwrap();
    }
}
