//! Styling for transcript messages and chrome.
//!
//! Every style goes through [`MessageStyles`] so `--no-color` and
//! `NO_COLOR` strip colour from the whole UI in one place. Modifiers (bold,
//! underline, reversed) survive, so focus and selection stay visible.

use crate::model::Role;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== MessageStyles =====

/// Styles for every element of the chat UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageStyles {
    colors: bool,
}

impl MessageStyles {
    /// Styles honouring `config`.
    pub fn with_color_config(config: ColorConfig) -> Self {
        Self {
            colors: config.colors_enabled(),
        }
    }

    fn fg(&self, color: Color) -> Style {
        if self.colors {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    /// Body text for a message role.
    pub fn style_for_role(&self, role: Role) -> Style {
        match role {
            Role::User => self.fg(Color::Cyan),
            Role::Assistant => self.fg(Color::White),
        }
    }

    /// "You" / "Assistant" label above each message.
    pub fn role_label(&self, role: Role) -> Style {
        let base = match role {
            Role::User => self.fg(Color::Cyan),
            Role::Assistant => self.fg(Color::Green),
        };
        base.add_modifier(Modifier::BOLD)
    }

    /// Inline `Error: ...` answers.
    pub fn error(&self) -> Style {
        self.fg(Color::Red)
    }

    /// "Sources" header and plain citation badges.
    pub fn citation(&self) -> Style {
        self.fg(Color::Yellow)
    }

    /// URL part of a linked citation.
    pub fn link(&self) -> Style {
        self.fg(Color::Blue).add_modifier(Modifier::UNDERLINED)
    }

    /// Hints, placeholders and other secondary text.
    pub fn muted(&self) -> Style {
        self.fg(Color::DarkGray)
    }

    /// Section headers in the sidebar and help overlay.
    pub fn section_header(&self) -> Style {
        self.fg(Color::Magenta).add_modifier(Modifier::BOLD)
    }

    /// Key names in the help overlay.
    pub fn key_hint(&self) -> Style {
        self.fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    /// Block border; focused panes stand out.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            self.fg(Color::Gray)
        }
    }

    /// List row under the keyboard cursor.
    pub fn cursor_row(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    /// History row of the highlighted (viewed) chat.
    pub fn active_chat(&self) -> Style {
        self.fg(Color::Green).add_modifier(Modifier::BOLD)
    }

    /// Header bar.
    pub fn header(&self) -> Style {
        self.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }
}

impl Default for MessageStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(!config.colors_enabled(), "--no-color flag should disable colors");
    }

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(!config.colors_enabled(), "NO_COLOR env var should disable colors");
    }

    #[test]
    #[serial(no_color)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled());
    }

    #[test]
    fn user_and_assistant_labels_differ() {
        let styles = MessageStyles::with_color_config(ColorConfig { enabled: true });
        assert_ne!(styles.role_label(Role::User), styles.role_label(Role::Assistant));
    }

    #[test]
    fn disabled_colors_strip_foreground_but_keep_modifiers() {
        let styles = MessageStyles::with_color_config(ColorConfig { enabled: false });

        assert_eq!(styles.style_for_role(Role::User).fg, None);
        assert_eq!(styles.error().fg, None);
        assert_eq!(styles.link().fg, None);
        assert!(styles.link().add_modifier.contains(Modifier::UNDERLINED));
        assert!(styles.border(true).add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn enabled_colors_use_red_for_errors() {
        let styles = MessageStyles::with_color_config(ColorConfig { enabled: true });
        assert_eq!(styles.error().fg, Some(Color::Red));
    }
}
