//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Text entry in the input box bypasses this table entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Selection / scrolling
    /// Move selection or scroll up by one. Default: k/↑
    MoveUp,
    /// Move selection or scroll down by one. Default: j/↓
    MoveDown,
    /// Scroll the transcript up by a page. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll the transcript down by a page. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first item / top of transcript. Default: g/Home
    JumpTop,
    /// Jump to the last item / bottom of transcript. Default: G/End
    JumpBottom,

    // Focus navigation
    /// Cycle focus: Input → Transcript → History → Suggestions. Default: Tab
    CycleFocus,
    /// Cycle focus in reverse. Default: Shift+Tab
    CycleFocusBack,
    /// Return focus to the input box. Default: Esc, i
    FocusInput,

    // Chat
    /// Switch to the selected chat or send the selected suggestion. Default: Enter
    Activate,
    /// Start a new chat. Default: n, Ctrl+n
    NewChat,

    // Application
    /// Show help overlay with keyboard shortcuts. Default: ?, F1
    Help,
    /// Exit the application. Default: q
    Quit,
}
