//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings. Text editing keys in the input box
/// are handled before this table is consulted, so printable keys only reach
/// it when another pane has focus.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the key code and modifiers take part in the lookup; event kind
    /// and lock state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Vim-style movement
        keys.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::MoveDown);
        keys.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::MoveUp);
        keys.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::JumpTop);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::JumpBottom);

        // Arrow keys
        keys.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::MoveUp);
        keys.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::MoveDown);
        keys.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::JumpTop);
        keys.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::JumpBottom);

        // Page navigation
        keys.bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
        keys.bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);

        // Focus switching
        keys.bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::CycleFocus);
        keys.bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::CycleFocusBack);
        keys.bind(KeyCode::BackTab, KeyModifiers::NONE, KeyAction::CycleFocusBack);
        keys.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::FocusInput);
        keys.bind(KeyCode::Char('i'), KeyModifiers::NONE, KeyAction::FocusInput);

        // Chat
        keys.bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::Activate);
        keys.bind(KeyCode::Char('n'), KeyModifiers::NONE, KeyAction::NewChat);
        keys.bind(KeyCode::Char('n'), KeyModifiers::CONTROL, KeyAction::NewChat);

        // Application controls
        keys.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::Help);
        keys.bind(KeyCode::Char('?'), KeyModifiers::SHIFT, KeyAction::Help);
        keys.bind(KeyCode::F(1), KeyModifiers::NONE, KeyAction::Help);

        keys
    }
}
