//! UI and conversation state (pure).
//!
//! All state transitions are testable without a terminal or a backend.

pub mod app_state;
pub mod input;
pub mod scroll_handler;
pub mod session;

// Re-export for convenience
pub use app_state::{AppState, FocusPane, TranscriptScroll};
pub use input::InputState;
pub use scroll_handler::handle_scroll_action;
pub use session::ChatSession;
