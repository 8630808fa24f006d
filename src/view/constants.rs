//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the message input box in lines (border + one text line).
pub const INPUT_HEIGHT: u16 = 3;

/// Width of the left sidebar in columns.
pub const SIDEBAR_WIDTH: u16 = 34;

/// Terminal width below which the sidebar is hidden.
pub const SIDEBAR_MIN_TERMINAL_WIDTH: u16 = 70;

/// Height of the course statistics block (border + count + titles).
pub const COURSES_BLOCK_HEIGHT: u16 = 8;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Frames of the "waiting for answer" animation, one per timer tick.
pub const LOADING_FRAMES: [&str; 3] = [".  ", ".. ", "..."];
