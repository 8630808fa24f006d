//! Course Materials Assistant chat client (coursechat)
//!
//! Terminal chat client for a course-materials question answering backend.
//! Questions are posted to the backend, answers are rendered as markdown
//! with their source citations, and past chats are kept in a bounded,
//! persisted ledger.
//!
//! Pure core: [`model`] and [`state`] never touch the terminal, the
//! network or the disk. Impure shell: [`bridge`] (HTTP), [`store`]
//! (files), [`view`] (terminal) and [`logging`].

pub mod bridge;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod store;
pub mod view;
