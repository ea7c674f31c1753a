//! Lyrics module - normalization and synchronization
//!
//! - `parser`: Alignment payloads to synced lines or plain text
//! - `engine`: Clock, highlighting, autoscroll and gesture seeking
//! - `issue`: Recoverable problems, logged and never surfaced

pub mod engine;
pub mod issue;
pub mod parser;

// Re-export commonly used items
pub use engine::LyricsEngine;
pub use issue::{LyricsIssue, clamp_seek};
pub use parser::*;
