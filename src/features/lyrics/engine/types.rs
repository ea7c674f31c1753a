//! Core data types for the lyrics engine
//!
//! Everything here is recomputed from scratch on each tick; nothing carries
//! state between frames.

use super::autoscroll::ScrollCommand;

/// Where playback is within the lyrics at one instant
///
/// `None` indices mean "nothing active": before the first line, or during a
/// gap between two words of the active line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SyncSnapshot {
    /// Playback time the snapshot was computed for, in seconds
    pub current_time: f64,
    /// Index into the line list
    pub active_line_index: Option<usize>,
    /// Index into the active line's words
    pub active_word_index: Option<usize>,
}

impl SyncSnapshot {
    /// Snapshot with nothing active
    pub fn idle(current_time: f64) -> Self {
        Self {
            current_time,
            active_line_index: None,
            active_word_index: None,
        }
    }

    /// Active `(line, word)` pair, if a word is active
    pub fn active_word(&self) -> Option<(usize, usize)> {
        Some((self.active_line_index?, self.active_word_index?))
    }
}

/// Per-word highlight state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordState {
    Future,
    Active,
    Past,
}

/// Per-line highlight state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineState {
    Past,
    Active,
    Future,
}

/// Render hints for a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Scale factor (1.0 = normal size)
    pub scale: f32,
    /// Opacity (0.0 - 1.0)
    pub opacity: f32,
    pub bold: bool,
}

impl LineStyle {
    pub const ACTIVE: Self = Self {
        scale: 1.02,
        opacity: 1.0,
        bold: true,
    };

    pub const PAST: Self = Self {
        scale: 1.0,
        opacity: 0.4,
        bold: false,
    };

    pub const FUTURE: Self = Self {
        scale: 1.0,
        opacity: 0.5,
        bold: false,
    };

    pub fn for_state(state: LineState) -> Self {
        match state {
            LineState::Active => Self::ACTIVE,
            LineState::Past => Self::PAST,
            LineState::Future => Self::FUTURE,
        }
    }
}

/// Three-line karaoke view around the active line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KaraokeWindow {
    pub previous: Option<usize>,
    pub active: Option<usize>,
    pub next: Option<usize>,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub snapshot: SyncSnapshot,
    pub is_playing: bool,
    /// Scroll to issue this frame, if any
    pub scroll: Option<ScrollCommand>,
    pub karaoke: KaraokeWindow,
}
