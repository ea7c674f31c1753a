//! Word and line highlight state
//!
//! Derived purely from a [`SyncSnapshot`]; there are no transitions to drive.
//! Exactly one word can be active at a time: the snapshot's active word.

use super::clock::{is_past, word_progress};
use super::types::{KaraokeWindow, LineState, LineStyle, SyncSnapshot, WordState};
use crate::features::lyrics::parser::Line;
use crate::features::settings::SyncSettings;

/// Read-only view over one frame's lyrics state
#[derive(Debug, Clone, Copy)]
pub struct Highlighter<'a> {
    lines: &'a [Line],
    snapshot: SyncSnapshot,
    settings: &'a SyncSettings,
}

impl<'a> Highlighter<'a> {
    pub fn new(lines: &'a [Line], snapshot: SyncSnapshot, settings: &'a SyncSettings) -> Self {
        Self {
            lines,
            snapshot,
            settings,
        }
    }

    pub fn snapshot(&self) -> &SyncSnapshot {
        &self.snapshot
    }

    /// Classify one word; out-of-range indices are `Future`
    ///
    /// Words before the active word are `Past` even inside their end
    /// tolerance, so a word never reads as future right after it was active.
    pub fn classify(&self, line_index: usize, word_index: usize) -> WordState {
        if self.snapshot.active_word() == Some((line_index, word_index)) {
            return WordState::Active;
        }

        let Some(word) = self
            .lines
            .get(line_index)
            .and_then(|line| line.word(word_index))
        else {
            return WordState::Future;
        };

        let before_active = match self.snapshot.active_line_index {
            Some(active) if line_index < active => true,
            Some(active) if line_index == active => self
                .snapshot
                .active_word_index
                .is_some_and(|w| word_index < w),
            _ => false,
        };

        if before_active || is_past(word, self.snapshot.current_time, self.settings) {
            WordState::Past
        } else {
            WordState::Future
        }
    }

    pub fn line_state(&self, line_index: usize) -> LineState {
        match self.snapshot.active_line_index {
            Some(active) if line_index < active => LineState::Past,
            Some(active) if line_index == active => LineState::Active,
            _ => LineState::Future,
        }
    }

    pub fn line_style(&self, line_index: usize) -> LineStyle {
        LineStyle::for_state(self.line_state(line_index))
    }

    /// Karaoke fill of a word: 1 for past words, 0 for future ones
    pub fn word_progress(&self, line_index: usize, word_index: usize) -> f32 {
        match self.classify(line_index, word_index) {
            WordState::Past => 1.0,
            WordState::Future => 0.0,
            WordState::Active => self
                .lines
                .get(line_index)
                .and_then(|line| line.word(word_index))
                .map(|word| word_progress(word, self.snapshot.current_time, self.settings))
                .unwrap_or(0.0),
        }
    }

    /// Unclamped seek target for a clicked word
    pub fn word_seek_target(&self, line_index: usize, word_index: usize) -> Option<f64> {
        self.lines
            .get(line_index)?
            .word(word_index)
            .map(|word| word.start_s())
    }

    /// Unclamped seek target for a clicked line
    pub fn line_seek_target(&self, line_index: usize) -> Option<f64> {
        self.lines.get(line_index).map(Line::start_s)
    }

    /// Previous, active and next lines around the active one
    pub fn karaoke_window(&self) -> KaraokeWindow {
        karaoke_window(self.lines.len(), self.snapshot.active_line_index)
    }
}

/// Three-line window for `line_count` lines
///
/// With no active line the window shows only what comes next.
pub fn karaoke_window(line_count: usize, active: Option<usize>) -> KaraokeWindow {
    if line_count == 0 {
        return KaraokeWindow::default();
    }

    match active {
        Some(active) if active < line_count => KaraokeWindow {
            previous: active.checked_sub(1),
            active: Some(active),
            next: Some(active + 1).filter(|&n| n < line_count),
        },
        _ => KaraokeWindow {
            previous: None,
            active: None,
            next: Some(0),
        },
    }
}
