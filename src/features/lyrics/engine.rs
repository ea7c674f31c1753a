//! Lyrics synchronization engine
//!
//! Drives word-level highlighting, autoscroll and gesture seeking from a
//! playback clock. Pull model: the host calls [`LyricsEngine::tick`] once per
//! frame and renders the returned [`FrameState`].
//!
//! ## Key Components
//!
//! - `clock`: `(lines, t) -> SyncSnapshot` with look-ahead and end tolerance
//! - `highlight`: Per-word and per-line state, seek targets, karaoke window
//! - `autoscroll`: Keeps the active line in view, yields to the user
//! - `gesture`: Double-tap seek and swipe track switching

pub mod autoscroll;
pub mod clock;
pub mod gesture;
pub mod highlight;
pub mod types;

// Re-exports for convenience
pub use autoscroll::{AutoscrollController, ScrollCommand, ScrollPolicy, ViewportMetrics};
pub use clock::compute_snapshot;
pub use gesture::{GestureOutcome, GestureSeekHandler};
pub use highlight::{Highlighter, karaoke_window};
pub use types::{FrameState, KaraokeWindow, LineState, LineStyle, SyncSnapshot, WordState};

use std::time::Instant;

use super::issue::clamp_seek;
use super::parser::{LyricsContent, Line};
use crate::audio::Playback;
use crate::features::settings::{Settings, SyncSettings};

/// Main lyrics engine - owns per-track sync, scroll and gesture state
#[derive(Debug, Clone)]
pub struct LyricsEngine {
    sync: SyncSettings,
    /// Lyrics for the current track
    content: LyricsContent,
    /// Snapshot from the most recent tick
    snapshot: SyncSnapshot,
    autoscroll: AutoscrollController,
    gesture: GestureSeekHandler,
}

impl LyricsEngine {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sync: settings.sync.clone(),
            content: LyricsContent::Unavailable,
            snapshot: SyncSnapshot::default(),
            autoscroll: AutoscrollController::new(settings.autoscroll.clone()),
            gesture: GestureSeekHandler::new(settings.gesture.clone()),
        }
    }

    /// Apply new settings without dropping the loaded lyrics
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sync = settings.sync.clone();
        self.autoscroll.set_settings(settings.autoscroll.clone());
        self.gesture.set_settings(settings.gesture.clone());
    }

    /// Replace the lyrics; all per-track state starts over
    pub fn set_content(&mut self, content: LyricsContent) {
        self.reset();
        tracing::info!(
            "Lyrics loaded: {} lines, {} words",
            content.lines().len(),
            content.word_count()
        );
        self.content = content;
    }

    /// Drop the lyrics and all per-track state
    pub fn reset(&mut self) {
        self.content = LyricsContent::Unavailable;
        self.snapshot = SyncSnapshot::default();
        self.autoscroll.reset();
        self.gesture.cancel();
    }

    pub fn content(&self) -> &LyricsContent {
        &self.content
    }

    pub fn lines(&self) -> &[Line] {
        self.content.lines()
    }

    pub fn snapshot(&self) -> &SyncSnapshot {
        &self.snapshot
    }

    pub fn sync_settings(&self) -> &SyncSettings {
        &self.sync
    }

    /// Sample the playback clock and produce this frame's state
    pub fn tick(
        &mut self,
        playback: &impl Playback,
        viewport: &impl ViewportMetrics,
        now: Instant,
    ) -> FrameState {
        let is_playing = playback.is_playing();
        let snapshot = compute_snapshot(self.content.lines(), playback.current_time(), &self.sync);

        if snapshot.active_line_index != self.snapshot.active_line_index {
            tracing::trace!("Active line -> {:?}", snapshot.active_line_index);
        }
        self.snapshot = snapshot;

        let scroll = self
            .autoscroll
            .update(snapshot.active_line_index, is_playing, viewport, now);

        FrameState {
            snapshot,
            is_playing,
            scroll,
            karaoke: karaoke_window(self.content.lines().len(), snapshot.active_line_index),
        }
    }

    /// Highlight view over the latest snapshot
    pub fn highlighter(&self) -> Highlighter<'_> {
        Highlighter::new(self.content.lines(), self.snapshot, &self.sync)
    }

    /// Seek to a clicked word; returns the clamped target
    pub fn seek_to_word(
        &self,
        line_index: usize,
        word_index: usize,
        playback: &impl Playback,
    ) -> Option<f64> {
        let target = self.highlighter().word_seek_target(line_index, word_index)?;
        Some(Self::seek_clamped(target, playback))
    }

    /// Seek to a clicked line; returns the clamped target
    pub fn seek_to_line(&self, line_index: usize, playback: &impl Playback) -> Option<f64> {
        let target = self.highlighter().line_seek_target(line_index)?;
        Some(Self::seek_clamped(target, playback))
    }

    fn seek_clamped(target: f64, playback: &impl Playback) -> f64 {
        let (clamped, issue) = clamp_seek(target, playback.duration());
        if let Some(issue) = issue {
            tracing::debug!("{}", issue);
        }
        playback.seek(clamped);
        clamped
    }

    /// Register a tap on the lyrics surface; double-tap seeks are applied
    pub fn handle_tap(
        &mut self,
        x: f32,
        width: f32,
        now: Instant,
        playback: &impl Playback,
    ) -> Vec<GestureOutcome> {
        let outcomes = self.gesture.on_tap(
            x,
            width,
            now,
            playback.current_time(),
            playback.duration(),
        );
        for outcome in &outcomes {
            if let GestureOutcome::Seek { target_s, .. } = outcome {
                playback.seek(*target_s);
            }
        }
        outcomes
    }

    /// Resolve a tap whose double-tap window has lapsed
    pub fn poll_gestures(&mut self, now: Instant) -> Option<GestureOutcome> {
        self.gesture.poll(now)
    }

    pub fn handle_drag_end(&mut self, dx: f32, velocity_x: f32) -> Option<GestureOutcome> {
        self.gesture.on_drag_end(dx, velocity_x)
    }

    /// Report a container scroll; `true` if it suspended autoscroll
    pub fn on_scroll(&mut self, scroll_top: f32, now: Instant) -> bool {
        self.autoscroll.on_scroll(scroll_top, now)
    }

    pub fn on_touch_start(&mut self, now: Instant) {
        self.autoscroll.on_touch_start(now);
    }

    pub fn on_touch_end(&mut self, now: Instant) {
        self.autoscroll.on_touch_end(now);
    }

    /// Manual "follow lyrics" control
    pub fn enable_autoscroll(&mut self) {
        self.autoscroll.resume();
    }

    pub fn scroll_policy(&self) -> &ScrollPolicy {
        self.autoscroll.policy()
    }
}

impl Default for LyricsEngine {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
