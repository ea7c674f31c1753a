//! Shared playback state
//!
//! A player thread updates this after each operation; the lyrics engine reads
//! it without blocking on the player.
//!
//! ```text
//! Player (set_*, advance) --[SharedState]--> Engine (Playback trait reads)
//! Player                 <--[seek]---------- Engine
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use super::{Playback, PlaybackInfo, PlaybackStatus};

/// Inner state protected by RwLock
#[derive(Debug, Clone, Default)]
struct PlaybackStateInner {
    status: PlaybackStatus,
    position: Duration,
    duration: Duration,
}

/// Thread-safe shared playback state
#[derive(Clone, Default)]
pub struct SharedPlaybackState {
    inner: Arc<RwLock<PlaybackStateInner>>,
}

impl std::fmt::Debug for SharedPlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("SharedPlaybackState")
            .field("status", &inner.status)
            .field("position", &inner.position)
            .field("duration", &inner.duration)
            .finish()
    }
}

impl SharedPlaybackState {
    /// Create new shared state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current playback info
    pub fn get_info(&self) -> PlaybackInfo {
        let inner = self.inner.read();
        PlaybackInfo {
            status: inner.status,
            position: inner.position,
            duration: inner.duration,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.inner.read().status
    }

    // ---- Update methods (called by the player) ----

    pub fn set_status(&self, status: PlaybackStatus) {
        self.inner.write().status = status;
    }

    pub fn set_position(&self, position: Duration) {
        self.inner.write().position = position;
    }

    pub fn set_duration(&self, duration: Duration) {
        self.inner.write().duration = duration;
    }

    /// Start a new track from the beginning
    pub fn load_track(&self, duration: Duration) {
        let mut inner = self.inner.write();
        inner.duration = duration;
        inner.position = Duration::ZERO;
        inner.status = PlaybackStatus::Playing;
    }

    /// Move the clock forward by `dt` while playing
    ///
    /// Stops at the end of a track with known duration.
    pub fn advance(&self, dt: Duration) {
        let mut inner = self.inner.write();
        if inner.status != PlaybackStatus::Playing {
            return;
        }

        inner.position += dt;
        if !inner.duration.is_zero() && inner.position >= inner.duration {
            inner.position = inner.duration;
            inner.status = PlaybackStatus::Stopped;
            tracing::debug!("Playback finished at {:?}", inner.duration);
        }
    }
}

impl Playback for SharedPlaybackState {
    fn current_time(&self) -> f64 {
        self.inner.read().position.as_secs_f64()
    }

    fn duration(&self) -> f64 {
        self.inner.read().duration.as_secs_f64()
    }

    fn is_playing(&self) -> bool {
        self.inner.read().status == PlaybackStatus::Playing
    }

    fn seek(&self, position_s: f64) {
        let position = Duration::try_from_secs_f64(position_s.max(0.0)).unwrap_or_default();
        tracing::debug!("Seek to {:.3}s", position_s);
        self.inner.write().position = position;
    }
}
