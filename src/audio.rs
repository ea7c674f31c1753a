//! Playback engine boundary
//!
//! The lyrics engine never decodes audio. It reads the authoritative clock
//! from a [`Playback`] implementation at tick time and sends seeks back.
//!
//! - `Playback`: what the engine needs from a player
//! - `events`: `SharedPlaybackState`, a lock-protected player state usable
//!   from any thread

pub mod events;

use std::time::Duration;

pub use events::SharedPlaybackState;

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Current playback info
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    pub status: PlaybackStatus,
    pub position: Duration,
    pub duration: Duration,
}

/// Player operations the lyrics engine depends on
pub trait Playback {
    /// Current position in seconds
    fn current_time(&self) -> f64;
    /// Track length in seconds, zero when unknown
    fn duration(&self) -> f64;
    fn is_playing(&self) -> bool;
    /// Jump to `position_s`; callers clamp to `[0, duration]` first
    fn seek(&self, position_s: f64);
}
