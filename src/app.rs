//! Lyrics session
//!
//! Message-driven owner of the engine for one player: track loads, stale
//! fetch guarding and per-tick wiring of clock, highlight and autoscroll.
//! `update` never blocks; fetches come back as `Effect::Perform` futures.

mod message;
mod state;
mod update;

use std::sync::Arc;

pub use message::{Effect, Message, MessageFuture};
pub use state::{App, CoreState, LyricsLayout, LyricsState, UiState};

use crate::audio::Playback;
use crate::features::Settings;
use crate::features::lyrics::{AlignmentSource, PayloadCache, fetch_lyrics};

impl<P, S> App<P, S>
where
    P: Playback,
    S: AlignmentSource + Send + Sync + 'static,
{
    /// Create a session around a player and an alignment source
    pub fn new(settings: Settings, playback: P, source: S, cache: Option<PayloadCache>) -> Self {
        let ui = UiState {
            lyrics: LyricsState::new(&settings),
        };
        let core = CoreState {
            settings,
            playback,
            source: Arc::new(source),
            cache,
        };

        Self { core, ui }
    }

    /// Future that fetches lyrics for `track_id` and reports back
    pub fn lyrics_task(&self, track_id: u64) -> MessageFuture {
        let source = Arc::clone(&self.core.source);
        let cache = self.core.cache.clone();

        Box::pin(async move {
            match fetch_lyrics(source.as_ref(), cache.as_ref(), track_id).await {
                Ok(payload) => Message::LyricsLoaded(track_id, payload),
                Err(e) => Message::LyricsLoadFailed(track_id, e.to_string()),
            }
        })
    }
}
