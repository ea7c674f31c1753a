//! Lyrics loading and scroll message handlers
//!
//! Loading is async-first: a track change clears the view immediately and
//! hands back a fetch future. Results for a track that is no longer current
//! are dropped.

use crate::app::message::{Effect, Message};
use crate::app::state::App;
use crate::audio::Playback;
use crate::features::lyrics::{AlignmentSource, LyricsIssue, LyricsPayload, normalize_with_report};

impl<P, S> App<P, S>
where
    P: Playback,
    S: AlignmentSource + Send + Sync + 'static,
{
    /// Handle lyrics related messages
    pub fn handle_lyrics(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            &Message::TrackChanged(track_id) => Some(self.load_lyrics_async(track_id)),

            Message::LyricsLoaded(track_id, payload) => {
                if self.accept_result(*track_id) {
                    self.apply_payload(*track_id, payload);
                }
                Some(Vec::new())
            }

            Message::LyricsLoadFailed(track_id, error) => {
                if self.accept_result(*track_id) {
                    tracing::warn!("Failed to load lyrics for track {}: {}", track_id, error);
                    let lyrics = &mut self.ui.lyrics;
                    lyrics.is_loading = false;
                    lyrics.load_error = Some(error.clone());
                    lyrics.engine.reset();
                }
                Some(Vec::new())
            }

            Message::LayoutMeasured {
                viewport_height,
                line_tops,
            } => {
                let layout = &mut self.ui.lyrics.layout;
                layout.viewport_height = *viewport_height;
                layout.line_tops = line_tops.clone();
                Some(Vec::new())
            }

            &Message::LyricsScroll { scroll_top, at } => {
                self.ui.lyrics.layout.scroll_top = scroll_top;
                if self.ui.lyrics.engine.on_scroll(scroll_top, at) {
                    tracing::debug!("User scroll to {}", scroll_top);
                }
                Some(Vec::new())
            }

            &Message::LyricsTouchStart(at) => {
                self.ui.lyrics.engine.on_touch_start(at);
                Some(Vec::new())
            }

            &Message::LyricsTouchEnd(at) => {
                self.ui.lyrics.engine.on_touch_end(at);
                Some(Vec::new())
            }

            Message::EnableAutoscroll => {
                self.ui.lyrics.engine.enable_autoscroll();
                Some(Vec::new())
            }

            _ => None,
        }
    }

    /// Reset the view for a new track and start fetching its lyrics
    pub fn load_lyrics_async(&mut self, track_id: u64) -> Vec<Effect> {
        tracing::info!("Loading lyrics for track {}", track_id);

        // Clear current state immediately
        let lyrics = &mut self.ui.lyrics;
        lyrics.engine.reset();
        lyrics.frame = None;
        lyrics.issues.clear();
        lyrics.load_error = None;
        lyrics.layout.line_tops.clear();
        lyrics.loading_track_id = Some(track_id);
        lyrics.is_loading = true;

        vec![Effect::Perform(self.lyrics_task(track_id))]
    }

    /// Check that a fetch result belongs to the current track
    fn accept_result(&mut self, track_id: u64) -> bool {
        let current = self.ui.lyrics.loading_track_id;
        if current == Some(track_id) {
            return true;
        }

        let issue = LyricsIssue::StaleFetchResult {
            requested: track_id,
            current,
        };
        tracing::debug!("{}", issue);
        self.ui.lyrics.issues.push(issue);
        false
    }

    fn apply_payload(&mut self, track_id: u64, payload: &LyricsPayload) {
        let report = normalize_with_report(payload, &self.core.settings.grouping);
        for issue in &report.issues {
            tracing::debug!("Track {}: {}", track_id, issue);
        }
        if report.content.is_unavailable() {
            tracing::info!("No lyrics available for track {}", track_id);
        }

        let lyrics = &mut self.ui.lyrics;
        lyrics.is_loading = false;
        lyrics.issues.extend(report.issues);
        lyrics.engine.set_content(report.content);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use parking_lot::Mutex;

    use crate::app::{App, Effect, Message, MessageFuture};
    use crate::audio::SharedPlaybackState;
    use crate::features::Settings;
    use crate::features::lyrics::{AlignmentSource, LyricsIssue, LyricsPayload};

    /// Serves a one-word song per track id and records requests
    #[derive(Default)]
    struct FakeSource {
        requests: Mutex<Vec<u64>>,
    }

    impl AlignmentSource for FakeSource {
        async fn fetch(&self, track_id: u64) -> anyhow::Result<LyricsPayload> {
            self.requests.lock().push(track_id);
            if track_id == 404 {
                anyhow::bail!("no alignment for {}", track_id);
            }
            Ok(serde_json::from_value(serde_json::json!({
                "alignedWords": [
                    {"word": format!("track{}", track_id), "startS": 0.0, "endS": 1.0}
                ]
            }))?)
        }
    }

    fn app() -> App<SharedPlaybackState, FakeSource> {
        let playback = SharedPlaybackState::new();
        playback.load_track(Duration::from_secs(30));
        App::new(Settings::default(), playback, FakeSource::default(), None)
    }

    fn take_future(effects: Vec<Effect>) -> MessageFuture {
        match effects.into_iter().next() {
            Some(Effect::Perform(future)) => future,
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    fn first_word(app: &App<SharedPlaybackState, FakeSource>) -> Option<String> {
        app.ui
            .lyrics
            .engine
            .lines()
            .first()
            .and_then(|line| line.word(0))
            .map(|w| w.word().to_string())
    }

    #[tokio::test]
    async fn test_track_load_applies_lyrics() {
        let mut app = app();
        let fetch = take_future(app.update(Message::TrackChanged(1)));
        assert!(app.ui.lyrics.is_loading);

        let loaded = fetch.await;
        app.update(loaded);

        assert!(!app.ui.lyrics.is_loading);
        assert_eq!(first_word(&app).as_deref(), Some("track1"));
    }

    #[tokio::test]
    async fn test_stale_fetch_is_discarded() {
        let mut app = app();
        let first = take_future(app.update(Message::TrackChanged(1)));
        let second = take_future(app.update(Message::TrackChanged(2)));

        // The second fetch resolves first, then the stale one arrives
        let msg = second.await;
        app.update(msg);
        let msg = first.await;
        app.update(msg);

        assert_eq!(first_word(&app).as_deref(), Some("track2"));
        assert_eq!(app.ui.lyrics.loading_track_id, Some(2));
        assert!(app.ui.lyrics.issues.contains(&LyricsIssue::StaleFetchResult {
            requested: 1,
            current: Some(2)
        }));
        assert_eq!(*app.core.source.requests.lock(), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_fetch_failure_shows_empty_state() {
        let mut app = app();
        let fetch = take_future(app.update(Message::TrackChanged(404)));
        app.update(fetch.await);

        assert!(app.ui.lyrics.engine.content().is_unavailable());
        assert!(app.ui.lyrics.load_error.is_some());
        assert!(!app.ui.lyrics.is_loading);
    }

    #[tokio::test]
    async fn test_track_change_clears_previous_lyrics() {
        let mut app = app();
        let fetch = take_future(app.update(Message::TrackChanged(1)));
        app.update(fetch.await);
        assert!(first_word(&app).is_some());

        let _pending = app.update(Message::TrackChanged(2));
        assert!(first_word(&app).is_none());
        assert!(app.ui.lyrics.is_loading);
    }
}
