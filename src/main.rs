//! Lyricsync demo - plays a word-alignment file against a simulated clock
//!
//! Usage: `lyricsync <dir>/<track_id>.json`

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;

use lyricsync::app::{App, Effect, Message};
use lyricsync::audio::{Playback, SharedPlaybackState};
use lyricsync::features::Settings;
use lyricsync::features::lyrics::{AlignmentSource, DirectorySource};

/// Simulated frame interval
const FRAME: Duration = Duration::from_millis(50);
/// Simulated layout: fixed line pitch in a fixed viewport
const LINE_PITCH: f32 = 48.0;
const VIEWPORT_HEIGHT: f32 = 480.0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: lyricsync <dir>/<track_id>.json")?;
    let track_id: u64 = path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.parse().ok())
        .with_context(|| format!("{} is not named <track_id>.json", path.display()))?;
    let dir = path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let settings = Settings::load();
    let playback = SharedPlaybackState::new();
    let mut app = App::new(settings, playback.clone(), DirectorySource::new(dir), None);

    let effects = app.update(Message::TrackChanged(track_id));
    run_effects(&mut app, effects).await;

    if let Some(error) = &app.ui.lyrics.load_error {
        anyhow::bail!("Could not load lyrics: {}", error);
    }

    let lines = app.ui.lyrics.engine.lines().to_vec();
    if lines.is_empty() {
        match app.ui.lyrics.engine.content().plain_text() {
            text if text.is_empty() => tracing::info!("No lyrics available"),
            text => tracing::info!("Unsynced lyrics:\n{}", text),
        }
        return Ok(());
    }

    let end_s = lines.last().map(|l| l.end_s()).unwrap_or_default() + 1.0;
    playback.load_track(Duration::from_secs_f64(end_s));
    app.update(Message::LayoutMeasured {
        viewport_height: VIEWPORT_HEIGHT,
        line_tops: (0..lines.len()).map(|i| i as f32 * LINE_PITCH).collect(),
    });

    let mut interval = tokio::time::interval(FRAME);
    let mut last_word = None;
    while playback.is_playing() {
        interval.tick().await;
        playback.advance(FRAME);

        let effects = app.update(Message::Tick(Instant::now()));
        run_effects(&mut app, effects).await;

        let Some(frame) = &app.ui.lyrics.frame else {
            continue;
        };
        let active = frame.snapshot.active_word();
        if active != last_word {
            last_word = active;
            if let Some((line, word)) = active {
                let text = &lines[line];
                tracing::info!(
                    "[{:>7.2}s] line {:>3} | {} | {}",
                    frame.snapshot.current_time,
                    line,
                    text.word(word).map(|w| w.word()).unwrap_or_default(),
                    text.text()
                );
            }
        }
    }

    tracing::info!("Playback finished");
    Ok(())
}

/// Drive effects to completion, feeding follow-up messages back in
async fn run_effects<S>(app: &mut App<SharedPlaybackState, S>, effects: Vec<Effect>)
where
    S: AlignmentSource + Send + Sync + 'static,
{
    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::Perform(future) => {
                let message = future.await;
                queue.extend(app.update(message));
            }
            Effect::ScrollTo(command) => {
                tracing::debug!("Scroll to {:.0}px (smooth: {})", command.top, command.smooth);
                // Echo the scroll back like a real container would
                queue.extend(app.update(Message::LyricsScroll {
                    scroll_top: command.top,
                    at: Instant::now(),
                }));
            }
            Effect::SingleTap { x } => tracing::debug!("Single tap at {}", x),
            Effect::NextTrack => tracing::info!("Next track requested"),
            Effect::PreviousTrack => tracing::info!("Previous track requested"),
        }
    }
}
