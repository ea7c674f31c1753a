//! Frame tick and seek message handlers

use crate::app::message::{Effect, Message};
use crate::app::state::App;
use crate::audio::Playback;
use crate::features::lyrics::AlignmentSource;
use crate::features::lyrics::engine::GestureOutcome;

impl<P, S> App<P, S>
where
    P: Playback,
    S: AlignmentSource + Send + Sync + 'static,
{
    /// Handle playback-related messages
    pub fn handle_playback(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            &Message::Tick(now) => {
                let lyrics = &mut self.ui.lyrics;
                let frame = lyrics.engine.tick(&self.core.playback, &lyrics.layout, now);

                let mut effects = Vec::new();
                if let Some(command) = frame.scroll {
                    lyrics.layout.scroll_top = command.top;
                    effects.push(Effect::ScrollTo(command));
                }
                if let Some(outcome) = lyrics.engine.poll_gestures(now) {
                    effects.extend(Self::gesture_effect(outcome));
                }
                lyrics.frame = Some(frame);
                Some(effects)
            }

            &Message::WordClicked { line, word } => {
                if let Some(target) =
                    self.ui
                        .lyrics
                        .engine
                        .seek_to_word(line, word, &self.core.playback)
                {
                    tracing::info!("Seek to word {}:{} at {:.2}s", line, word, target);
                }
                Some(Vec::new())
            }

            &Message::LineClicked(line) => {
                if let Some(target) = self.ui.lyrics.engine.seek_to_line(line, &self.core.playback) {
                    tracing::info!("Seek to line {} at {:.2}s", line, target);
                }
                Some(Vec::new())
            }

            &Message::SurfaceTap { x, width, at } => {
                let outcomes = self
                    .ui
                    .lyrics
                    .engine
                    .handle_tap(x, width, at, &self.core.playback);
                Some(
                    outcomes
                        .into_iter()
                        .filter_map(Self::gesture_effect)
                        .collect(),
                )
            }

            &Message::SurfaceDragEnd { dx, velocity_x } => Some(
                self.ui
                    .lyrics
                    .engine
                    .handle_drag_end(dx, velocity_x)
                    .and_then(Self::gesture_effect)
                    .into_iter()
                    .collect(),
            ),

            _ => None,
        }
    }

    /// Effect for the host; seeks are already applied to playback
    fn gesture_effect(outcome: GestureOutcome) -> Option<Effect> {
        match outcome {
            GestureOutcome::SingleTap { x } => Some(Effect::SingleTap { x }),
            GestureOutcome::NextTrack => Some(Effect::NextTrack),
            GestureOutcome::PreviousTrack => Some(Effect::PreviousTrack),
            GestureOutcome::Seek { .. } => None,
        }
    }
}
