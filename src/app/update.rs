//! Message update handlers - thin dispatcher delegating to submodules

mod lyrics;
mod playback;

use super::{App, Effect, Message};
use crate::audio::Playback;
use crate::features::lyrics::AlignmentSource;

impl<P, S> App<P, S>
where
    P: Playback,
    S: AlignmentSource + Send + Sync + 'static,
{
    /// Handle messages by delegating to appropriate submodule handlers
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        // Try each handler in order until one handles the message
        if let Some(effects) = self.handle_lyrics(&message) {
            return effects;
        }
        if let Some(effects) = self.handle_playback(&message) {
            return effects;
        }

        // Default: nothing to do
        Vec::new()
    }
}
