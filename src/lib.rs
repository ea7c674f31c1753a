//! Lyricsync - word-level lyrics synchronization engine
//!
//! Turns a playback clock plus a word-alignment transcript into highlight
//! state, autoscroll commands and gesture seeks. No GUI toolkit is involved;
//! renderers talk to the engine through traits and messages.

pub mod app;
pub mod audio;
pub mod features;
