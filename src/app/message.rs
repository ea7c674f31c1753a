//! Application messages and effects

use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use crate::features::lyrics::LyricsPayload;
use crate::features::lyrics::engine::ScrollCommand;

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    /// No-op message
    Noop,

    // ============ Track ============
    /// The queue loaded a different track
    TrackChanged(u64),
    /// Alignment fetch finished (track id, payload)
    LyricsLoaded(u64, LyricsPayload),
    /// Alignment fetch failed (track id, error)
    LyricsLoadFailed(u64, String),

    // ============ Frame ============
    /// Render frame tick
    Tick(Instant),
    /// Renderer laid out the lyrics
    LayoutMeasured {
        viewport_height: f32,
        /// Top of each line within the scrollable content
        line_tops: Vec<f32>,
    },

    // ============ Scrolling ============
    /// Lyrics container scrolled
    LyricsScroll { scroll_top: f32, at: Instant },
    LyricsTouchStart(Instant),
    LyricsTouchEnd(Instant),
    /// "Follow lyrics" button
    EnableAutoscroll,

    // ============ Seeking ============
    WordClicked { line: usize, word: usize },
    LineClicked(usize),
    /// Tap on the karaoke surface
    SurfaceTap { x: f32, width: f32, at: Instant },
    /// Drag released on the karaoke surface
    SurfaceDragEnd { dx: f32, velocity_x: f32 },
}

/// Future resolving to a follow-up message
pub type MessageFuture = Pin<Box<dyn Future<Output = Message> + Send + 'static>>;

/// Side effects requested by `App::update`
pub enum Effect {
    /// Scroll the lyrics container
    ScrollTo(ScrollCommand),
    /// A tap that did not become a double tap
    SingleTap { x: f32 },
    NextTrack,
    PreviousTrack,
    /// Run the future and feed its message back into `update`
    Perform(MessageFuture),
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScrollTo(command) => f.debug_tuple("ScrollTo").field(command).finish(),
            Self::SingleTap { x } => f.debug_struct("SingleTap").field("x", x).finish(),
            Self::NextTrack => write!(f, "NextTrack"),
            Self::PreviousTrack => write!(f, "PreviousTrack"),
            Self::Perform(_) => f.debug_tuple("Perform").finish_non_exhaustive(),
        }
    }
}
