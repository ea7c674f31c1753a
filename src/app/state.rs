//! Application state definitions

use std::sync::Arc;

use crate::features::Settings;
use crate::features::lyrics::engine::{FrameState, ViewportMetrics};
use crate::features::lyrics::{LyricsEngine, LyricsIssue, PayloadCache};

/// Main application state
pub struct App<P, S> {
    /// Core infrastructure (settings, player, alignment source)
    pub core: CoreState<P, S>,
    /// UI state
    pub ui: UiState,
}

/// Core infrastructure & services
pub struct CoreState<P, S> {
    pub settings: Settings,
    /// Authoritative playback clock
    pub playback: P,
    /// Alignment collaborator, shared with in-flight fetches
    pub source: Arc<S>,
    pub cache: Option<PayloadCache>,
}

/// UI state
#[derive(Debug, Default)]
pub struct UiState {
    pub lyrics: LyricsState,
}

/// Lyrics view state for the current track
#[derive(Debug, Default)]
pub struct LyricsState {
    pub engine: LyricsEngine,
    /// Track whose lyrics are loading or loaded; late results for other ids are dropped
    pub loading_track_id: Option<u64>,
    pub is_loading: bool,
    pub load_error: Option<String>,
    /// Problems recovered from while loading the current track
    pub issues: Vec<LyricsIssue>,
    pub layout: LyricsLayout,
    /// Most recent frame
    pub frame: Option<FrameState>,
}

/// Last measurements reported by the renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricsLayout {
    pub viewport_height: f32,
    pub scroll_top: f32,
    /// Top of each line within the scrollable content
    pub line_tops: Vec<f32>,
}

impl ViewportMetrics for LyricsLayout {
    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn line_offset(&self, line_index: usize) -> Option<f32> {
        self.line_tops
            .get(line_index)
            .map(|top| top - self.scroll_top)
    }
}

impl LyricsState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            engine: LyricsEngine::new(settings),
            ..Default::default()
        }
    }
}
