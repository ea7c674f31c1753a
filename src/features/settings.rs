//! Engine settings persistence
//!
//! Tunable timing and gesture constants, saved as JSON next to other
//! per-user configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Word timing windows
    #[serde(default)]
    pub sync: SyncSettings,
    /// Line grouping rules for aligned words
    #[serde(default)]
    pub grouping: GroupingSettings,
    /// Autoscroll behaviour
    #[serde(default)]
    pub autoscroll: AutoscrollSettings,
    /// Tap and swipe recognition
    #[serde(default)]
    pub gesture: GestureSettings,
}

/// Timing windows applied to every word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// A word lights up this long before its start time
    #[serde(default = "default_word_look_ahead_ms")]
    pub word_look_ahead_ms: u64,
    /// A word stays active this long after its end time
    #[serde(default = "default_word_end_tolerance_ms")]
    pub word_end_tolerance_ms: u64,
}

fn default_word_look_ahead_ms() -> u64 {
    60
}

fn default_word_end_tolerance_ms() -> u64 {
    150
}

impl SyncSettings {
    pub fn look_ahead_s(&self) -> f64 {
        self.word_look_ahead_ms as f64 / 1000.0
    }

    pub fn end_tolerance_s(&self) -> f64 {
        self.word_end_tolerance_ms as f64 / 1000.0
    }
}

/// How aligned words are grouped into display lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingSettings {
    /// A line is closed once it holds this many words
    #[serde(default = "default_max_words_per_line")]
    pub max_words_per_line: usize,
    /// A word ending in any of these characters closes its line
    #[serde(default = "default_break_punctuation")]
    pub break_punctuation: String,
}

fn default_max_words_per_line() -> usize {
    6
}

fn default_break_punctuation() -> String {
    ".!?;".to_string()
}

impl GroupingSettings {
    /// Check whether `word` ends with line-breaking punctuation
    pub fn ends_line(&self, word: &str) -> bool {
        word.trim_end()
            .chars()
            .next_back()
            .is_some_and(|c| self.break_punctuation.contains(c))
    }
}

/// Autoscroll behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoscrollSettings {
    /// How long autoscroll stays off after the user scrolls or touches
    #[serde(default = "default_suspend_ms")]
    pub suspend_ms: u64,
    /// Scroll events within this window after a programmatic scroll are ours
    #[serde(default = "default_programmatic_guard_ms")]
    pub programmatic_guard_ms: u64,
    /// Where the active line is placed, as a fraction of viewport height
    #[serde(default = "default_align_fraction")]
    pub align_fraction: f32,
    /// No scroll while the active line sits inside this band
    #[serde(default = "default_comfort_band_top")]
    pub comfort_band_top: f32,
    #[serde(default = "default_comfort_band_bottom")]
    pub comfort_band_bottom: f32,
    /// Scroll deltas at or below this are jitter, not user intent
    #[serde(default = "default_user_scroll_threshold_px")]
    pub user_scroll_threshold_px: f32,
}

fn default_suspend_ms() -> u64 {
    5000
}

fn default_programmatic_guard_ms() -> u64 {
    400
}

fn default_align_fraction() -> f32 {
    0.3
}

fn default_comfort_band_top() -> f32 {
    0.2
}

fn default_comfort_band_bottom() -> f32 {
    0.5
}

fn default_user_scroll_threshold_px() -> f32 {
    5.0
}

impl AutoscrollSettings {
    pub fn suspend_duration(&self) -> Duration {
        Duration::from_millis(self.suspend_ms)
    }

    pub fn programmatic_guard(&self) -> Duration {
        Duration::from_millis(self.programmatic_guard_ms)
    }
}

/// Tap and swipe recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureSettings {
    /// Maximum gap between the two taps of a double tap
    #[serde(default = "default_double_tap_delay_ms")]
    pub double_tap_delay_ms: u64,
    /// Seconds skipped by a double tap
    #[serde(default = "default_seek_amount_s")]
    pub seek_amount_s: f64,
    /// Horizontal travel that makes a drag a swipe
    #[serde(default = "default_swipe_distance_px")]
    pub swipe_distance_px: f32,
    /// Horizontal release velocity that makes a drag a swipe
    #[serde(default = "default_swipe_velocity_px_s")]
    pub swipe_velocity_px_s: f32,
}

fn default_double_tap_delay_ms() -> u64 {
    300
}

fn default_seek_amount_s() -> f64 {
    10.0
}

fn default_swipe_distance_px() -> f32 {
    80.0
}

fn default_swipe_velocity_px_s() -> f32 {
    400.0
}

impl GestureSettings {
    pub fn double_tap_delay(&self) -> Duration {
        Duration::from_millis(self.double_tap_delay_ms)
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            word_look_ahead_ms: default_word_look_ahead_ms(),
            word_end_tolerance_ms: default_word_end_tolerance_ms(),
        }
    }
}

impl Default for GroupingSettings {
    fn default() -> Self {
        Self {
            max_words_per_line: default_max_words_per_line(),
            break_punctuation: default_break_punctuation(),
        }
    }
}

impl Default for AutoscrollSettings {
    fn default() -> Self {
        Self {
            suspend_ms: default_suspend_ms(),
            programmatic_guard_ms: default_programmatic_guard_ms(),
            align_fraction: default_align_fraction(),
            comfort_band_top: default_comfort_band_top(),
            comfort_band_bottom: default_comfort_band_bottom(),
            user_scroll_threshold_px: default_user_scroll_threshold_px(),
        }
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            double_tap_delay_ms: default_double_tap_delay_ms(),
            seek_amount_s: default_seek_amount_s(),
            swipe_distance_px: default_swipe_distance_px(),
            swipe_velocity_px_s: default_swipe_velocity_px_s(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lyricsync", "Lyricsync")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        Self::file_path()
            .and_then(|path| match Self::load_from_file(&path) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::debug!("Using default settings ({}): {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(path) = Self::file_path() {
            self.save_to_file(&path)
        } else {
            Err(SettingsError::Io(
                "Could not determine config directory".to_string(),
            ))
        }
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        tracing::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sync.word_look_ahead_ms, 60);
        assert_eq!(settings.sync.word_end_tolerance_ms, 150);
        assert_eq!(settings.grouping.max_words_per_line, 6);
        assert_eq!(settings.autoscroll.suspend_duration(), Duration::from_secs(5));
        assert_eq!(settings.gesture.double_tap_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"sync": {"word_look_ahead_ms": 100}}"#).unwrap();
        assert_eq!(settings.sync.word_look_ahead_ms, 100);
        assert_eq!(settings.sync.word_end_tolerance_ms, 150);
        assert_eq!(settings.gesture, GestureSettings::default());
    }

    #[test]
    fn test_ends_line() {
        let grouping = GroupingSettings::default();
        assert!(grouping.ends_line("done."));
        assert!(grouping.ends_line("why?"));
        assert!(grouping.ends_line("wait;"));
        assert!(!grouping.ends_line("and,"));
        assert!(!grouping.ends_line("word"));
        assert!(!grouping.ends_line(""));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir()
            .join(format!("lyricsync-settings-{}", std::process::id()))
            .join("settings.json");

        let mut settings = Settings::default();
        settings.gesture.seek_amount_s = 5.0;
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load_from_file(Path::new("/nonexistent/lyricsync.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
