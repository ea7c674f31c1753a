//! Lyrics data types
//!
//! Validated, immutable variants produced by the normalizer.

use serde::{Deserialize, Serialize};

/// A single transcript word annotated with its time span in the audio
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedWord {
    word: String,
    start_s: f64,
    end_s: f64,
}

impl AlignedWord {
    /// Build a validated word
    ///
    /// Returns `None` when the text is empty after trimming, either time is
    /// non-finite or negative, or `end_s < start_s`.
    pub fn new(word: impl AsRef<str>, start_s: f64, end_s: f64) -> Option<Self> {
        let word = word.as_ref().trim();
        if word.is_empty()
            || !start_s.is_finite()
            || !end_s.is_finite()
            || start_s < 0.0
            || end_s < start_s
        {
            return None;
        }

        Some(Self {
            word: word.to_string(),
            start_s,
            end_s,
        })
    }

    /// The word text
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Start time in seconds
    pub fn start_s(&self) -> f64 {
        self.start_s
    }

    /// End time in seconds
    pub fn end_s(&self) -> f64 {
        self.end_s
    }

    pub fn duration_s(&self) -> f64 {
        self.end_s - self.start_s
    }
}

/// A rendering group of consecutive aligned words
///
/// Never empty. This is a layout unit, not a verse or any other
/// musical structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    words: Vec<AlignedWord>,
}

impl Line {
    /// Build a line, `None` if `words` is empty
    pub fn new(words: Vec<AlignedWord>) -> Option<Self> {
        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }

    pub fn words(&self) -> &[AlignedWord] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&AlignedWord> {
        self.words.get(index)
    }

    /// Number of words in this line (always at least 1)
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Lines are never empty; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Effective start time: the first word's start
    pub fn start_s(&self) -> f64 {
        self.words.first().map(|w| w.start_s).unwrap_or(0.0)
    }

    /// Effective end time: the last word's end
    pub fn end_s(&self) -> f64 {
        self.words.last().map(|w| w.end_s).unwrap_or(0.0)
    }

    /// Get the full line text by joining all words
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Cleaned plain-text lyrics, used when no usable alignment exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainLyricsFallback {
    text: String,
}

impl PlainLyricsFallback {
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Normalizer output for a single track
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LyricsContent {
    /// Word-level synchronized lines
    Synced(Vec<Line>),
    /// Unsynchronized text only
    Plain(PlainLyricsFallback),
    /// Nothing to show; the renderer displays an explicit empty state
    #[default]
    Unavailable,
}

impl LyricsContent {
    /// Synced lines, empty for plain or unavailable lyrics
    pub fn lines(&self) -> &[Line] {
        match self {
            LyricsContent::Synced(lines) => lines,
            _ => &[],
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, LyricsContent::Synced(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, LyricsContent::Unavailable)
    }

    /// Total number of synced words
    pub fn word_count(&self) -> usize {
        self.lines().iter().map(Line::len).sum()
    }

    /// Text suitable for copying to the clipboard
    pub fn plain_text(&self) -> String {
        match self {
            LyricsContent::Synced(lines) => lines
                .iter()
                .map(Line::text)
                .collect::<Vec<_>>()
                .join("\n"),
            LyricsContent::Plain(plain) => plain.text.clone(),
            LyricsContent::Unavailable => String::new(),
        }
    }
}

/// Raw payload from the alignment collaborator
///
/// Both fields are optional and unknown fields are ignored. `aligned_words`
/// stays untyped so that one malformed record never invalidates the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsPayload {
    #[serde(default)]
    pub aligned_words: Option<serde_json::Value>,
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl LyricsPayload {
    /// Payload carrying only plain lyrics text
    pub fn from_lyrics(lyrics: impl Into<String>) -> Self {
        Self {
            aligned_words: None,
            lyrics: Some(lyrics.into()),
        }
    }
}

/// One word record before validation
///
/// Every field is optional so that a record with a missing or mistyped
/// field can be represented and rejected individually.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWord {
    pub word: Option<String>,
    pub start_s: Option<f64>,
    pub end_s: Option<f64>,
}

impl RawWord {
    pub fn new(word: impl Into<String>, start_s: f64, end_s: f64) -> Self {
        Self {
            word: Some(word.into()),
            start_s: Some(start_s),
            end_s: Some(end_s),
        }
    }

    /// Extract a record from JSON, leaving missing or mistyped fields empty
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            word: obj.get("word").and_then(|v| v.as_str()).map(str::to_string),
            start_s: obj.get("startS").and_then(|v| v.as_f64()),
            end_s: obj.get("endS").and_then(|v| v.as_f64()),
        }
    }
}
