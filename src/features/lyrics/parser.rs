//! Lyrics parsing module
//!
//! Turns whatever the alignment collaborator returned into one of:
//! - synced lines of aligned words
//! - a cleaned plain-text block
//! - an explicit "unavailable" state
//!
//! Accepted shapes:
//! - `alignedWords`: array of `{ word, startS, endS }` records
//! - `lyrics` holding JSON: `{ alignedWords }`, a bare record array, or
//!   `{ normalLyrics, alignedWords }`
//! - `lyrics` holding plain text with optional section markup

mod aligned;
mod online;
mod tags;
mod types;

pub use aligned::group_into_lines;
pub use online::*;
pub use tags::{clean_plain_lyrics, is_structural_tag};
pub use types::*;

use serde_json::Value;

use super::LyricsIssue;
use crate::features::settings::GroupingSettings;

/// Shape of the `lyrics` text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsFormat {
    /// `{ "alignedWords": [...] }`
    AlignedJson,
    /// `[ { "word", "startS", "endS" }, ... ]`
    BareWordArray,
    /// `{ "normalLyrics": "...", "alignedWords"?: [...] }`
    NormalLyricsJson,
    /// JSON that matches none of the known shapes
    UnknownJson,
    /// Free text, possibly with section markup
    PlainText,
    /// Empty or whitespace only
    Empty,
}

/// Lyrics text field after shape detection
#[derive(Debug, Default)]
struct LyricsField {
    records: Option<Vec<Value>>,
    plain: Option<String>,
}

/// Detect the shape of a lyrics text field without interpreting records
pub fn detect_format(content: &str) -> LyricsFormat {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return LyricsFormat::Empty;
    }
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return LyricsFormat::PlainText;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => format_of_value(&value),
        // Section markup such as "[Verse]" also opens with a bracket
        Err(_) if trimmed.starts_with('[') => LyricsFormat::PlainText,
        Err(_) => LyricsFormat::UnknownJson,
    }
}

fn format_of_value(value: &Value) -> LyricsFormat {
    match value {
        Value::Object(obj) => {
            if obj.get("normalLyrics").is_some_and(Value::is_string) {
                LyricsFormat::NormalLyricsJson
            } else if obj.get("alignedWords").is_some_and(Value::is_array) {
                LyricsFormat::AlignedJson
            } else {
                LyricsFormat::UnknownJson
            }
        }
        // Bad records are dropped later, one at a time
        Value::Array(items) => {
            if items.is_empty() || items.iter().any(|item| item.get("word").is_some()) {
                LyricsFormat::BareWordArray
            } else {
                LyricsFormat::UnknownJson
            }
        }
        _ => LyricsFormat::UnknownJson,
    }
}

fn parse_lyrics_field(content: &str, issues: &mut Vec<LyricsIssue>) -> LyricsField {
    let trimmed = content.trim();
    match detect_format(content) {
        LyricsFormat::Empty => LyricsField::default(),
        LyricsFormat::PlainText => LyricsField {
            records: None,
            plain: Some(content.to_string()),
        },
        LyricsFormat::UnknownJson => {
            let reason = match serde_json::from_str::<Value>(trimmed) {
                Err(e) => e.to_string(),
                Ok(_) => "no alignedWords or normalLyrics".to_string(),
            };
            tracing::warn!("Unparseable lyrics payload: {}", reason);
            issues.push(LyricsIssue::UnparseableLyricsPayload(reason));
            LyricsField::default()
        }
        format => {
            let value = serde_json::from_str::<Value>(trimmed).unwrap_or(Value::Null);
            let records = match (&value, format) {
                (Value::Array(items), LyricsFormat::BareWordArray) => Some(items.clone()),
                _ => value
                    .get("alignedWords")
                    .and_then(Value::as_array)
                    .cloned(),
            };
            let plain = value
                .get("normalLyrics")
                .and_then(Value::as_str)
                .map(str::to_string);
            LyricsField { records, plain }
        }
    }
}

fn group_values(
    values: &[Value],
    settings: &GroupingSettings,
    issues: &mut Vec<LyricsIssue>,
) -> Vec<Line> {
    let records: Vec<RawWord> = values.iter().map(RawWord::from_value).collect();
    group_into_lines(&records, settings, issues)
}

/// Normalizer output with everything that was recovered from
#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    pub content: LyricsContent,
    pub issues: Vec<LyricsIssue>,
}

impl NormalizeReport {
    /// Number of word records dropped as malformed
    pub fn dropped_records(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, LyricsIssue::MalformedWordRecord { .. }))
            .count()
    }
}

/// Normalize a payload into lyrics content
pub fn normalize(payload: &LyricsPayload, settings: &GroupingSettings) -> LyricsContent {
    normalize_with_report(payload, settings).content
}

/// Normalize a payload and keep the list of recovered issues
pub fn normalize_with_report(payload: &LyricsPayload, settings: &GroupingSettings) -> NormalizeReport {
    let mut issues = Vec::new();
    let mut saw_alignment = false;
    let mut lines = Vec::new();

    if let Some(values) = payload.aligned_words.as_ref().and_then(Value::as_array) {
        saw_alignment = true;
        lines = group_values(values, settings, &mut issues);
    }

    let field = payload
        .lyrics
        .as_deref()
        .map(|text| parse_lyrics_field(text, &mut issues))
        .unwrap_or_default();

    if lines.is_empty() {
        if let Some(values) = field.records.as_deref() {
            saw_alignment = true;
            lines = group_values(values, settings, &mut issues);
        }
    }

    if !lines.is_empty() {
        tracing::debug!(
            "Normalized {} lines ({} words)",
            lines.len(),
            lines.iter().map(Line::len).sum::<usize>()
        );
        return NormalizeReport {
            content: LyricsContent::Synced(lines),
            issues,
        };
    }

    if saw_alignment {
        tracing::debug!("Alignment produced no lines, falling back to plain text");
        issues.push(LyricsIssue::EmptyAlignment);
    }

    let cleaned = field
        .plain
        .as_deref()
        .map(clean_plain_lyrics)
        .filter(|text| !text.is_empty());

    let content = match cleaned {
        Some(text) => LyricsContent::Plain(PlainLyricsFallback::new(text)),
        None => LyricsContent::Unavailable,
    };

    NormalizeReport { content, issues }
}

/// Parse a whole payload document, tolerating garbage
///
/// A document that is not a JSON object degrades to an empty payload.
pub fn parse_payload(document: &str) -> LyricsPayload {
    match serde_json::from_str::<LyricsPayload>(document) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Discarding unparseable alignment document: {}", e);
            LyricsPayload::default()
        }
    }
}
