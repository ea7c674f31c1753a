//! Word-timestamp validation and line grouping
//!
//! Records are validated one by one; a bad record is dropped without
//! affecting its neighbours. Surviving words are grouped into lines at
//! sentence punctuation, at the per-line word limit, or at a line break
//! embedded in a word token.

use super::tags::is_structural_tag;
use super::types::{AlignedWord, Line, RawWord};
use crate::features::lyrics::LyricsIssue;
use crate::features::settings::GroupingSettings;

/// A validated record whose text may still contain line breaks
#[derive(Debug, Clone)]
struct Token {
    text: String,
    start_s: f64,
    end_s: f64,
}

fn validate(index: usize, raw: &RawWord) -> Result<Token, LyricsIssue> {
    let malformed = |reason| LyricsIssue::MalformedWordRecord { index, reason };

    let text = raw
        .word
        .as_deref()
        .ok_or_else(|| malformed("word is missing or not a string"))?;
    let start_s = raw
        .start_s
        .ok_or_else(|| malformed("startS is missing or not a number"))?;
    let end_s = raw
        .end_s
        .ok_or_else(|| malformed("endS is missing or not a number"))?;

    if !start_s.is_finite() || !end_s.is_finite() {
        return Err(malformed("non-finite timestamp"));
    }
    if start_s < 0.0 {
        return Err(malformed("negative startS"));
    }
    if end_s < start_s {
        return Err(malformed("endS precedes startS"));
    }
    // A bare line break is a layout marker, not an empty word
    if text.trim().is_empty() && !text.contains('\n') {
        return Err(malformed("empty word"));
    }

    Ok(Token {
        text: text.to_string(),
        start_s,
        end_s,
    })
}

/// Validate records and group the survivors into lines
///
/// Dropped records are appended to `issues`.
pub fn group_into_lines(
    records: &[RawWord],
    settings: &GroupingSettings,
    issues: &mut Vec<LyricsIssue>,
) -> Vec<Line> {
    let mut tokens: Vec<Token> = Vec::with_capacity(records.len());
    for (index, raw) in records.iter().enumerate() {
        match validate(index, raw) {
            Ok(token) => tokens.push(token),
            Err(issue) => {
                tracing::debug!("Dropping word record: {}", issue);
                issues.push(issue);
            }
        }
    }

    tokens.retain(|t| !is_structural_tag(&t.text));

    // Stable: equal start times keep source order
    tokens.sort_by(|a, b| a.start_s.total_cmp(&b.start_s));

    let mut lines = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        if token.text.contains('\n') {
            let mut parts = token.text.split('\n').peekable();
            while let Some(part) = parts.next() {
                if !is_structural_tag(part) {
                    if let Some(word) = AlignedWord::new(part, token.start_s, token.end_s) {
                        push_word(word, &mut current, &mut lines, settings);
                    }
                }
                if parts.peek().is_some() {
                    flush_line(&mut current, &mut lines);
                }
            }
        } else if let Some(word) = AlignedWord::new(&token.text, token.start_s, token.end_s) {
            push_word(word, &mut current, &mut lines, settings);
        }
    }
    flush_line(&mut current, &mut lines);

    lines
}

fn push_word(
    word: AlignedWord,
    current: &mut Vec<AlignedWord>,
    lines: &mut Vec<Line>,
    settings: &GroupingSettings,
) {
    let ends_line = settings.ends_line(word.word());
    current.push(word);
    if ends_line || current.len() >= settings.max_words_per_line.max(1) {
        flush_line(current, lines);
    }
}

fn flush_line(current: &mut Vec<AlignedWord>, lines: &mut Vec<Line>) {
    if let Some(line) = Line::new(std::mem::take(current)) {
        lines.push(line);
    }
}
