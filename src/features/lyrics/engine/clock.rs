//! Synchronization clock
//!
//! A pure function from `(lines, playback time)` to [`SyncSnapshot`]. It is
//! recomputed from scratch every tick, so seeks in either direction need no
//! special handling.
//!
//! ## Word window
//!
//! ```text
//! t + look_ahead >= start_s  &&  t + look_ahead <= end_s + end_tolerance
//! ```
//!
//! A word is past once `t > end_s + end_tolerance`.

use super::types::SyncSnapshot;
use crate::features::lyrics::parser::{AlignedWord, Line};
use crate::features::settings::SyncSettings;

/// Playback time with NaN treated as the start of the track
fn sanitize(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t }
}

/// Check whether the look-ahead-adjusted time falls in a word's window
pub fn window_contains(word: &AlignedWord, t: f64, settings: &SyncSettings) -> bool {
    let adjusted = sanitize(t) + settings.look_ahead_s();
    adjusted >= word.start_s() && adjusted <= word.end_s() + settings.end_tolerance_s()
}

/// Check whether a word has finished, tolerance included
pub fn is_past(word: &AlignedWord, t: f64, settings: &SyncSettings) -> bool {
    sanitize(t) > word.end_s() + settings.end_tolerance_s()
}

/// Compute the active line and word at playback time `t`
pub fn compute_snapshot(lines: &[Line], t: f64, settings: &SyncSettings) -> SyncSnapshot {
    let t = sanitize(t);
    let adjusted = t + settings.look_ahead_s();

    // Lines starting after the adjusted time cannot hold an active word
    let started = lines.partition_point(|line| line.start_s() <= adjusted);
    if started == 0 {
        return SyncSnapshot::idle(t);
    }

    let matched_line = lines[..started].iter().position(|line| {
        line.words()
            .iter()
            .any(|word| window_contains(word, t, settings))
    });

    // Between words the most recently started line stays active
    let line_index = matched_line.unwrap_or(started - 1);

    let word_index = lines[line_index]
        .words()
        .iter()
        .rposition(|word| window_contains(word, t, settings));

    SyncSnapshot {
        current_time: t,
        active_line_index: Some(line_index),
        active_word_index: word_index,
    }
}

/// Fill fraction of a word for karaoke rendering, in `[0, 1]`
pub fn word_progress(word: &AlignedWord, t: f64, settings: &SyncSettings) -> f32 {
    let adjusted = sanitize(t) + settings.look_ahead_s();
    let duration = word.duration_s();

    if duration <= 0.0 {
        return if adjusted >= word.start_s() { 1.0 } else { 0.0 };
    }

    ((adjusted - word.start_s()) / duration).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start: f64, end: f64) -> AlignedWord {
        AlignedWord::new(text, start, end).unwrap()
    }

    fn line(words: &[(&str, f64, f64)]) -> Line {
        Line::new(words.iter().map(|&(w, s, e)| word(w, s, e)).collect()).unwrap()
    }

    fn hello_world() -> Vec<Line> {
        vec![line(&[("Hello", 0.0, 0.5), ("world", 0.5, 1.0)])]
    }

    fn song() -> Vec<Line> {
        vec![
            line(&[("one", 1.0, 1.4), ("two", 1.4, 2.0)]),
            line(&[("three", 3.0, 3.5), ("four", 4.0, 4.5)]),
            line(&[("five", 6.0, 6.5)]),
        ]
    }

    #[test]
    fn test_clean_alignment_scenario() {
        let lines = hello_world();
        let settings = SyncSettings::default();

        let s = compute_snapshot(&lines, 0.2, &settings);
        assert_eq!(s.active_line_index, Some(0));
        assert_eq!(s.active_word_index, Some(0));

        let s = compute_snapshot(&lines, 0.7, &settings);
        assert_eq!(s.active_line_index, Some(0));
        assert_eq!(s.active_word_index, Some(1));
    }

    #[test]
    fn test_before_first_line() {
        let s = compute_snapshot(&song(), 0.5, &SyncSettings::default());
        assert_eq!(s, SyncSnapshot::idle(0.5));
    }

    #[test]
    fn test_look_ahead_lights_word_early() {
        let s = compute_snapshot(&song(), 0.95, &SyncSettings::default());
        assert_eq!(s.active_word(), Some((0, 0)));
    }

    #[test]
    fn test_in_line_gap_keeps_line_without_word() {
        // "three" ends at 3.5 (+0.15 tolerance), "four" starts at 4.0 (-0.06 look-ahead)
        let s = compute_snapshot(&song(), 3.8, &SyncSettings::default());
        assert_eq!(s.active_line_index, Some(1));
        assert_eq!(s.active_word_index, None);
    }

    #[test]
    fn test_gap_between_lines_keeps_previous_line() {
        let s = compute_snapshot(&song(), 5.0, &SyncSettings::default());
        assert_eq!(s.active_line_index, Some(1));
        assert_eq!(s.active_word_index, None);

        let s = compute_snapshot(&song(), 100.0, &SyncSettings::default());
        assert_eq!(s.active_line_index, Some(2));
    }

    #[test]
    fn test_zero_gap_words_single_active() {
        let lines = hello_world();
        let settings = SyncSettings::default();

        // Both windows overlap here; the later word wins
        let s = compute_snapshot(&lines, 0.45, &settings);
        assert_eq!(s.active_word_index, Some(1));

        for step in 0..=120 {
            let t = step as f64 * 0.01;
            let s = compute_snapshot(&lines, t, &settings);
            let containing: Vec<usize> = lines[0]
                .words()
                .iter()
                .enumerate()
                .filter(|(_, w)| window_contains(w, t, &settings))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(s.active_word_index, containing.last().copied(), "t = {}", t);
        }
    }

    #[test]
    fn test_zero_gap_line_always_has_active_word() {
        let lines = hello_world();
        let settings = SyncSettings::default();

        // Covered span in ms: 0 - 60 look-ahead up to 1000 + 150 tolerance - 60
        for ms in -60..=1089 {
            let t = ms as f64 / 1000.0;
            let s = compute_snapshot(&lines, t, &settings);
            assert_eq!(s.active_line_index, Some(0), "t = {}", t);
            assert!(s.active_word_index.is_some(), "no active word at t = {}", t);
        }
    }

    #[test]
    fn test_active_line_is_monotonic() {
        let lines = song();
        let settings = SyncSettings::default();
        let mut previous: Option<usize> = None;
        for step in 0..=800 {
            let t = step as f64 * 0.01;
            let current = compute_snapshot(&lines, t, &settings).active_line_index;
            assert!(current >= previous, "regressed at t = {}", t);
            previous = current;
        }
    }

    #[test]
    fn test_seek_consistency() {
        let lines = song();
        let settings = SyncSettings::default();

        // Walk forward, then seek backward and recompute
        let _ = compute_snapshot(&lines, 6.2, &settings);
        let after_seek = compute_snapshot(&lines, 1.5, &settings);
        let direct = compute_snapshot(&lines, 1.5, &settings);
        assert_eq!(after_seek, direct);
        assert_eq!(direct.active_word(), Some((0, 1)));
    }

    #[test]
    fn test_nan_time_treated_as_zero() {
        let s = compute_snapshot(&hello_world(), f64::NAN, &SyncSettings::default());
        assert_eq!(s.current_time, 0.0);
        assert_eq!(s.active_word(), Some((0, 0)));
    }

    #[test]
    fn test_empty_lines() {
        let s = compute_snapshot(&[], 3.0, &SyncSettings::default());
        assert_eq!(s.active_line_index, None);
    }

    #[test]
    fn test_word_progress() {
        let settings = SyncSettings::default();
        let w = word("long", 1.0, 2.0);
        assert_eq!(word_progress(&w, 0.0, &settings), 0.0);
        assert!((word_progress(&w, 1.44, &settings) - 0.5).abs() < 1e-4);
        assert_eq!(word_progress(&w, 5.0, &settings), 1.0);

        let instant = word("blip", 1.0, 1.0);
        assert_eq!(word_progress(&instant, 0.5, &settings), 0.0);
        assert_eq!(word_progress(&instant, 1.0, &settings), 1.0);
    }

    #[test]
    fn test_is_past() {
        let settings = SyncSettings::default();
        let w = word("x", 0.0, 1.0);
        assert!(!is_past(&w, 1.1, &settings));
        assert!(is_past(&w, 1.2, &settings));
    }
}
