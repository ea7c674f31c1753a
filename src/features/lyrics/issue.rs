//! Recoverable lyrics problems
//!
//! None of these ever reach the end user. They are logged where they occur
//! and, for the normalizer, collected into a report so callers can inspect
//! what was dropped.

/// Problems the lyrics subsystem recovers from locally
#[derive(Debug, Clone, PartialEq)]
pub enum LyricsIssue {
    /// One word record was invalid and was excluded from grouping
    MalformedWordRecord { index: usize, reason: &'static str },
    /// Alignment data was present but produced no usable lines
    EmptyAlignment,
    /// The lyrics field looked like JSON but could not be parsed
    UnparseableLyricsPayload(String),
    /// A lyrics fetch resolved after the track had already changed
    StaleFetchResult { requested: u64, current: Option<u64> },
    /// A seek target fell outside `[0, duration]` and was clamped
    SeekOutOfRange { requested: f64, clamped: f64 },
}

impl std::fmt::Display for LyricsIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LyricsIssue::MalformedWordRecord { index, reason } => {
                write!(f, "Malformed word record #{}: {}", index, reason)
            }
            LyricsIssue::EmptyAlignment => write!(f, "Alignment produced no lines"),
            LyricsIssue::UnparseableLyricsPayload(e) => {
                write!(f, "Unparseable lyrics payload: {}", e)
            }
            LyricsIssue::StaleFetchResult { requested, current } => write!(
                f,
                "Discarded lyrics for track {} (current track: {:?})",
                requested, current
            ),
            LyricsIssue::SeekOutOfRange { requested, clamped } => {
                write!(f, "Seek to {:.3}s clamped to {:.3}s", requested, clamped)
            }
        }
    }
}

impl std::error::Error for LyricsIssue {}

/// Clamp a seek target into `[0, duration]`
///
/// An unknown duration (zero or non-finite) only clamps the lower bound.
pub fn clamp_seek(target_s: f64, duration_s: f64) -> (f64, Option<LyricsIssue>) {
    let upper = if duration_s.is_finite() && duration_s > 0.0 {
        duration_s
    } else {
        f64::INFINITY
    };
    let clamped = if target_s.is_finite() {
        target_s.clamp(0.0, upper)
    } else {
        0.0
    };

    if clamped == target_s {
        (clamped, None)
    } else {
        tracing::debug!("Seek target {} out of range, clamped to {}", target_s, clamped);
        (
            clamped,
            Some(LyricsIssue::SeekOutOfRange {
                requested: target_s,
                clamped,
            }),
        )
    }
}
