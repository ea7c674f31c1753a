//! Tap and swipe recognition on the lyrics surface
//!
//! Two taps closer than the double-tap delay seek backward or forward,
//! depending on which half of the surface was hit. A lone tap is reported
//! as [`GestureOutcome::SingleTap`] once the window lapses. A horizontal
//! swipe switches tracks and cancels any pending tap.

use std::time::Instant;

use crate::features::lyrics::issue::clamp_seek;
use crate::features::settings::GestureSettings;

/// Result of a recognized gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// A tap with no partner, at surface x
    SingleTap { x: f32 },
    /// Double tap seek, target already clamped to the track
    Seek { target_s: f64, delta_s: f64 },
    NextTrack,
    PreviousTrack,
}

#[derive(Debug, Clone, Copy)]
struct PendingTap {
    at: Instant,
    x: f32,
}

/// Turns raw taps and drags into seeks and track switches
#[derive(Debug, Clone)]
pub struct GestureSeekHandler {
    settings: GestureSettings,
    pending: Option<PendingTap>,
}

impl GestureSeekHandler {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            pending: None,
        }
    }

    pub fn set_settings(&mut self, settings: GestureSettings) {
        self.settings = settings;
    }

    pub fn has_pending_tap(&self) -> bool {
        self.pending.is_some()
    }

    /// Register a tap at `x` on a surface `width` wide
    ///
    /// May resolve a lapsed earlier tap as a single tap.
    pub fn on_tap(
        &mut self,
        x: f32,
        width: f32,
        now: Instant,
        current_s: f64,
        duration_s: f64,
    ) -> Vec<GestureOutcome> {
        let tap = PendingTap { at: now, x };

        match self.pending.take() {
            Some(first) if now.saturating_duration_since(first.at) < self.settings.double_tap_delay() => {
                let delta_s = if x < width / 2.0 {
                    -self.settings.seek_amount_s
                } else {
                    self.settings.seek_amount_s
                };
                let (target_s, _) = clamp_seek(current_s + delta_s, duration_s);
                tracing::debug!("Double tap seek {:+}s to {:.2}s", delta_s, target_s);
                vec![GestureOutcome::Seek { target_s, delta_s }]
            }
            Some(lapsed) => {
                self.pending = Some(tap);
                vec![GestureOutcome::SingleTap { x: lapsed.x }]
            }
            None => {
                self.pending = Some(tap);
                Vec::new()
            }
        }
    }

    /// Resolve a pending tap whose double-tap window has lapsed
    pub fn poll(&mut self, now: Instant) -> Option<GestureOutcome> {
        let pending = self.pending?;
        if now.saturating_duration_since(pending.at) >= self.settings.double_tap_delay() {
            self.pending = None;
            Some(GestureOutcome::SingleTap { x: pending.x })
        } else {
            None
        }
    }

    /// Finish a drag; `dx` is total travel, `velocity_x` the release speed
    ///
    /// Negative values point left. A left swipe advances to the next track.
    pub fn on_drag_end(&mut self, dx: f32, velocity_x: f32) -> Option<GestureOutcome> {
        self.cancel();

        let direction = if dx.abs() > self.settings.swipe_distance_px {
            dx
        } else if velocity_x.abs() > self.settings.swipe_velocity_px_s {
            velocity_x
        } else {
            return None;
        };

        let outcome = if direction < 0.0 {
            GestureOutcome::NextTrack
        } else {
            GestureOutcome::PreviousTrack
        };
        tracing::debug!("Swipe recognized: {:?}", outcome);
        Some(outcome)
    }

    /// Drop any pending tap
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for GestureSeekHandler {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const WIDTH: f32 = 400.0;

    #[test]
    fn test_double_tap_right_half_seeks_forward() {
        let mut handler = GestureSeekHandler::default();
        let t0 = Instant::now();

        assert!(handler.on_tap(300.0, WIDTH, t0, 50.0, 180.0).is_empty());
        let outcomes = handler.on_tap(300.0, WIDTH, t0 + Duration::from_millis(200), 50.0, 180.0);

        assert_eq!(
            outcomes,
            vec![GestureOutcome::Seek {
                target_s: 60.0,
                delta_s: 10.0
            }]
        );
        assert!(!handler.has_pending_tap());
    }

    #[test]
    fn test_double_tap_left_half_clamps_at_zero() {
        let mut handler = GestureSeekHandler::default();
        let t0 = Instant::now();

        handler.on_tap(50.0, WIDTH, t0, 4.0, 180.0);
        let outcomes = handler.on_tap(60.0, WIDTH, t0 + Duration::from_millis(150), 4.0, 180.0);
        assert_eq!(
            outcomes,
            vec![GestureOutcome::Seek {
                target_s: 0.0,
                delta_s: -10.0
            }]
        );
    }

    #[test]
    fn test_double_tap_clamps_at_duration() {
        let mut handler = GestureSeekHandler::default();
        let t0 = Instant::now();

        handler.on_tap(350.0, WIDTH, t0, 175.0, 180.0);
        let outcomes = handler.on_tap(350.0, WIDTH, t0 + Duration::from_millis(100), 175.0, 180.0);
        assert!(matches!(
            outcomes.as_slice(),
            [GestureOutcome::Seek { target_s, .. }] if *target_s == 180.0
        ));
    }

    #[test]
    fn test_slow_taps_are_single() {
        let mut handler = GestureSeekHandler::default();
        let t0 = Instant::now();

        handler.on_tap(10.0, WIDTH, t0, 0.0, 180.0);
        let outcomes = handler.on_tap(20.0, WIDTH, t0 + Duration::from_millis(400), 0.0, 180.0);
        assert_eq!(outcomes, vec![GestureOutcome::SingleTap { x: 10.0 }]);

        assert_eq!(handler.poll(t0 + Duration::from_millis(500)), None);
        assert_eq!(
            handler.poll(t0 + Duration::from_millis(700)),
            Some(GestureOutcome::SingleTap { x: 20.0 })
        );
        assert_eq!(handler.poll(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_swipe_left_is_next_track() {
        let mut handler = GestureSeekHandler::default();
        assert_eq!(handler.on_drag_end(-120.0, 0.0), Some(GestureOutcome::NextTrack));
        assert_eq!(handler.on_drag_end(120.0, 0.0), Some(GestureOutcome::PreviousTrack));
    }

    #[test]
    fn test_fast_flick_is_swipe() {
        let mut handler = GestureSeekHandler::default();
        assert_eq!(handler.on_drag_end(-30.0, -600.0), Some(GestureOutcome::NextTrack));
        assert_eq!(handler.on_drag_end(10.0, 20.0), None);
    }

    #[test]
    fn test_drag_cancels_pending_tap() {
        let mut handler = GestureSeekHandler::default();
        let t0 = Instant::now();

        handler.on_tap(300.0, WIDTH, t0, 50.0, 180.0);
        assert_eq!(handler.on_drag_end(-200.0, 0.0), Some(GestureOutcome::NextTrack));
        assert_eq!(handler.poll(t0 + Duration::from_secs(1)), None);

        // The next tap starts a fresh pair instead of completing a double tap
        assert!(handler.on_tap(300.0, WIDTH, t0 + Duration::from_millis(50), 50.0, 180.0).is_empty());
    }
}
