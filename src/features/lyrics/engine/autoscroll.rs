//! Autoscroll controller
//!
//! Keeps the active line in view without fighting the user.
//!
//! ## Rules
//!
//! - Only acts while playing and not suspended
//! - Evaluates once per active-line change, and again on resume or when
//!   playback starts
//! - Places the active line at `align_fraction` of the viewport height,
//!   unless it already sits inside the comfort band
//! - A user scroll or touch suspends autoscroll for `suspend_ms`; every
//!   further interaction restarts the window
//! - Scroll events shortly after our own scroll command are ignored

use std::time::Instant;

use crate::features::settings::AutoscrollSettings;

/// Renderer measurements the controller needs
pub trait ViewportMetrics {
    /// Visible height of the lyrics container
    fn viewport_height(&self) -> f32;
    /// Current scroll offset of the container
    fn scroll_top(&self) -> f32;
    /// Top of a line relative to the container's visible top edge
    ///
    /// `None` if the line has not been laid out yet.
    fn line_offset(&self, line_index: usize) -> Option<f32>;
}

/// Scroll request for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// Target scroll offset, never negative
    pub top: f32,
    pub smooth: bool,
}

/// Whether the user currently owns the scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPolicy {
    pub autoscroll_suspended: bool,
    pub suspended_until: Option<Instant>,
}

/// Decides when and where to scroll
#[derive(Debug, Clone)]
pub struct AutoscrollController {
    settings: AutoscrollSettings,
    policy: ScrollPolicy,
    /// Last scroll offset observed or commanded
    last_scroll_top: f32,
    /// Scroll events before this instant are our own
    programmatic_until: Option<Instant>,
    /// Line the controller last evaluated; cleared to force a re-evaluation
    last_evaluated_line: Option<usize>,
    /// Line the controller last scrolled to
    last_scrolled_line: Option<usize>,
    was_playing: bool,
}

impl AutoscrollController {
    pub fn new(settings: AutoscrollSettings) -> Self {
        Self {
            settings,
            policy: ScrollPolicy::default(),
            last_scroll_top: 0.0,
            programmatic_until: None,
            last_evaluated_line: None,
            last_scrolled_line: None,
            was_playing: false,
        }
    }

    pub fn policy(&self) -> &ScrollPolicy {
        &self.policy
    }

    pub fn is_suspended(&self) -> bool {
        self.policy.autoscroll_suspended
    }

    pub fn set_settings(&mut self, settings: AutoscrollSettings) {
        self.settings = settings;
    }

    /// Forget everything, e.g. on track change
    pub fn reset(&mut self) {
        *self = Self::new(self.settings.clone());
    }

    /// Report a scroll event from the container
    ///
    /// Returns `true` if it was taken as a user scroll.
    pub fn on_scroll(&mut self, scroll_top: f32, now: Instant) -> bool {
        let delta = (scroll_top - self.last_scroll_top).abs();
        self.last_scroll_top = scroll_top;

        if self.programmatic_until.is_some_and(|until| now < until) {
            return false;
        }
        if delta <= self.settings.user_scroll_threshold_px {
            return false;
        }

        self.suspend(now);
        true
    }

    pub fn on_touch_start(&mut self, now: Instant) {
        self.suspend(now);
    }

    /// Lifting the finger restarts the suspension window
    pub fn on_touch_end(&mut self, now: Instant) {
        self.suspend(now);
    }

    /// Re-enable autoscroll immediately
    pub fn resume(&mut self) {
        if self.policy.autoscroll_suspended {
            tracing::debug!("Autoscroll resumed");
        }
        self.policy = ScrollPolicy::default();
        self.last_evaluated_line = None;
    }

    fn suspend(&mut self, now: Instant) {
        if !self.policy.autoscroll_suspended {
            tracing::debug!("Autoscroll suspended by user interaction");
        }
        self.policy = ScrollPolicy {
            autoscroll_suspended: true,
            suspended_until: Some(now + self.settings.suspend_duration()),
        };
        self.last_evaluated_line = None;
    }

    /// Lift an expired suspension
    fn expire(&mut self, now: Instant) {
        if self
            .policy
            .suspended_until
            .is_some_and(|until| now > until)
        {
            self.resume();
        }
    }

    /// Decide whether to scroll this tick
    pub fn update(
        &mut self,
        active_line: Option<usize>,
        is_playing: bool,
        viewport: &impl ViewportMetrics,
        now: Instant,
    ) -> Option<ScrollCommand> {
        self.expire(now);

        let started_playing = is_playing && !self.was_playing;
        self.was_playing = is_playing;

        if !is_playing || self.policy.autoscroll_suspended {
            return None;
        }

        let line = active_line?;
        if self.last_evaluated_line == Some(line) && !started_playing {
            return None;
        }

        // Unmeasured lines are retried next tick
        let offset = viewport.line_offset(line)?;
        let height = viewport.viewport_height();
        if height <= 0.0 {
            return None;
        }
        self.last_evaluated_line = Some(line);

        let fraction = offset / height;
        if fraction > self.settings.comfort_band_top && fraction < self.settings.comfort_band_bottom
        {
            return None;
        }

        let top = (viewport.scroll_top() + offset - height * self.settings.align_fraction).max(0.0);
        let smooth = self
            .last_scrolled_line
            .is_some_and(|previous| line.abs_diff(previous) <= 1);

        self.last_scrolled_line = Some(line);
        self.last_scroll_top = top;
        self.programmatic_until = Some(now + self.settings.programmatic_guard());

        Some(ScrollCommand { top, smooth })
    }
}

impl Default for AutoscrollController {
    fn default() -> Self {
        Self::new(AutoscrollSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Fixed-height lines in a scrollable column
    struct FakeViewport {
        height: f32,
        scroll_top: f32,
        line_height: f32,
    }

    impl FakeViewport {
        fn new() -> Self {
            Self {
                height: 1000.0,
                scroll_top: 0.0,
                line_height: 100.0,
            }
        }

        fn apply(&mut self, command: ScrollCommand) {
            self.scroll_top = command.top;
        }
    }

    impl ViewportMetrics for FakeViewport {
        fn viewport_height(&self) -> f32 {
            self.height
        }

        fn scroll_top(&self) -> f32 {
            self.scroll_top
        }

        fn line_offset(&self, line_index: usize) -> Option<f32> {
            Some(line_index as f32 * self.line_height - self.scroll_top)
        }
    }

    #[test]
    fn test_scrolls_active_line_to_thirty_percent() {
        let mut controller = AutoscrollController::default();
        let viewport = FakeViewport::new();
        let now = Instant::now();

        let command = controller.update(Some(8), true, &viewport, now).unwrap();
        assert_eq!(command.top, 500.0);
    }

    #[test]
    fn test_skips_line_inside_comfort_band() {
        let mut controller = AutoscrollController::default();
        let viewport = FakeViewport::new();
        // Line 3 sits at 30% of the viewport
        assert!(controller.update(Some(3), true, &viewport, Instant::now()).is_none());
    }

    #[test]
    fn test_clamps_to_top() {
        let mut controller = AutoscrollController::default();
        let mut viewport = FakeViewport::new();
        viewport.scroll_top = 400.0;
        let command = controller.update(Some(0), true, &viewport, Instant::now()).unwrap();
        assert_eq!(command.top, 0.0);
    }

    #[test]
    fn test_evaluates_once_per_line() {
        let mut controller = AutoscrollController::default();
        let mut viewport = FakeViewport::new();
        let now = Instant::now();

        let command = controller.update(Some(8), true, &viewport, now).unwrap();
        viewport.apply(command);
        // User drifts away without crossing the threshold logic
        viewport.scroll_top = 0.0;
        assert!(controller.update(Some(8), true, &viewport, now).is_none());
        assert!(controller.update(Some(9), true, &viewport, now).is_some());
    }

    #[test]
    fn test_paused_does_nothing() {
        let mut controller = AutoscrollController::default();
        let viewport = FakeViewport::new();
        assert!(controller.update(Some(8), false, &viewport, Instant::now()).is_none());
    }

    #[test]
    fn test_reevaluates_when_playback_starts() {
        let mut controller = AutoscrollController::default();
        let mut viewport = FakeViewport::new();
        let now = Instant::now();

        let command = controller.update(Some(8), true, &viewport, now).unwrap();
        viewport.apply(command);
        assert!(controller.update(Some(8), false, &viewport, now).is_none());

        viewport.scroll_top = 0.0;
        assert!(controller.update(Some(8), true, &viewport, now).is_some());
    }

    #[test]
    fn test_small_scroll_is_jitter() {
        let mut controller = AutoscrollController::default();
        assert!(!controller.on_scroll(4.0, Instant::now()));
        assert!(!controller.is_suspended());
    }

    #[test]
    fn test_programmatic_scroll_does_not_suspend() {
        let mut controller = AutoscrollController::default();
        let viewport = FakeViewport::new();
        let now = Instant::now();

        controller.update(Some(8), true, &viewport, now).unwrap();
        assert!(!controller.on_scroll(250.0, now + Duration::from_millis(100)));
        assert!(!controller.on_scroll(500.0, now + Duration::from_millis(300)));
        assert!(!controller.is_suspended());

        assert!(controller.on_scroll(200.0, now + Duration::from_millis(500)));
        assert!(controller.is_suspended());
    }

    #[test]
    fn test_user_scroll_suppresses_for_five_seconds() {
        let mut controller = AutoscrollController::default();
        let viewport = FakeViewport::new();
        let tick = Duration::from_millis(100);
        let start = Instant::now();

        assert!(controller.on_scroll(300.0, start));

        // Active line changes every tick while suspended
        for k in 1..=50u32 {
            let now = start + tick * k;
            let line = 8 + k as usize;
            assert!(
                controller.update(Some(line), true, &viewport, now).is_none(),
                "scrolled at tick {}",
                k
            );
        }

        let now = start + tick * 51;
        assert!(controller.update(Some(58), true, &viewport, now).is_some());
        assert!(!controller.is_suspended());
    }

    #[test]
    fn test_resume_reevaluates_same_line() {
        let mut controller = AutoscrollController::default();
        let viewport = FakeViewport::new();
        let now = Instant::now();

        controller.on_touch_start(now);
        assert!(controller.update(Some(8), true, &viewport, now).is_none());

        controller.resume();
        assert!(controller.update(Some(8), true, &viewport, now).is_some());
    }

    #[test]
    fn test_interaction_restarts_window() {
        let mut controller = AutoscrollController::default();
        let viewport = FakeViewport::new();
        let start = Instant::now();

        controller.on_touch_start(start);
        controller.on_touch_end(start + Duration::from_secs(4));

        let before = start + Duration::from_millis(8900);
        assert!(controller.update(Some(8), true, &viewport, before).is_none());
        let after = start + Duration::from_millis(9100);
        assert!(controller.update(Some(8), true, &viewport, after).is_some());
    }

    #[test]
    fn test_smooth_only_for_neighbouring_lines() {
        let mut controller = AutoscrollController::default();
        let mut viewport = FakeViewport::new();
        let now = Instant::now();

        let first = controller.update(Some(8), true, &viewport, now).unwrap();
        assert!(!first.smooth);
        viewport.apply(first);

        viewport.scroll_top = 0.0;
        let next = controller.update(Some(9), true, &viewport, now).unwrap();
        assert!(next.smooth);

        viewport.scroll_top = 0.0;
        let jump = controller.update(Some(30), true, &viewport, now).unwrap();
        assert!(!jump.smooth);
    }
}
