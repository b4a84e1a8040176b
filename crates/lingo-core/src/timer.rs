//! Attempt timing.

use std::time::{Duration, Instant};

/// Measures how long one exercise attempt took.
///
/// There is no pause or resume; calling [`SessionTimer::start`] again resets
/// the baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionTimer {
    started_at: Option<Instant>,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timer already running from `now`.
    pub fn started() -> Self {
        let mut timer = Self::new();
        timer.start();
        timer
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, instant: Instant) {
        self.started_at = Some(instant);
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Whole seconds since the timer started, rounded to nearest.
    ///
    /// Returns 0 if the timer was never started.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.started_at
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default()
    }

    pub fn elapsed_seconds_at(&self, now: Instant) -> u64 {
        let millis = self.elapsed_at(now).as_millis();
        ((millis + 500) / 1000) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstarted_timer_reports_zero() {
        let timer = SessionTimer::new();
        assert!(!timer.is_started());
        assert_eq!(timer.elapsed_seconds(), 0);
    }

    #[test]
    fn rounds_to_nearest_second() {
        let start = Instant::now();
        let mut timer = SessionTimer::new();
        timer.start_at(start);

        assert_eq!(timer.elapsed_seconds_at(start), 0);
        assert_eq!(timer.elapsed_seconds_at(start + Duration::from_millis(499)), 0);
        assert_eq!(timer.elapsed_seconds_at(start + Duration::from_millis(500)), 1);
        assert_eq!(timer.elapsed_seconds_at(start + Duration::from_millis(1499)), 1);
        assert_eq!(timer.elapsed_seconds_at(start + Duration::from_secs(95)), 95);
    }

    #[test]
    fn restart_resets_baseline() {
        let start = Instant::now();
        let mut timer = SessionTimer::new();
        timer.start_at(start);
        timer.start_at(start + Duration::from_secs(10));
        assert_eq!(timer.elapsed_seconds_at(start + Duration::from_secs(12)), 2);
    }

    #[test]
    fn clock_before_start_saturates() {
        let start = Instant::now() + Duration::from_secs(5);
        let mut timer = SessionTimer::new();
        timer.start_at(start);
        assert_eq!(timer.elapsed_seconds_at(Instant::now()), 0);
    }

    #[test]
    fn started_timer_is_running() {
        let timer = SessionTimer::started();
        assert!(timer.is_started());
        assert!(timer.elapsed() < Duration::from_secs(60));
    }
}
