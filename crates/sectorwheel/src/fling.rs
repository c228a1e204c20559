//! Decelerating fling simulation used to keep the wheel spinning after a
//! fling gesture.

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

/// Degrees per second squared.
pub const DEFAULT_DECELERATION: f64 = 180.0;

pub trait BallisticSimulator {
    /// Starts a fling from `start` with `velocity` in degrees per second.
    fn fling(&mut self, start: i32, velocity: i32, bounds: RangeInclusive<i32>, now: Instant);

    /// Stretches the running fling over `extra` additional time, keeping its distance.
    fn extend_duration(&mut self, extra: Duration);

    /// Advances to `now` and returns the current position.
    fn tick(&mut self, now: Instant) -> i32;

    fn is_finished(&self) -> bool;

    fn duration(&self) -> Duration;

    fn abort(&mut self);
}

/// Constant-deceleration scroller.
///
/// The position follows `start + distance * (1 - (1 - u)^2)` where `u` is
/// the elapsed fraction of the duration.
#[derive(Debug, Clone)]
pub struct Scroller {
    deceleration: f64,
    start: i32,
    distance: f64,
    duration: Duration,
    started_at: Option<Instant>,
    bounds: RangeInclusive<i32>,
    position: i32,
    finished: bool,
}

impl Scroller {
    pub fn new(deceleration: f64) -> Self {
        Self {
            deceleration: deceleration.max(f64::EPSILON),
            start: 0,
            distance: 0.0,
            duration: Duration::ZERO,
            started_at: None,
            bounds: i32::MIN..=i32::MAX,
            position: 0,
            finished: true,
        }
    }

    pub fn final_position(&self) -> i32 {
        self.clamp(self.start as f64 + self.distance)
    }

    fn clamp(&self, position: f64) -> i32 {
        let (min, max) = (*self.bounds.start() as f64, *self.bounds.end() as f64);
        position.round().clamp(min, max) as i32
    }

    fn position_at(&self, elapsed: Duration) -> i32 {
        if self.duration.is_zero() {
            return self.final_position();
        }
        let u = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        let eased = 1.0 - (1.0 - u) * (1.0 - u);
        self.clamp(self.start as f64 + self.distance * eased)
    }
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new(DEFAULT_DECELERATION)
    }
}

impl BallisticSimulator for Scroller {
    fn fling(&mut self, start: i32, velocity: i32, bounds: RangeInclusive<i32>, now: Instant) {
        let velocity = velocity as f64;
        let seconds = velocity.abs() / self.deceleration;

        self.start = start;
        self.distance = velocity * seconds / 2.0;
        self.duration = Duration::from_secs_f64(seconds);
        self.started_at = Some(now);
        self.bounds = bounds;
        self.position = start;
        self.finished = self.duration.is_zero();
    }

    fn extend_duration(&mut self, extra: Duration) {
        self.duration += extra;
        if !self.duration.is_zero() && self.started_at.is_some() {
            self.finished = false;
        }
    }

    fn tick(&mut self, now: Instant) -> i32 {
        if self.finished {
            return self.position;
        }
        let Some(started_at) = self.started_at else {
            return self.position;
        };

        let elapsed = now.saturating_duration_since(started_at);
        self.position = self.position_at(elapsed);
        if elapsed >= self.duration {
            self.finished = true;
        }
        self.position
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn abort(&mut self) {
        self.finished = true;
        self.started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNBOUNDED: RangeInclusive<i32> = i32::MIN..=i32::MAX;

    #[test]
    fn test_fling_decelerates_to_its_final_position() {
        let now = Instant::now();
        let mut scroller = Scroller::new(180.0);
        scroller.fling(10, 90, UNBOUNDED, now);

        assert_eq!(scroller.duration(), Duration::from_millis(500));
        assert_eq!(scroller.final_position(), 33);

        let quarter = scroller.tick(now + Duration::from_millis(125));
        let half = scroller.tick(now + Duration::from_millis(250));
        assert!(quarter > 10 && quarter < half);
        assert!(!scroller.is_finished());

        assert_eq!(scroller.tick(now + Duration::from_millis(500)), 33);
        assert!(scroller.is_finished());
    }

    #[test]
    fn test_negative_velocity_moves_backwards() {
        let now = Instant::now();
        let mut scroller = Scroller::new(100.0);
        scroller.fling(0, -100, UNBOUNDED, now);

        assert_eq!(scroller.tick(now + Duration::from_secs(5)), -50);
    }

    #[test]
    fn test_extending_the_duration_keeps_the_distance() {
        let now = Instant::now();
        let mut scroller = Scroller::new(180.0);
        scroller.fling(0, 180, UNBOUNDED, now);
        scroller.extend_duration(scroller.duration());

        assert_eq!(scroller.duration(), Duration::from_secs(2));
        assert_eq!(scroller.tick(now + Duration::from_secs(1)), 68);
        assert!(!scroller.is_finished());
        assert_eq!(scroller.tick(now + Duration::from_secs(2)), 90);
        assert!(scroller.is_finished());
    }

    #[test]
    fn test_bounds_clamp_the_position() {
        let now = Instant::now();
        let mut scroller = Scroller::new(10.0);
        scroller.fling(0, 100, -20..=20, now);

        assert_eq!(scroller.tick(now + Duration::from_secs(60)), 20);
    }

    #[test]
    fn test_zero_velocity_is_finished_immediately() {
        let now = Instant::now();
        let mut scroller = Scroller::default();
        scroller.fling(42, 0, UNBOUNDED, now);

        assert!(scroller.is_finished());
        assert_eq!(scroller.tick(now), 42);
    }

    #[test]
    fn test_abort_freezes_the_position() {
        let now = Instant::now();
        let mut scroller = Scroller::default();
        scroller.fling(0, 360, UNBOUNDED, now);
        let mid = scroller.tick(now + Duration::from_millis(100));
        scroller.abort();

        assert!(scroller.is_finished());
        assert_eq!(scroller.tick(now + Duration::from_secs(10)), mid);
    }
}
