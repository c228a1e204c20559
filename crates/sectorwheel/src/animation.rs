//! Snap-to-selection animation.

use crate::angle::{normalize, shortest_path};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const DEFAULT_SNAP_DURATION: Duration = Duration::from_millis(1000);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum Easing {
    Linear,
    Decelerate,
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` onto eased progress in `[0, 1]`.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

/// Where a selected sector's leading edge comes to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, SerializeDisplay, DeserializeFromStr)]
pub enum HomeAngle {
    /// Follow the drawing frame's setup angle.
    #[default]
    Setup,
    Fixed(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("home angle must be `setup` or a whole number of degrees, got `{0}`")]
pub struct ParseHomeAngleError(String);

impl FromStr for HomeAngle {
    type Err = ParseHomeAngleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("setup") {
            return Ok(Self::Setup);
        }
        s.parse()
            .map(Self::Fixed)
            .map_err(|_| ParseHomeAngleError(s.to_string()))
    }
}

impl fmt::Display for HomeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => f.write_str("setup"),
            Self::Fixed(degrees) => write!(f, "{degrees}"),
        }
    }
}

impl HomeAngle {
    pub fn resolve(&self, setup_angle: i32) -> i32 {
        match self {
            Self::Setup => setup_angle,
            Self::Fixed(degrees) => *degrees,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub value: i32,
    pub finished: bool,
}

/// A running interpolation between two angles.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    pub from: i32,
    pub to: i32,
    pub duration: Duration,
    pub easing: Easing,
    started_at: Instant,
}

impl Interpolation {
    pub fn new(from: i32, to: i32, duration: Duration, easing: Easing, now: Instant) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            started_at: now,
        }
    }

    pub fn sample(&self, now: Instant) -> Sample {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            return Sample {
                value: self.to,
                finished: true,
            };
        }

        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let travel = (self.to - self.from) as f64 * self.easing.apply(t);
        Sample {
            value: self.from + travel.round() as i32,
            finished: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionAnimator {
    pub home: HomeAngle,
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for SelectionAnimator {
    fn default() -> Self {
        Self {
            home: HomeAngle::default(),
            duration: DEFAULT_SNAP_DURATION,
            easing: Easing::default(),
        }
    }
}

impl SelectionAnimator {
    /// Computes the `(from, to)` rotation that brings a sector starting at
    /// `sector_start` onto the home angle along the shorter way round.
    pub fn plan(&self, sector_start: i32, current_angle: i32, setup_angle: i32) -> (i32, i32) {
        let home = self.home.resolve(setup_angle);
        let rotation_needed = normalize(home - sector_start);
        let target = normalize(rotation_needed + current_angle);
        shortest_path(normalize(current_angle), target)
    }

    pub fn animate(
        &self,
        sector_start: i32,
        current_angle: i32,
        setup_angle: i32,
        now: Instant,
    ) -> Interpolation {
        let (from, to) = self.plan(sector_start, current_angle, setup_angle);
        Interpolation::new(from, to, self.duration, self.easing, now)
    }
}
