//! Playback pacing
//!
//! A run suspends only at commit boundaries. After each commit the recorder
//! hands the new snapshot to a [`Pacer`] and, unless the speed is
//! [`Speed::INSTANT`], asks it to wait `base_delay / speed`. The pacer may
//! change the speed while waiting; the next commit picks the new value up.

use crate::engine::algorithms::Algorithm;
use crate::snapshot::Snapshot;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Delay between two commits at 1x speed
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// Playback speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed(u32);

impl Speed {
    pub const NORMAL: Speed = Speed(1);
    pub const FAST: Speed = Speed(2);
    pub const VERY_FAST: Speed = Speed(5);
    /// Commits are still recorded and presented, just never waited on
    pub const INSTANT: Speed = Speed(99);

    pub const PRESETS: [Speed; 4] = [Speed::NORMAL, Speed::FAST, Speed::VERY_FAST, Speed::INSTANT];

    /// A multiplier of 0 is treated as 1
    pub fn new(multiplier: u32) -> Self {
        Speed(multiplier.max(1))
    }

    pub fn is_instant(self) -> bool {
        self.0 >= Speed::INSTANT.0
    }

    /// Pause to take after a commit, `None` in instant mode
    pub fn delay(self, base: Duration) -> Option<Duration> {
        if self.is_instant() {
            None
        } else {
            Some(base / self.0)
        }
    }

    /// Next preset above this speed
    pub fn faster(self) -> Self {
        Speed::PRESETS
            .into_iter()
            .find(|preset| *preset > self)
            .unwrap_or(Speed::INSTANT)
    }

    /// Next preset below this speed
    pub fn slower(self) -> Self {
        Speed::PRESETS
            .into_iter()
            .rev()
            .find(|preset| *preset < self)
            .unwrap_or(Speed::NORMAL)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed::NORMAL
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_instant() {
            write!(f, "MAX")
        } else {
            write!(f, "{}x", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid speed `{0}` (expected a multiplier such as 1, 2, 5, or `max`)")]
pub struct ParseSpeedError(String);

impl FromStr for Speed {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "max" | "instant" => Ok(Speed::INSTANT),
            other => other
                .trim_end_matches('x')
                .parse::<u32>()
                .map(Speed::new)
                .map_err(|_| ParseSpeedError(s.to_string())),
        }
    }
}

/// Playback settings applied to each run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub base_delay: Duration,
    pub speed: Speed,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            base_delay: DEFAULT_BASE_DELAY,
            speed: Speed::NORMAL,
        }
    }
}

/// What the presentation layer receives after each live commit
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    pub snapshot: &'a Snapshot,
    pub step: usize,
    pub total: usize,
    pub algorithm: Algorithm,
    pub speed: Speed,
    /// Estimated size of the history so far
    pub history_bytes: usize,
}

/// Receives snapshots during a run and owns the pause between them
pub trait Pacer {
    /// Show a freshly committed snapshot
    fn present(&mut self, progress: &Progress<'_>);

    /// Suspend for `delay`. May adjust `speed` for the following commits.
    fn wait(&mut self, delay: Duration, speed: &mut Speed);
}

/// Pacer that neither shows nor waits; used for headless runs and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn present(&mut self, _progress: &Progress<'_>) {}

    fn wait(&mut self, _delay: Duration, _speed: &mut Speed) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_scales_with_speed() {
        let base = Duration::from_millis(500);
        assert_eq!(Speed::NORMAL.delay(base), Some(Duration::from_millis(500)));
        assert_eq!(Speed::VERY_FAST.delay(base), Some(Duration::from_millis(100)));
        assert_eq!(Speed::INSTANT.delay(base), None);
        assert_eq!(Speed::new(0), Speed::NORMAL);
    }

    #[test]
    fn presets_cycle() {
        assert_eq!(Speed::NORMAL.faster(), Speed::FAST);
        assert_eq!(Speed::VERY_FAST.faster(), Speed::INSTANT);
        assert_eq!(Speed::INSTANT.faster(), Speed::INSTANT);
        assert_eq!(Speed::INSTANT.slower(), Speed::VERY_FAST);
        assert_eq!(Speed::NORMAL.slower(), Speed::NORMAL);
        assert_eq!(Speed::new(3).faster(), Speed::VERY_FAST);
    }

    #[test]
    fn parses_labels() {
        assert_eq!("max".parse::<Speed>(), Ok(Speed::INSTANT));
        assert_eq!("2x".parse::<Speed>(), Ok(Speed::FAST));
        assert_eq!(" 5 ".parse::<Speed>(), Ok(Speed::VERY_FAST));
        assert!("fast".parse::<Speed>().is_err());
        assert_eq!(Speed::INSTANT.to_string(), "MAX");
        assert_eq!(Speed::FAST.to_string(), "2x");
    }
}
