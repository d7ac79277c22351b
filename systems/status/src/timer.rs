//! Per-level stopwatch started by the player's first move.

use std::{
    fmt,
    time::{Duration, Instant},
};

/// Source of the current time.
pub trait Clock: fmt::Debug {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Clock backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Stopwatch for the level being played.
///
/// It waits for the first move of a level, runs until the level changes and
/// freezes once the run is finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum LevelTimer {
    #[default]
    Waiting,
    Running {
        since: Instant,
    },
    Stopped {
        elapsed: Duration,
    },
}

impl LevelTimer {
    pub(crate) fn start(&mut self, now: Instant) {
        if *self == Self::Waiting {
            *self = Self::Running { since: now };
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::Waiting;
    }

    pub(crate) fn stop(&mut self, now: Instant) {
        *self = Self::Stopped {
            elapsed: self.elapsed(now),
        };
    }

    pub(crate) fn elapsed(&self, now: Instant) -> Duration {
        match *self {
            Self::Waiting => Duration::ZERO,
            Self::Running { since } => now.saturating_duration_since(since),
            Self::Stopped { elapsed } => elapsed,
        }
    }
}

/// Formats whole seconds as `mm : ss`.
pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{:02} : {:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waiting_timer_reads_zero_until_started() {
        let origin = Instant::now();
        let mut timer = LevelTimer::default();
        assert_eq!(timer.elapsed(origin + Duration::from_secs(30)), Duration::ZERO);

        timer.start(origin + Duration::from_secs(30));
        timer.start(origin + Duration::from_secs(40));

        assert_eq!(
            timer.elapsed(origin + Duration::from_secs(45)),
            Duration::from_secs(15)
        );
    }

    #[test]
    fn stopped_timer_keeps_its_reading() {
        let origin = Instant::now();
        let mut timer = LevelTimer::default();
        timer.start(origin);
        timer.stop(origin + Duration::from_secs(7));

        assert_eq!(
            timer.elapsed(origin + Duration::from_secs(60)),
            Duration::from_secs(7)
        );
        timer.start(origin + Duration::from_secs(61));
        assert_eq!(
            timer.elapsed(origin + Duration::from_secs(90)),
            Duration::from_secs(7)
        );
    }

    #[test]
    fn elapsed_time_is_shown_as_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::ZERO), "00 : 00");
        assert_eq!(format_elapsed(Duration::from_millis(65_900)), "01 : 05");
        assert_eq!(format_elapsed(Duration::from_secs(600)), "10 : 00");
    }
}
