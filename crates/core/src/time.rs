use chrono::{DateTime, Duration, Local, NaiveDateTime, SubsecRound, Utc};

/// A simple clock abstraction for deterministic time in sessions and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Local wall-clock time truncated to whole seconds.
    ///
    /// This is the shape every persisted timestamp uses (`2025-01-31T18:04:05`).
    #[must_use]
    pub fn local_stamp(&self) -> NaiveDateTime {
        self.now()
            .with_timezone(&Local)
            .naive_local()
            .trunc_subsecs(0)
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Seconds elapsed between two instants, clamped at zero.
#[must_use]
pub fn elapsed_secs(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = end.signed_duration_since(start).num_milliseconds().max(0);

    // Answer times are human scale; precision loss past 2^53 ms is irrelevant.
    #[allow(clippy::cast_precision_loss)]
    let millis = millis as f64;

    millis / 1000.0
}

/// Formats a duration in seconds as zero-padded `mm:ss`.
///
/// Minutes are not wrapped into hours, so long totals read `75:00`.
#[must_use]
pub fn format_mmss(seconds: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds.max(0.0).round() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
