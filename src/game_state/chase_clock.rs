//! Time source and countdown bookkeeping for chase rounds.
//!
//! The state model never sleeps. A countdown is a deadline stamped with the
//! round number that created it; hosts either poll it or schedule a callback
//! that hands the round number back. A countdown from a finished round can
//! therefore never resolve a later one.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

pub trait ChaseClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ChaseClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: TimeDelta) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl ChaseClock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst))
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Deadline of one chase round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaseCountdown {
    pub round: u64,
    pub started_at: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
}

impl ChaseCountdown {
    pub fn start(round: u64, now: DateTime<Utc>, duration: TimeDelta) -> Self {
        Self {
            round,
            started_at: now,
            deadline: now + duration,
        }
    }

    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }

    /// Time left, clamped at zero.
    pub fn remaining(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.deadline - now).max(TimeDelta::zero())
    }

    pub fn duration(&self) -> TimeDelta {
        self.deadline - self.started_at
    }
}
