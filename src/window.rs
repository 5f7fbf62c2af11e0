//! Sliding-window bookkeeping of billable requests.
//!
//! The upstream API limits how many requests a key may send per hour.
//! [`RequestCounter`] remembers when each billable request was sent and
//! answers how many of them still fall inside the trailing window.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use hfapi::window::{ManualClock, RequestCounter, WINDOW_MS};
//!
//! let clock = Arc::new(ManualClock::new(0));
//! let counter = RequestCounter::with_clock(WINDOW_MS, clock.clone());
//!
//! counter.record();
//! assert_eq!(counter.count(), 1);
//!
//! clock.advance(WINDOW_MS);
//! assert_eq!(counter.count(), 0);
//! assert_eq!(counter.latest(), Some(0));
//! ```

use std::{
    collections::VecDeque,
    fmt::Debug,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use parking_lot::Mutex;

/// Length of the rate-limit window in milliseconds (one hour).
pub const WINDOW_MS: i64 = 3_600_000;

/// Source of the current time in milliseconds since the UNIX epoch.
pub trait Clock: Debug + Send + Sync {
    /// Returns the current time in milliseconds.
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by [`chrono::Utc`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
///
/// Useful for exercising window expiry without waiting an hour.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Creates a clock frozen at `millis`.
    pub fn new(millis: i64) -> Self {
        Self {
            now: AtomicI64::new(millis),
        }
    }

    /// Moves the clock to `millis`. Going backwards is allowed.
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Moves the clock forward by `millis`.
    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Counts billable requests sent within the trailing window.
///
/// Timestamps are read and appended under one lock and never go below the
/// latest entry, so the retained sequence is non-decreasing and stale
/// entries always form a prefix of it.
/// All access goes through an internal lock; a counter can be shared
/// between tasks (and between clients) behind an [`Arc`].
#[derive(Debug)]
pub struct RequestCounter {
    window_ms: i64,
    clock: Arc<dyn Clock>,
    sent: Mutex<VecDeque<i64>>,
}

impl RequestCounter {
    /// Creates a counter over the default one hour window using the system clock.
    pub fn new() -> Self {
        Self::with_clock(WINDOW_MS, Arc::new(SystemClock))
    }

    /// Creates a counter with a custom window length and clock.
    ///
    /// Windows shorter than one millisecond are raised to one millisecond.
    pub fn with_clock(window_ms: i64, clock: Arc<dyn Clock>) -> Self {
        if window_ms < 1 {
            log::warn!("window of {window_ms}ms is not positive, using 1ms");
        }
        Self {
            window_ms: window_ms.max(1),
            clock,
            sent: Mutex::new(VecDeque::new()),
        }
    }

    /// Returns the window length in milliseconds.
    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }

    /// Registers a billable request sent now.
    ///
    /// A timestamp older than the latest one (a clock stepped backwards)
    /// is stored as the latest one, keeping the sequence sorted.
    pub fn record(&self) {
        // read the clock under the lock so concurrent records stay in order
        let mut sent = self.sent.lock();
        let now = self.clock.now_millis();
        let stamp = sent.back().map_or(now, |&last| last.max(now));
        sent.push_back(stamp);
        self.prune(&mut sent, now);
    }

    /// Returns how many recorded requests are still inside the window.
    pub fn count(&self) -> usize {
        let mut sent = self.sent.lock();
        let now = self.clock.now_millis();
        self.prune(&mut sent, now);
        sent.len()
    }

    /// Returns the timestamp of the most recent request, or `None` if nothing was recorded.
    ///
    /// This does not prune, so the returned timestamp may already lie
    /// outside the window.
    pub fn latest(&self) -> Option<i64> {
        self.sent.lock().back().copied()
    }

    /// Forgets every recorded request.
    pub fn reset(&self) {
        self.sent.lock().clear();
    }

    fn prune(&self, sent: &mut VecDeque<i64>, now: i64) {
        let cutoff = now - self.window_ms;
        // newest stale entry; everything in front of it is stale as well
        if let Some(boundary) = sent.iter().rposition(|&t| t <= cutoff) {
            sent.drain(..=boundary);
            log::debug!("pruned {} stale request(s)", boundary + 1);
        }
    }
}

impl Default for RequestCounter {
    fn default() -> Self {
        Self::new()
    }
}
