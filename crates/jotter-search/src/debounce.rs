//! Debounce policy for search input.
//!
//! Each pushed value replaces the buffered one and restarts a fixed-delay
//! timer. The value is released only once the timer runs out without another
//! push, so a burst of keystrokes collapses to a single filter pass with the
//! final query.
//!
//! The debouncer holds no timer task. Callers pass the current instant and
//! sleep until [`Debouncer::deadline`]:
//!
//! ```
//! use std::time::Duration;
//! use jotter_search::Debouncer;
//! use tokio::time::Instant;
//!
//! let start = Instant::now();
//! let mut debouncer = Debouncer::new(Duration::from_millis(300));
//! debouncer.push("e", start);
//! debouncer.push("eg", start + Duration::from_millis(100));
//! debouncer.push("egg", start + Duration::from_millis(200));
//!
//! assert_eq!(debouncer.poll(start + Duration::from_millis(450)), None);
//! assert_eq!(debouncer.poll(start + Duration::from_millis(500)), Some("egg"));
//! ```

use std::time::Duration;

use tokio::time::Instant;

/// Buffers the latest value until input has been quiet for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Buffer `value`, replacing any pending one, and restart the timer.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the pending value if its timer has run out by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Release the pending value immediately, regardless of the timer.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
