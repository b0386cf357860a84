//! Trailing-edge debounce over Zellij timers.
//!
//! Zellij timers cannot be cancelled once armed, so every [`Debouncer::schedule`]
//! queues a token and arms a fresh timer. Timers of equal delay fire in the
//! order they were armed; each firing pops one token and only the firing that
//! pops the newest token releases the value. Earlier firings are no-ops.

use std::collections::VecDeque;
use std::time::Duration;

/// Default delay between the last keystroke and a re-render, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    armed: VecDeque<u64>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            armed: VecDeque::new(),
            pending: None,
        }
    }

    /// Replaces the pending value and returns the timer delay in seconds.
    ///
    /// ```
    /// use glyphdeck::app::debounce::Debouncer;
    /// use std::time::Duration;
    ///
    /// let mut debouncer = Debouncer::new(Duration::from_millis(300));
    /// debouncer.schedule("H");
    /// debouncer.schedule("Hi");
    /// assert_eq!(debouncer.fire(), None);
    /// assert_eq!(debouncer.fire(), Some("Hi"));
    /// ```
    pub fn schedule(&mut self, value: T) -> f64 {
        self.generation += 1;
        self.armed.push_back(self.generation);
        self.pending = Some(value);
        self.delay.as_secs_f64()
    }

    /// Handles one timer firing.
    ///
    /// Returns the pending value only if no newer value was scheduled after
    /// the timer that just fired was armed.
    pub fn fire(&mut self) -> Option<T> {
        let token = self.armed.pop_front()?;
        if token == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drops the pending value; timers still armed fire as no-ops.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_publishes_only_the_last_value() {
        let mut debouncer = Debouncer::default();
        for text in ["H", "He", "Hel", "Hell", "Hello"] {
            assert!((debouncer.schedule(text) - 0.3).abs() < f64::EPSILON);
        }

        let published: Vec<&str> = (0..5).filter_map(|_| debouncer.fire()).collect();
        assert_eq!(published, ["Hello"]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn separated_inputs_each_publish() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.schedule(1);
        assert_eq!(debouncer.fire(), Some(1));
        debouncer.schedule(2);
        assert_eq!(debouncer.fire(), Some(2));
    }

    #[test]
    fn cancelled_value_is_never_published() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule("draft");
        debouncer.cancel();
        assert_eq!(debouncer.fire(), None);
    }

    #[test]
    fn stray_timer_without_schedule_is_ignored() {
        let mut debouncer: Debouncer<String> = Debouncer::default();
        assert_eq!(debouncer.fire(), None);
    }

    #[test]
    fn value_scheduled_after_cancel_still_publishes() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule("old");
        debouncer.cancel();
        debouncer.schedule("new");
        assert_eq!(debouncer.fire(), None);
        assert_eq!(debouncer.fire(), Some("new"));
    }
}
