//! Keystroke coalescing.
//!
//! [`Debouncer`] keeps the bookkeeping half of a debounce: every input issues a
//! token, and when the caller's timer for that token fires it calls
//! [`Debouncer::settle`]. Only the token of the last input inside a quiet window
//! can publish, so a burst of keystrokes yields exactly one settled value. The
//! timer itself belongs to the view (see `ui::use_debounced`).

use std::time::Duration;

use crate::sequence::{RequestSequence, RequestToken};

#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    seq: RequestSequence,
    pending: Option<T>,
    settled: T,
    delay: Duration,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            seq: RequestSequence::new(),
            pending: None,
            settled: initial,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a raw input. Any earlier token can no longer settle.
    pub fn input(&mut self, value: T) -> RequestToken {
        self.pending = Some(value);
        self.seq.next()
    }

    /// Called when the quiet period for `token` has elapsed.
    ///
    /// Returns the newly settled value if `token` is still the latest input and
    /// the value differs from the one already published.
    pub fn settle(&mut self, token: RequestToken) -> Option<T> {
        if !self.seq.is_latest(token) {
            return None;
        }
        let value = self.pending.take()?;
        if value == self.settled {
            return None;
        }
        self.settled = value.clone();
        Some(value)
    }

    /// Drop any pending input, e.g. when the owning view goes away.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.seq.invalidate();
    }

    pub fn settled(&self) -> &T {
        &self.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> Debouncer<String> {
        Debouncer::new(String::new(), Duration::from_millis(1000))
    }

    #[test]
    fn test_burst_settles_once_with_last_value() {
        let mut d = debouncer();
        let tokens: Vec<_> = ["w", "wi", "wid", "widg"]
            .iter()
            .map(|s| d.input(s.to_string()))
            .collect();

        // Timers for the earlier keystrokes fire first and must not publish.
        let published: Vec<_> = tokens.iter().filter_map(|t| d.settle(*t)).collect();
        assert_eq!(published, vec!["widg".to_string()]);
        assert_eq!(d.settled(), "widg");
    }

    #[test]
    fn test_settling_twice_publishes_once() {
        let mut d = debouncer();
        let token = d.input("abc".to_string());
        assert_eq!(d.settle(token), Some("abc".to_string()));
        assert_eq!(d.settle(token), None);
    }

    #[test]
    fn test_unchanged_value_is_not_republished() {
        let mut d = debouncer();
        let token = d.input("abc".to_string());
        d.settle(token);

        // Typed a character and deleted it again inside one window.
        d.input("abcd".to_string());
        let token = d.input("abc".to_string());
        assert_eq!(d.settle(token), None);
        assert_eq!(d.settled(), "abc");
    }

    #[test]
    fn test_cancel_drops_pending_input() {
        let mut d = debouncer();
        let token = d.input("late".to_string());
        d.cancel();
        assert_eq!(d.settle(token), None);
        assert_eq!(d.settled(), "");
    }

    #[test]
    fn test_separate_quiet_periods_each_publish() {
        let mut d = debouncer();
        let first = d.input("a".to_string());
        assert_eq!(d.settle(first), Some("a".to_string()));
        let second = d.input("ab".to_string());
        assert_eq!(d.settle(second), Some("ab".to_string()));
    }
}
