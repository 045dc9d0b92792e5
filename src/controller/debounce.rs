//! Quiet-window debouncing driven by caller-supplied timestamps.

use std::time::{Duration, Instant};

/// Quiet window applied to search input.
pub const SEARCH_QUIET_WINDOW: Duration = Duration::from_millis(300);

/// Holds the latest value of a burst until the burst has been quiet for the
/// configured window.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Records a new value, discarding any earlier pending one and restarting
    /// the window from `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Instant at which the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Releases the pending value once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, due)) if due <= now => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_QUIET_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn burst_releases_only_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        for (i, text) in ["s", "sh", "sho", "shoe"].into_iter().enumerate() {
            let at = start + ms(50 * i as u64);
            debouncer.push(text, at);
            assert_eq!(debouncer.poll(at), None);
        }

        // Last keystroke at 150ms, so nothing is due before 450ms.
        assert_eq!(debouncer.poll(start + ms(449)), None);
        assert_eq!(debouncer.poll(start + ms(450)), Some("shoe"));
        assert_eq!(debouncer.poll(start + ms(2000)), None);
    }

    #[test]
    fn new_input_restarts_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));

        debouncer.push(1, start);
        debouncer.push(2, start + ms(299));
        assert_eq!(debouncer.deadline(), Some(start + ms(599)));
        assert_eq!(debouncer.poll(start + ms(300)), None);
        assert_eq!(debouncer.poll(start + ms(599)), Some(2));
    }
}
