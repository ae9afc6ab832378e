//! Cancel-and-restart timers driven by the caller's clock.
//!
//! Nothing here sleeps or spawns: the owner feeds in `Instant`s from its
//! event loop and asks whether the timer is due. Only the most recent
//! schedule can fire, and it fires once.
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)start the timer from `now`, dropping any earlier deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// `true` exactly once when the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut timer = Debouncer::new(Duration::from_millis(200));
        timer.schedule(start);
        assert!(!timer.poll(start + Duration::from_millis(199)));
        assert!(timer.poll(start + Duration::from_millis(200)));
        assert!(!timer.poll(start + Duration::from_millis(400)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_reschedule_restarts_the_window() {
        let start = Instant::now();
        let mut timer = Debouncer::new(Duration::from_millis(200));
        timer.schedule(start);
        timer.schedule(start + Duration::from_millis(150));
        assert!(!timer.poll(start + Duration::from_millis(250)));
        assert!(timer.poll(start + Duration::from_millis(350)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = Debouncer::new(Duration::from_secs(2));
        timer.schedule(start);
        timer.cancel();
        assert!(!timer.poll(start + Duration::from_secs(5)));
    }
}
