//! Cancelable delays for the cosmetic stage animations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Longest single sleep between cancellation checks.
const POLL_SLICE: Duration = Duration::from_millis(25);

/// Shared cancel flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Sleeps for `duration` unless cancelled first.
///
/// Returns `false` if the token was cancelled before the delay elapsed.
pub fn pause(duration: Duration, token: &CancellationToken) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        if token.is_cancelled() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(POLL_SLICE));
    }
}

/// Fixed-count ticker. Yields tick indices, sleeping `interval` before each
/// one after the first, and stops early on cancellation.
#[derive(Debug)]
pub struct Ticker<'a> {
    interval: Duration,
    remaining: usize,
    next: usize,
    token: &'a CancellationToken,
}

impl<'a> Ticker<'a> {
    pub fn new(interval: Duration, ticks: usize, token: &'a CancellationToken) -> Self {
        Self {
            interval,
            remaining: ticks,
            next: 0,
            token,
        }
    }
}

impl Iterator for Ticker<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 || self.token.is_cancelled() {
            return None;
        }
        if self.next > 0 && !pause(self.interval, self.token) {
            return None;
        }
        self.remaining -= 1;
        let tick = self.next;
        self.next += 1;
        Some(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_yields_all_ticks() {
        let token = CancellationToken::new();
        let ticks: Vec<usize> = Ticker::new(Duration::ZERO, 4, &token).collect();
        assert_eq!(ticks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn cancelled_ticker_stops() {
        let token = CancellationToken::new();
        let mut ticker = Ticker::new(Duration::ZERO, 10, &token);
        assert_eq!(ticker.next(), Some(0));
        token.cancel();
        assert_eq!(ticker.next(), None);
    }

    #[test]
    fn pause_returns_early_when_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let started = Instant::now();
        assert!(!pause(Duration::from_secs(5), &token));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
    }
}
