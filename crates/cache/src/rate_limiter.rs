use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A sliding-window call limiter: the number of successful acquisitions in
/// any rolling window of length `period` never exceeds `max_calls` (§4.8,
/// §8). `acquire()` blocks the caller until a slot frees up rather than
/// returning an error, matching the "rate limiter may also block the
/// caller" suspension point (§9). Can be disabled by configuration, in
/// which case `acquire()` returns immediately.
pub struct RateLimiter {
    calls: Mutex<VecDeque<Instant>>,
    max_calls: usize,
    period: Duration,
    enabled: bool,
}

impl RateLimiter {
    pub fn new(max_calls: usize, period: Duration) -> Self {
        Self {
            calls: Mutex::new(VecDeque::new()),
            max_calls,
            period,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            calls: Mutex::new(VecDeque::new()),
            max_calls: usize::MAX,
            period: Duration::ZERO,
            enabled: false,
        }
    }

    /// Blocks until fewer than `max_calls` acquisitions remain within the
    /// trailing `period`, then records this call and returns.
    pub async fn acquire(&self) {
        if !self.enabled {
            return;
        }
        loop {
            let wait = {
                let mut calls = self.calls.lock().unwrap();
                let now = Instant::now();
                while let Some(&oldest) = calls.front() {
                    if now.duration_since(oldest) >= self.period {
                        calls.pop_front();
                    } else {
                        break;
                    }
                }
                if calls.len() < self.max_calls {
                    calls.push_back(now);
                    None
                } else {
                    let oldest = *calls.front().expect("len >= max_calls > 0");
                    Some(self.period - now.duration_since(oldest))
                }
            };
            match wait {
                None => return,
                Some(duration) => tokio::time::sleep(duration).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_max_calls_immediately() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            limiter.acquire().await;
        }
    }

    #[tokio::test]
    async fn disabled_limiter_never_blocks() {
        let limiter = RateLimiter::disabled();
        for _ in 0..100 {
            limiter.acquire().await;
        }
    }

    #[tokio::test]
    async fn fourth_call_waits_for_window_to_slide() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
