//! Shared request budget.
//!
//! The remote service enforces its rate limit per API key, across every
//! endpoint. One `RateBudget` is shared by all calls in a run so that
//! running player branches concurrently never raises the aggregate rate.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use thiserror::Error;
use tracing::debug;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid rate window: {requests} requests per {period:?}")]
pub struct InvalidRateWindow {
    pub requests: u32,
    pub period: Duration,
}

/// At most `requests` calls per `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    pub requests: u32,
    pub period: Duration,
}

impl RateWindow {
    pub fn new(requests: u32, period: Duration) -> Self {
        Self { requests, period }
    }

    /// Token bucket holding `requests` tokens, refilled evenly over `period`.
    fn quota(&self) -> Result<Quota, InvalidRateWindow> {
        let invalid = || InvalidRateWindow {
            requests: self.requests,
            period: self.period,
        };
        let burst = NonZeroU32::new(self.requests).ok_or_else(invalid)?;
        let replenish = self.period / self.requests;
        Quota::with_period(replenish)
            .map(|q| q.allow_burst(burst))
            .ok_or_else(invalid)
    }
}

/// Token-bucket limiter spanning one or more windows.
pub struct RateBudget {
    limiters: Vec<(RateWindow, DirectLimiter)>,
}

impl RateBudget {
    pub fn new(windows: &[RateWindow]) -> Result<Self, InvalidRateWindow> {
        let limiters = windows
            .iter()
            .map(|w| Ok((*w, RateLimiter::direct(w.quota()?))))
            .collect::<Result<Vec<_>, InvalidRateWindow>>()?;
        Ok(Self { limiters })
    }

    /// Wait until every window admits one more call, then consume from each.
    pub async fn acquire(&self) {
        for (window, limiter) in &self.limiters {
            if limiter.check().is_err() {
                debug!(
                    "Request budget exhausted ({} per {:?}), waiting",
                    window.requests, window.period
                );
                limiter.until_ready().await;
            }
        }
    }

    pub fn windows(&self) -> Vec<RateWindow> {
        self.limiters.iter().map(|(w, _)| *w).collect()
    }
}

impl std::fmt::Debug for RateBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateBudget")
            .field("windows", &self.windows())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_zero_requests_rejected() {
        let err = RateBudget::new(&[RateWindow::new(0, Duration::from_secs(1))]).unwrap_err();
        assert_eq!(err.requests, 0);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(RateBudget::new(&[RateWindow::new(5, Duration::ZERO)]).is_err());
    }

    #[tokio::test]
    async fn test_burst_is_immediate() {
        let budget = RateBudget::new(&[RateWindow::new(5, Duration::from_secs(10))]).unwrap();

        let start = Instant::now();
        for _ in 0..5 {
            budget.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_acquire_pending_once_exhausted() {
        let budget = RateBudget::new(&[RateWindow::new(2, Duration::from_secs(60))]).unwrap();

        for _ in 0..2 {
            let mut acquire = tokio_test::task::spawn(budget.acquire());
            tokio_test::assert_ready!(acquire.poll());
        }

        let mut acquire = tokio_test::task::spawn(budget.acquire());
        tokio_test::assert_pending!(acquire.poll());
    }

    #[tokio::test]
    async fn test_exhausted_window_paces_calls() {
        let budget = RateBudget::new(&[RateWindow::new(1, Duration::from_millis(100))]).unwrap();

        let start = Instant::now();
        for _ in 0..3 {
            budget.acquire().await;
        }
        assert!(start.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_budget_shared_across_tasks() {
        let budget =
            Arc::new(RateBudget::new(&[RateWindow::new(1, Duration::from_millis(60))]).unwrap());

        let start = Instant::now();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let budget = budget.clone();
                tokio::spawn(async move {
                    budget.acquire().await;
                    budget.acquire().await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // Four calls through one 1-per-60ms bucket: at least three waits.
        assert!(start.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_tightest_window_wins() {
        let budget = RateBudget::new(&[
            RateWindow::new(100, Duration::from_secs(1)),
            RateWindow::new(2, Duration::from_millis(200)),
        ])
        .unwrap();

        let start = Instant::now();
        for _ in 0..3 {
            budget.acquire().await;
        }
        assert!(start.elapsed() >= Duration::from_millis(70));
        assert_eq!(budget.windows().len(), 2);
    }
}
