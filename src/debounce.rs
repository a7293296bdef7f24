//! Quiet-period debouncing for keystroke-rate input.
//!
//! A [`Debouncer`] holds at most one pending value and one deadline. Every
//! [`Debouncer::push`] replaces both, so only the last value observed before
//! the quiet period elapses is ever emitted.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Records `value` and restarts the quiet period.
    pub fn push(&mut self, value: T) {
        self.pending = Some(Pending {
            value,
            deadline: Instant::now() + self.quiet_period,
        });
    }

    /// Drops the pending value, if any, without emitting it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Resolves with the latest value once its quiet period has elapsed.
    ///
    /// Never resolves while nothing is pending. Cancel-safe: dropping the
    /// future before it completes leaves the pending value untouched.
    pub async fn settled(&mut self) -> T {
        let Some(deadline) = self.deadline() else {
            return std::future::pending().await;
        };
        sleep_until(deadline).await;
        match self.pending.take() {
            Some(pending) => pending.value,
            None => std::future::pending().await,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn emits_only_the_last_value_of_a_burst() {
        let mut debouncer = Debouncer::new(Duration::from_millis(400));

        for text in ["i", "in", "inc", "ince", "inception"] {
            debouncer.push(text.to_string());
            advance(Duration::from_millis(100)).await;
        }

        let settled = debouncer.settled().await;
        assert_eq!(settled, "inception");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn push_restarts_the_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_millis(400));
        debouncer.push(1);
        advance(Duration::from_millis(300)).await;
        debouncer.push(2);

        let early = timeout(Duration::from_millis(399), debouncer.settled()).await;
        assert!(early.is_err(), "quiet period must restart on every push");
        assert!(debouncer.is_pending());

        assert_eq!(debouncer.settled().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_pending_never_settles() {
        let mut debouncer: Debouncer<u8> = Debouncer::default();
        assert_eq!(debouncer.quiet_period(), DEFAULT_QUIET_PERIOD);
        let result = timeout(Duration::from_secs(5), debouncer.settled()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_the_pending_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        debouncer.push("stale");
        assert_eq!(debouncer.cancel(), Some("stale"));

        let result = timeout(Duration::from_secs(1), debouncer.settled()).await;
        assert!(result.is_err());
    }
}
