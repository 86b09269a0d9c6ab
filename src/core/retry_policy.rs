//! Retry policies for the drain worker
//!
//! Decide whether a pending entry may be attempted again within the current
//! drain session, and how long the worker pauses after a failed attempt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Policy applied by the drain worker to failed deliveries
///
/// # Example
///
/// ```
/// use remote_log_client::RetryPolicy;
/// use std::time::Duration;
///
/// // Default behavior: keep retrying until delivered
/// let policy = RetryPolicy::default();
/// assert!(policy.allows_attempt(1_000));
///
/// // Give up on an entry for this session after three attempts
/// let policy = RetryPolicy::MaxAttempts(3);
/// assert!(!policy.allows_attempt(3));
///
/// let policy = RetryPolicy::FixedDelay(Duration::from_millis(250));
/// assert_eq!(policy.delay_after_failure(), Some(Duration::from_millis(250)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// Retry immediately, forever, until the entry is delivered
    ///
    /// A permanently failing endpoint keeps the worker spinning on the same
    /// entry for as long as the process lives.
    UntilDelivered,

    /// Attempt each entry at most this many times per drain session
    ///
    /// Entries that exhaust the budget stay queued and get a fresh budget
    /// when the next worker starts.
    MaxAttempts(u32),

    /// Retry forever, sleeping between failed attempts
    FixedDelay(Duration),
}

impl RetryPolicy {
    /// Whether an entry that has already been tried `session_attempts` times
    /// in this drain session may be tried again.
    #[inline]
    pub fn allows_attempt(&self, session_attempts: u32) -> bool {
        match self {
            RetryPolicy::UntilDelivered | RetryPolicy::FixedDelay(_) => true,
            RetryPolicy::MaxAttempts(max) => session_attempts < *max,
        }
    }

    /// Pause the worker takes after a failed attempt, if any
    #[inline]
    pub fn delay_after_failure(&self) -> Option<Duration> {
        match self {
            RetryPolicy::FixedDelay(delay) if !delay.is_zero() => Some(*delay),
            _ => None,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::UntilDelivered
    }
}

impl fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryPolicy::UntilDelivered => write!(f, "UntilDelivered"),
            RetryPolicy::MaxAttempts(n) => write!(f, "MaxAttempts({})", n),
            RetryPolicy::FixedDelay(d) => write!(f, "FixedDelay({:?})", d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_default() {
        assert_eq!(RetryPolicy::default(), RetryPolicy::UntilDelivered);
    }

    #[test]
    fn test_until_delivered_never_gives_up() {
        let policy = RetryPolicy::UntilDelivered;
        assert!(policy.allows_attempt(0));
        assert!(policy.allows_attempt(u32::MAX));
        assert_eq!(policy.delay_after_failure(), None);
    }

    #[test]
    fn test_max_attempts_budget() {
        let policy = RetryPolicy::MaxAttempts(2);
        assert!(policy.allows_attempt(0));
        assert!(policy.allows_attempt(1));
        assert!(!policy.allows_attempt(2));

        // Zero budget means nothing is ever attempted
        assert!(!RetryPolicy::MaxAttempts(0).allows_attempt(0));
    }

    #[test]
    fn test_fixed_delay() {
        let policy = RetryPolicy::FixedDelay(Duration::from_millis(5));
        assert!(policy.allows_attempt(100));
        assert_eq!(policy.delay_after_failure(), Some(Duration::from_millis(5)));
        assert_eq!(RetryPolicy::FixedDelay(Duration::ZERO).delay_after_failure(), None);
    }

    #[test]
    fn test_retry_policy_display() {
        assert_eq!(RetryPolicy::UntilDelivered.to_string(), "UntilDelivered");
        assert_eq!(RetryPolicy::MaxAttempts(3).to_string(), "MaxAttempts(3)");
        assert_eq!(
            RetryPolicy::FixedDelay(Duration::from_millis(100)).to_string(),
            "FixedDelay(100ms)"
        );
    }
}
