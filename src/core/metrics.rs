//! Delivery metrics for observability
//!
//! Counters describing what the dispatcher and its drain worker have done:
//! how many entries were queued, delivered, retried and how many workers ran.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for delivery observability
///
/// # Example
///
/// ```
/// use remote_log_client::DeliveryMetrics;
///
/// let metrics = DeliveryMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_delivered();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.delivered(), 1);
/// ```
#[derive(Debug)]
pub struct DeliveryMetrics {
    /// Entries appended to the queue
    enqueued: AtomicU64,

    /// Delivery attempts that completed a request/response cycle
    delivered: AtomicU64,

    /// Delivery attempts that failed
    failed_attempts: AtomicU64,

    /// Calls ignored because the payload was absent
    skipped: AtomicU64,

    /// Drain workers launched
    workers_started: AtomicU64,

    /// Drain workers terminated by a raised delivery failure
    worker_failures: AtomicU64,
}

impl DeliveryMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            failed_attempts: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            workers_started: AtomicU64::new(0),
            worker_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_attempts(&self) -> u64 {
        self.failed_attempts.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn workers_started(&self) -> u64 {
        self.workers_started.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn worker_failures(&self) -> u64 {
        self.worker_failures.load(Ordering::Relaxed)
    }

    /// Record a queued entry, returns the previous count
    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed_attempt(&self) -> u64 {
        self.failed_attempts.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_skipped(&self) -> u64 {
        self.skipped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_worker_started(&self) -> u64 {
        self.workers_started.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_worker_failure(&self) -> u64 {
        self.worker_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of attempts that succeeded, as a percentage (0.0 - 100.0)
    ///
    /// Returns 100.0 if nothing has been attempted yet.
    pub fn success_rate(&self) -> f64 {
        let delivered = self.delivered() as f64;
        let total = delivered + self.failed_attempts() as f64;
        if total == 0.0 {
            100.0
        } else {
            (delivered / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.failed_attempts.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        self.workers_started.store(0, Ordering::Relaxed);
        self.worker_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for DeliveryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DeliveryMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            delivered: AtomicU64::new(self.delivered()),
            failed_attempts: AtomicU64::new(self.failed_attempts()),
            skipped: AtomicU64::new(self.skipped()),
            workers_started: AtomicU64::new(self.workers_started()),
            worker_failures: AtomicU64::new(self.worker_failures()),
        }
    }
}
