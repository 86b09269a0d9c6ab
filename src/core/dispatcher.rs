//! Dispatcher: shared queue, single-flight drain worker, delivery entry points

use super::{
    config::ClientConfig,
    delivery,
    error::{RemoteLogError, Result},
    log_entry::LogEntry,
    metrics::DeliveryMetrics,
    queue::EntryQueue,
    retry_policy::RetryPolicy,
    transport::Transport,
};
use crate::transport::HttpTransport;
use log::{debug, error, warn};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

struct Shared {
    queue: Mutex<EntryQueue>,
    /// True from the moment a launcher wins the CAS until the worker has
    /// closed its session under the queue lock
    active: AtomicBool,
    transport: Arc<dyn Transport>,
    retry_policy: RetryPolicy,
    worker_thread_name: String,
    metrics: DeliveryMetrics,
}

/// Owns the retry queue and the drain worker for one transport.
///
/// Cloning is cheap; clones share the same queue, worker and metrics.
///
/// # Example
///
/// ```no_run
/// use remote_log_client::{ClientConfig, Dispatcher};
/// use serde_json::json;
///
/// let dispatcher = Dispatcher::new(
///     ClientConfig::new().with_endpoint("http://127.0.0.1:8080/api/v1/log"),
/// )?;
///
/// dispatcher.log("billing", "eu-west", &json!({"event": "invoice.created"}), true, false)?;
/// # Ok::<(), remote_log_client::RemoteLogError>(())
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    shared: Arc<Shared>,
}

impl Dispatcher {
    /// Create a dispatcher delivering over HTTP to `config.endpoint`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a dispatcher around any transport.
    ///
    /// Only the retry policy and worker thread name are taken from `config`.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(EntryQueue::new()),
                active: AtomicBool::new(false),
                transport,
                retry_policy: config.retry_policy,
                worker_thread_name: config.worker_thread_name,
                metrics: DeliveryMetrics::new(),
            }),
        }
    }

    /// Validate, then deliver now or queue for the background worker.
    ///
    /// * Blank keys, and keys that cannot travel as a header value, fail with
    ///   [`RemoteLogError::InvalidArgument`] before anything else happens.
    /// * A payload serializing to JSON `null` is ignored. That includes
    ///   `None`, `()` and non-finite floats, which JSON renders as `null`.
    /// * With `use_background == false` one attempt is made on this thread;
    ///   its outcome is only reported when `raise_on_failure` is set.
    /// * With `use_background == true` the entry is queued and a drain worker
    ///   is started unless one is already running.
    ///
    /// A queued entry with `raise_on_failure` set stops the drain worker on
    /// its first failed attempt. It stays queued, along with anything queued
    /// behind it, until the next background `log` call starts a new worker.
    pub fn log<T: Serialize + ?Sized>(
        &self,
        application_key: &str,
        system_key: &str,
        payload: &T,
        use_background: bool,
        raise_on_failure: bool,
    ) -> Result<()> {
        validate_keys(application_key, system_key)?;

        let payload = match serde_json::to_value(payload) {
            Ok(Value::Null) => {
                self.shared.metrics.record_skipped();
                return Ok(());
            }
            Ok(value) => value,
            Err(e) => {
                self.shared.metrics.record_failed_attempt();
                if raise_on_failure {
                    return Err(e.into());
                }
                warn!(
                    "Dropping payload for {}/{}: not serializable: {}",
                    application_key, system_key, e
                );
                return Ok(());
            }
        };

        if use_background {
            self.enqueue(LogEntry::new(
                application_key,
                system_key,
                payload,
                raise_on_failure,
            ))
        } else {
            self.deliver_checked(application_key, system_key, &payload, raise_on_failure)
                .map(|_| ())
        }
    }

    /// Make one synchronous delivery attempt on the caller's thread.
    ///
    /// Returns `Ok(true)` when the request/response cycle completed and
    /// `Ok(false)` on failure, unless `raise_on_failure` is set. Keys are
    /// validated as in [`Dispatcher::log`], whatever `raise_on_failure` says.
    pub fn deliver<T: Serialize + ?Sized>(
        &self,
        application_key: &str,
        system_key: &str,
        payload: &T,
        raise_on_failure: bool,
    ) -> Result<bool> {
        validate_keys(application_key, system_key)?;
        self.deliver_checked(application_key, system_key, payload, raise_on_failure)
    }

    fn deliver_checked<T: Serialize + ?Sized>(
        &self,
        application_key: &str,
        system_key: &str,
        payload: &T,
        raise_on_failure: bool,
    ) -> Result<bool> {
        let result = delivery::deliver(
            self.shared.transport.as_ref(),
            application_key,
            system_key,
            payload,
            raise_on_failure,
        );
        match result {
            Ok(true) => self.shared.metrics.record_delivered(),
            _ => self.shared.metrics.record_failed_attempt(),
        };
        result
    }

    fn enqueue(&self, entry: LogEntry) -> Result<()> {
        let id = self.shared.queue.lock().push(entry);
        self.shared.metrics.record_enqueued();
        debug!("Queued entry #{}", id);
        self.ensure_worker()
    }

    /// Start a drain worker unless one is active.
    ///
    /// Returns `Ok(())` both when a worker was started and when one was
    /// already running.
    fn ensure_worker(&self) -> Result<()> {
        if self
            .shared
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(());
        }

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name(self.shared.worker_thread_name.clone())
            .spawn(move || shared.run_worker());

        match spawned {
            Ok(_handle) => Ok(()),
            Err(e) => {
                self.shared.active.store(false, Ordering::Release);
                error!("Failed to spawn drain worker: {}", e);
                Err(RemoteLogError::WorkerSpawn(e))
            }
        }
    }

    /// Whether a drain worker is currently running
    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    /// Number of queued entries, delivered ones included until pruned
    pub fn queue_len(&self) -> usize {
        self.shared.queue.lock().len()
    }

    pub fn pending_count(&self) -> usize {
        self.shared.queue.lock().pending_count()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.shared.retry_policy
    }

    pub fn transport_name(&self) -> &str {
        self.shared.transport.name()
    }

    pub fn metrics(&self) -> &DeliveryMetrics {
        &self.shared.metrics
    }

    /// Wait until no drain worker is running.
    ///
    /// Returns `true` if the worker finished within `timeout`. Under the
    /// default retry policy a permanently failing endpoint keeps the worker
    /// alive, in which case this returns `false`.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        loop {
            if !self.is_active() {
                return true;
            }
            if start.elapsed() >= timeout {
                return false;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl Shared {
    fn run_worker(&self) {
        self.metrics.record_worker_started();
        debug!("Drain worker started ({})", self.transport.name());

        match self.drain() {
            Ok(delivered) => debug!("Drain worker finished, {} entries delivered", delivered),
            Err(e) => {
                self.metrics.record_worker_failure();
                error!("Drain worker terminated by delivery failure: {}", e);
                let mut queue = self.queue.lock();
                self.close_session(&mut queue);
            }
        }
    }

    /// Deliver queued entries until none is eligible.
    ///
    /// An entry flagged `raise_on_failure` that fails ends the session with
    /// its error; the entry itself stays queued.
    fn drain(&self) -> Result<usize> {
        let mut delivered = 0;

        loop {
            let Some(entry) = self.claim_or_close() else {
                return Ok(delivered);
            };

            match delivery::attempt(
                self.transport.as_ref(),
                &entry.application_key,
                &entry.system_key,
                &entry.payload,
            ) {
                Ok(()) => {
                    self.queue.lock().mark_delivered(entry.id);
                    self.metrics.record_delivered();
                    delivered += 1;
                }
                Err(e) => {
                    self.metrics.record_failed_attempt();
                    if entry.raise_on_failure {
                        return Err(e);
                    }
                    debug!(
                        "Attempt {} for entry #{} failed: {}",
                        entry.total_attempts, entry.id, e
                    );
                    if !self.retry_policy.allows_attempt(entry.session_attempts) {
                        warn!(
                            "Giving up on entry #{} for this drain session after {} attempts",
                            entry.id, entry.session_attempts
                        );
                    } else if let Some(delay) = self.retry_policy.delay_after_failure() {
                        thread::sleep(delay);
                    }
                }
            }
        }
    }

    /// Claim the next eligible entry, or end the session.
    ///
    /// The empty check, the prune and the flag reset all happen under one
    /// queue lock, so an entry appended concurrently is either claimed here
    /// or its producer observes the cleared flag and starts a new worker.
    fn claim_or_close(&self) -> Option<LogEntry> {
        let mut queue = self.queue.lock();
        let next = queue.claim_next(&self.retry_policy);
        if next.is_none() {
            self.close_session(&mut queue);
        }
        next
    }

    fn close_session(&self, queue: &mut EntryQueue) {
        let pruned = queue.prune();
        queue.reset_session();
        self.active.store(false, Ordering::Release);
        debug!(
            "Drain session closed: {} pruned, {} still queued",
            pruned,
            queue.len()
        );
    }
}

/// Reject application/system keys that are blank or unusable as header values.
///
/// Header values may hold tab, visible ASCII and any non-ASCII byte. A key
/// with any other control character would fail every delivery attempt.
pub fn validate_keys(application_key: &str, system_key: &str) -> Result<()> {
    validate_key("application_key", application_key)?;
    validate_key("system_key", system_key)
}

fn validate_key(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RemoteLogError::invalid_argument(
            name,
            "must not be empty or whitespace",
        ));
    }
    if value.chars().any(|c| c != '\t' && c.is_ascii_control()) {
        return Err(RemoteLogError::invalid_argument(
            name,
            "must not contain control characters",
        ));
    }
    Ok(())
}
