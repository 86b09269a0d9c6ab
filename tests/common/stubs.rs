//! Transport stubs recording every delivery attempt

use parking_lot::{Condvar, Mutex};
use remote_log_client::core::DeliveryRequest;
use remote_log_client::{RemoteLogError, Result, Transport};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Stub whose outcome can be flipped while a worker is using it.
///
/// A closed gate parks every `send` until [`StubTransport::open_gate`] is
/// called, which lets tests hold the drain worker mid-attempt.
#[derive(Default)]
pub struct StubTransport {
    failing: AtomicBool,
    calls: AtomicUsize,
    bodies: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    gate_closed: Mutex<bool>,
    gate: Condvar,
}

#[allow(dead_code)]
impl StubTransport {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let stub = Self::default();
        stub.failing.store(true, Ordering::SeqCst);
        Arc::new(stub)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn close_gate(&self) {
        *self.gate_closed.lock() = true;
    }

    pub fn open_gate(&self) {
        *self.gate_closed.lock() = false;
        self.gate.notify_all();
    }

    /// Number of `send` calls, successful or not
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Bodies of successful sends, in order
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().clone()
    }

    /// Highest number of sends observed running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &DeliveryRequest<'_>) -> Result<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);

        {
            let mut closed = self.gate_closed.lock();
            while *closed {
                self.gate.wait(&mut closed);
            }
        }

        let result = if self.failing.load(Ordering::SeqCst) {
            Err(RemoteLogError::transport("stub://log", "simulated connection reset"))
        } else {
            self.bodies.lock().push(request.body.clone());
            Ok(())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn name(&self) -> &str {
        "stub"
    }
}
