//! Single delivery attempt
//!
//! Serializes a payload, hands it to a [`Transport`] and maps the outcome
//! through the `raise_on_failure` switch.

use super::error::{RemoteLogError, Result};
use super::transport::{DeliveryRequest, Transport};
use log::{debug, error};
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Attempt one delivery and report the raw outcome.
///
/// A panicking transport is contained and reported as
/// [`RemoteLogError::Panicked`], so neither the caller's thread nor the drain
/// worker unwinds through here.
pub fn attempt<T: Serialize + ?Sized>(
    transport: &dyn Transport,
    application_key: &str,
    system_key: &str,
    payload: &T,
) -> Result<()> {
    let request = DeliveryRequest {
        application_key,
        system_key,
        body: serde_json::to_string(payload)?,
    };

    match catch_unwind(AssertUnwindSafe(|| transport.send(&request))) {
        Ok(result) => result,
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            error!(
                "Transport '{}' panicked during delivery: {}",
                transport.name(),
                panic_msg
            );
            Err(RemoteLogError::Panicked(panic_msg))
        }
    }
}

/// Attempt one delivery, returning `Ok(true)` on success.
///
/// Failures become `Ok(false)` unless `raise_on_failure` is set, in which
/// case the underlying error is returned.
pub fn deliver<T: Serialize + ?Sized>(
    transport: &dyn Transport,
    application_key: &str,
    system_key: &str,
    payload: &T,
    raise_on_failure: bool,
) -> Result<bool> {
    match attempt(transport, application_key, system_key, payload) {
        Ok(()) => Ok(true),
        Err(e) if raise_on_failure => Err(e),
        Err(e) => {
            debug!(
                "Delivery via '{}' failed for {}/{}: {}",
                transport.name(),
                application_key,
                system_key,
                e
            );
            Ok(false)
        }
    }
}
