//! Convenience macro for logging JSON payloads.
//!
//! `remote_log!` builds the payload with `serde_json::json!` syntax, so
//! callers do not need `serde_json` in scope.
//!
//! # Examples
//!
//! ```no_run
//! use remote_log_client::{remote_log, RemoteLogger};
//!
//! let logger = RemoteLogger::new("billing", "eu-west");
//! let invoice_id = 42;
//!
//! remote_log!(logger, { "event": "invoice.created", "id": invoice_id })?;
//! # Ok::<(), remote_log_client::RemoteLogError>(())
//! ```

/// Log a JSON payload through a [`RemoteLogger`](crate::RemoteLogger).
///
/// Evaluates to the `Result<()>` returned by `RemoteLogger::log`.
///
/// # Examples
///
/// ```
/// # use remote_log_client::prelude::*;
/// # use remote_log_client::core::DeliveryRequest;
/// # use std::sync::Arc;
/// # struct Discard;
/// # impl Transport for Discard {
/// #     fn send(&self, _: &DeliveryRequest<'_>) -> Result<()> { Ok(()) }
/// #     fn name(&self) -> &str { "discard" }
/// # }
/// # let dispatcher = Dispatcher::with_transport(ClientConfig::new(), Arc::new(Discard));
/// # let logger = RemoteLogger::builder("app", "sys").background(false).dispatcher(dispatcher).build();
/// use remote_log_client::remote_log;
/// remote_log!(logger, { "event": "started" }).unwrap();
/// remote_log!(logger, ["a", "list", "payload"]).unwrap();
/// ```
#[macro_export]
macro_rules! remote_log {
    ($logger:expr, $($json:tt)+) => {
        $logger.log(&$crate::__serde_json::json!($($json)+))
    };
}
