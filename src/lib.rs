//! # Remote Log Client
//!
//! A small client for forwarding application payloads to a remote logging
//! endpoint over HTTP.
//!
//! ## Features
//!
//! - **Fire-and-forget**: payloads are queued and delivered by a single
//!   background worker
//! - **Synchronous mode**: one delivery attempt on the calling thread
//! - **Retry queue**: failed deliveries stay queued until they succeed
//! - **Pluggable transport**: HTTP by default, any [`Transport`] for tests
//!
//! ```no_run
//! use remote_log_client::prelude::*;
//! use serde_json::json;
//!
//! let logger = RemoteLogger::new("billing", "eu-west");
//! logger.log(&json!({"event": "invoice.created", "amount": 120}))?;
//! # Ok::<(), RemoteLogError>(())
//! ```

pub mod core;
pub mod macros;
pub mod transport;

#[doc(hidden)]
pub use serde_json as __serde_json;

pub mod prelude {
    pub use crate::core::{
        ClientConfig, DeliveryMetrics, DeliveryRequest, Dispatcher, RemoteLogError,
        RemoteLogger, RemoteLoggerBuilder, Result, RetryPolicy, Transport,
    };
    pub use crate::transport::HttpTransport;
}

pub use crate::core::{
    global, install_global, log, ClientConfig, DeliveryMetrics, DeliveryRequest, DeliveryStatus,
    Dispatcher, LogEntry, RemoteLogError, RemoteLogger, RemoteLoggerBuilder, Result, RetryPolicy,
    Transport, DEFAULT_ENDPOINT,
};
pub use crate::transport::HttpTransport;
