//! Core client types and traits

pub mod config;
pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod log_entry;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod retry_policy;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use dispatcher::{validate_keys, Dispatcher};
pub use error::{RemoteLogError, Result};
pub use log_entry::{DeliveryStatus, LogEntry};
pub use logger::{global, install_global, log, RemoteLogger, RemoteLoggerBuilder};
pub use metrics::DeliveryMetrics;
pub use queue::EntryQueue;
pub use retry_policy::RetryPolicy;
pub use transport::{DeliveryRequest, Transport};
