//! Transport trait for delivery destinations

use super::error::Result;

/// Header carrying the application identifier
pub const HEADER_APPLICATION_KEY: &str = "ApplicationKey";

/// Header carrying the system identifier
pub const HEADER_SYSTEM_KEY: &str = "SystemKey";

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// One outbound delivery: the destination keys and an already serialized
/// JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRequest<'a> {
    pub application_key: &'a str,
    pub system_key: &'a str,
    pub body: String,
}

/// Performs one network round-trip per call.
///
/// `send` returns `Ok(())` once a request/response cycle completed, whatever
/// the status code. Any failure to complete the cycle is an error. The same
/// transport is shared by caller threads and the drain worker.
///
/// # Example
///
/// ```
/// use remote_log_client::core::{DeliveryRequest, Result, Transport};
///
/// struct Discard;
///
/// impl Transport for Discard {
///     fn send(&self, _request: &DeliveryRequest<'_>) -> Result<()> {
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "discard"
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    fn send(&self, request: &DeliveryRequest<'_>) -> Result<()>;
    fn name(&self) -> &str;
}
