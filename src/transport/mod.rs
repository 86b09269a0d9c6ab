//! Transport implementations

pub mod http;

pub use http::HttpTransport;

pub use crate::core::{DeliveryRequest, Transport};
