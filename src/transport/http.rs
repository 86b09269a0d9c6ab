//! HTTP transport for remote logging
//!
//! POSTs each payload as a JSON body to the configured endpoint, carrying the
//! application and system keys as request headers. The response status is
//! not interpreted: any completed request/response cycle counts as delivered.

use crate::core::transport::{CONTENT_TYPE_JSON, HEADER_APPLICATION_KEY, HEADER_SYSTEM_KEY};
use crate::core::{ClientConfig, DeliveryRequest, RemoteLogError, Result, Transport};
use log::debug;
use std::io;
use ureq::{Agent, AgentBuilder};

/// Transport that sends payloads over HTTP(S)
///
/// The underlying `ureq::Agent` pools connections, so one transport should be
/// shared rather than created per call.
///
/// # Example
///
/// ```no_run
/// use remote_log_client::transport::HttpTransport;
/// use remote_log_client::ClientConfig;
///
/// let transport = HttpTransport::new(
///     &ClientConfig::new().with_endpoint("http://127.0.0.1:8080/api/v1/log"),
/// )
/// .expect("valid configuration");
/// assert_eq!(transport.endpoint(), "http://127.0.0.1:8080/api/v1/log");
/// ```
pub struct HttpTransport {
    agent: Agent,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport for `config.endpoint`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the configuration does not validate
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Build without validating; callers must pass a validated configuration
    pub(crate) fn from_config(config: &ClientConfig) -> Self {
        let agent = AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout(config.timeout)
            .build();

        Self {
            agent,
            endpoint: config.endpoint.trim().to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &DeliveryRequest<'_>) -> Result<()> {
        let result = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", CONTENT_TYPE_JSON)
            .set(HEADER_APPLICATION_KEY, request.application_key)
            .set(HEADER_SYSTEM_KEY, request.system_key)
            .send_string(&request.body);

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                debug!("Endpoint {} answered with status {}", self.endpoint, code);
                response
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(RemoteLogError::transport(&self.endpoint, transport.to_string()));
            }
        };

        // Read the body to the end so the connection can go back to the pool
        let mut reader = response.into_reader();
        io::copy(&mut reader, &mut io::sink())?;
        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}
