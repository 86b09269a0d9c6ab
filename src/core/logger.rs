//! Logger facade: per-instance defaults and the process-wide entry point

use super::{
    config::ClientConfig,
    dispatcher::Dispatcher,
    error::{RemoteLogError, Result},
};
use crate::transport::HttpTransport;
use log::warn;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::sync::Arc;

static GLOBAL_DISPATCHER: OnceCell<Dispatcher> = OnceCell::new();

/// The process-wide dispatcher behind [`log`] and loggers built without an
/// explicit dispatcher.
///
/// Created on first use from [`ClientConfig::from_env`]; an invalid
/// environment falls back to the default configuration.
pub fn global() -> &'static Dispatcher {
    GLOBAL_DISPATCHER.get_or_init(|| {
        let config = ClientConfig::from_env().unwrap_or_else(|e| {
            warn!("Ignoring remote log environment configuration: {}", e);
            ClientConfig::default()
        });
        let transport = HttpTransport::from_config(&config);
        Dispatcher::with_transport(config, Arc::new(transport))
    })
}

/// Install the process-wide dispatcher.
///
/// Must happen before anything logs through [`global`].
///
/// # Errors
///
/// Returns `InvalidConfiguration` if a global dispatcher already exists.
pub fn install_global(dispatcher: Dispatcher) -> Result<()> {
    GLOBAL_DISPATCHER
        .set(dispatcher)
        .map_err(|_| RemoteLogError::config("global dispatcher", "already initialized"))
}

/// Log a payload through the process-wide dispatcher.
///
/// See [`Dispatcher::log`] for the exact semantics.
///
/// # Example
///
/// ```no_run
/// use serde_json::json;
///
/// remote_log_client::log("billing", "eu-west", &json!({"event": "invoice.created"}), true, false)?;
/// # Ok::<(), remote_log_client::RemoteLogError>(())
/// ```
pub fn log<T: Serialize + ?Sized>(
    application_key: &str,
    system_key: &str,
    payload: &T,
    use_background: bool,
    raise_on_failure: bool,
) -> Result<()> {
    global().log(
        application_key,
        system_key,
        payload,
        use_background,
        raise_on_failure,
    )
}

/// Logger bound to one application/system pair.
///
/// Every call forwards to a [`Dispatcher`] with the defaults captured at
/// construction: background delivery on, failures swallowed.
#[derive(Clone)]
pub struct RemoteLogger {
    application_key: String,
    system_key: String,
    use_background: bool,
    raise_on_failure: bool,
    dispatcher: Option<Dispatcher>,
}

impl RemoteLogger {
    #[must_use]
    pub fn new(application_key: impl Into<String>, system_key: impl Into<String>) -> Self {
        Self::builder(application_key, system_key).build()
    }

    /// Create a builder for RemoteLogger
    ///
    /// # Example
    /// ```
    /// use remote_log_client::RemoteLogger;
    ///
    /// let logger = RemoteLogger::builder("billing", "eu-west")
    ///     .background(false)
    ///     .raise_on_failure(true)
    ///     .build();
    ///
    /// assert!(!logger.use_background());
    /// ```
    #[must_use]
    pub fn builder(
        application_key: impl Into<String>,
        system_key: impl Into<String>,
    ) -> RemoteLoggerBuilder {
        RemoteLoggerBuilder::new(application_key, system_key)
    }

    pub fn log<T: Serialize + ?Sized>(&self, payload: &T) -> Result<()> {
        self.dispatcher().log(
            &self.application_key,
            &self.system_key,
            payload,
            self.use_background,
            self.raise_on_failure,
        )
    }

    pub fn application_key(&self) -> &str {
        &self.application_key
    }

    pub fn system_key(&self) -> &str {
        &self.system_key
    }

    pub fn use_background(&self) -> bool {
        self.use_background
    }

    pub fn raise_on_failure(&self) -> bool {
        self.raise_on_failure
    }

    /// The dispatcher this logger forwards to
    pub fn dispatcher(&self) -> &Dispatcher {
        self.dispatcher.as_ref().unwrap_or_else(|| global())
    }
}

/// Builder for constructing RemoteLogger with a fluent API
pub struct RemoteLoggerBuilder {
    application_key: String,
    system_key: String,
    use_background: bool,
    raise_on_failure: bool,
    dispatcher: Option<Dispatcher>,
}

impl RemoteLoggerBuilder {
    pub fn new(application_key: impl Into<String>, system_key: impl Into<String>) -> Self {
        Self {
            application_key: application_key.into(),
            system_key: system_key.into(),
            use_background: true,
            raise_on_failure: false,
            dispatcher: None,
        }
    }

    /// Queue payloads for the background worker (default) or send them on
    /// the calling thread.
    #[must_use = "builder methods return a new value"]
    pub fn background(mut self, enable: bool) -> Self {
        self.use_background = enable;
        self
    }

    /// Return delivery failures instead of swallowing them. Default: off
    #[must_use = "builder methods return a new value"]
    pub fn raise_on_failure(mut self, enable: bool) -> Self {
        self.raise_on_failure = enable;
        self
    }

    /// Use this dispatcher instead of the process-wide one
    #[must_use = "builder methods return a new value"]
    pub fn dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn build(self) -> RemoteLogger {
        RemoteLogger {
            application_key: self.application_key,
            system_key: self.system_key,
            use_background: self.use_background,
            raise_on_failure: self.raise_on_failure,
            dispatcher: self.dispatcher,
        }
    }
}
