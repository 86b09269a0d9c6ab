//! Error types for the remote log client

pub type Result<T> = std::result::Result<T, RemoteLogError>;

#[derive(Debug, thiserror::Error)]
pub enum RemoteLogError {
    /// Caller supplied an unusable argument (blank application/system key)
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// Payload could not be turned into a JSON body
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request could not be completed against the endpoint
    #[error("Transport error for '{endpoint}': {message}")]
    Transport { endpoint: String, message: String },

    /// Reading the response body failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// The drain worker thread could not be started
    #[error("Failed to spawn drain worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// A transport panicked during a delivery attempt
    #[error("Transport panicked: {0}")]
    Panicked(String),
}

impl RemoteLogError {
    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        RemoteLogError::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a transport error for the given endpoint
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        RemoteLogError::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        RemoteLogError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Whether this error happened while attempting delivery.
    ///
    /// Only delivery failures are subject to `raise_on_failure`; argument and
    /// configuration errors are always returned to the caller.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(
            self,
            RemoteLogError::Serialization(_)
                | RemoteLogError::Transport { .. }
                | RemoteLogError::Io(_)
                | RemoteLogError::Panicked(_)
        )
    }
}
