use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid nameserver address: {0}")]
    InvalidNameserver(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error with {server}: {message}")]
    TransportError { server: String, message: String },

    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Failed to read targets from {source_name}: {message}")]
    TargetSourceError {
        source_name: String,
        message: String,
    },

    #[error("Failed to write results: {0}")]
    OutputError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Lookup task failed: {0}")]
    TaskFailed(String),
}

impl DomainError {
    /// Errors that end the whole run rather than a single lookup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DomainError::TargetSourceError { .. }
                | DomainError::ConfigError(_)
                | DomainError::TaskFailed(_)
        )
    }
}
