//! Error types for the search pipeline.
//!
//! Only [`SearchError`] ever reaches a caller of the search facade. Provider
//! and record errors are absorbed by the aggregation engine and show up as
//! reduced counters and log lines.

/// Errors returned to the caller of a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A query-derived input (date or time window) could not be parsed.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
}

impl SearchError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Whole-call failure of one upstream source.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Connection, TLS or transport-level timeout.
    #[error("{provider}: transport error: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success HTTP status.
    #[error("{provider}: upstream returned HTTP {status}")]
    Status { provider: String, status: u16 },

    /// Body was not valid JSON for the upstream schema.
    #[error("{provider}: decode error: {source}")]
    Decode {
        provider: String,
        #[source]
        source: serde_json::Error,
    },

    /// Envelope decoded but flagged failure.
    #[error("{provider}: upstream reported failure: {message}")]
    Upstream { provider: String, message: String },
}

impl ProviderError {
    pub fn transport(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            provider: provider.into(),
            source,
        }
    }

    pub fn decode(provider: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            provider: provider.into(),
            source,
        }
    }

    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Failure to map a single upstream record; the record is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("unsupported time format: {0}")]
    Time(String),

    #[error("unknown timezone: {0}")]
    Timezone(String),

    #[error("unsupported price format: {0}")]
    Price(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration error: {0}")]
    Invalid(String),
}
