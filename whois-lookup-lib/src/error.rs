//! Error handling for lookup operations.
//!
//! This module defines the error type covering every way a lookup can fail,
//! from an empty form submission to an unreachable upstream service.

use std::fmt;
use std::time::Duration;

/// Main error type for lookup operations.
#[derive(Debug, Clone)]
pub enum LookupError {
    /// Submitted with an empty (or whitespace-only) domain name
    EmptyInput,

    /// Response arrived but carried no `WhoisRecord`
    UpstreamMiss { domain: String },

    /// Network-related errors (connection refused, DNS, TLS, etc.)
    Transport {
        message: String,
        source: Option<String>,
    },

    /// Upstream answered with a non-success HTTP status
    HttpStatus { domain: String, status_code: u16 },

    /// Timeout errors when the upstream takes too long
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Response body was not valid JSON
    Parse { message: String },

    /// No API key was supplied by flag, environment, or config file
    MissingApiKey,

    /// Configuration errors (invalid settings, etc.)
    ConfigError { message: String },

    /// File I/O errors when reading configuration
    FileError { path: String, message: String },
}

impl LookupError {
    /// Create a new upstream-miss error.
    pub fn upstream_miss<D: Into<String>>(domain: D) -> Self {
        Self::UpstreamMiss {
            domain: domain.into(),
        }
    }

    /// Create a new transport error.
    pub fn transport<M: Into<String>>(message: M) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new transport error with source information.
    pub fn transport_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new HTTP status error.
    pub fn http_status<D: Into<String>>(domain: D, status_code: u16) -> Self {
        Self::HttpStatus {
            domain: domain.into(),
            status_code,
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new parse error.
    pub fn parse<M: Into<String>>(message: M) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the user can fix this by editing the input and resubmitting.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }

    /// Whether this failure is reported with the generic "no records" banner.
    ///
    /// Misses and transport failures are indistinguishable to the user.
    pub fn shows_no_records_banner(&self) -> bool {
        matches!(
            self,
            Self::UpstreamMiss { .. }
                | Self::Transport { .. }
                | Self::HttpStatus { .. }
                | Self::Timeout { .. }
                | Self::Parse { .. }
        )
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Please enter a domain name to search"),
            Self::UpstreamMiss { domain } => {
                write!(f, "No WHOIS record found for '{}'", domain)
            }
            Self::Transport { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::HttpStatus {
                domain,
                status_code,
            } => {
                write!(f, "Lookup for '{}' failed with HTTP {}", domain, status_code)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Parse { message } => write!(f, "Parse error: {}", message),
            Self::MissingApiKey => write!(
                f,
                "No API key configured (use --api-key, WL_API_KEY, or [api] key in a config file)"
            ),
            Self::ConfigError { message } => write!(f, "Configuration error: {}", message),
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::transport_with_source("Request timed out", err.to_string())
        } else if err.is_connect() {
            Self::transport_with_source("Connection failed", err.to_string())
        } else if err.is_decode() {
            Self::parse(format!("Malformed response body: {}", err))
        } else {
            Self::transport_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        Self::transport_with_source("I/O error", err.to_string())
    }
}
