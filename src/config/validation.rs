//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the upstream authority
//! - Validate value ranges (timeouts > 0)
//! - Check TLS material exists before the server tries to load it
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in a parsed config.
#[derive(Debug)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidUpstreamHost(String),
    InvalidMetricsAddress(String),
    ZeroTimeout(&'static str),
    MissingTlsFile { role: &'static str, path: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address {addr:?} is not a socket address")
            }
            ValidationError::InvalidUpstreamHost(host) => {
                write!(f, "upstream.host {host:?} is not a valid authority")
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address {addr:?} is not a socket address")
            }
            ValidationError::ZeroTimeout(field) => {
                write!(f, "{field} must be greater than zero")
            }
            ValidationError::MissingTlsFile { role, path } => {
                write!(f, "TLS {role} file not found: {path}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.upstream.authority().is_err() {
        errors.push(ValidationError::InvalidUpstreamHost(
            config.upstream.host.clone(),
        ));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if let Some(tls) = &config.listener.tls {
        if !Path::new(&tls.cert_path).exists() {
            errors.push(ValidationError::MissingTlsFile {
                role: "certificate",
                path: tls.cert_path.clone(),
            });
        }
        if !Path::new(&tls.key_path).exists() {
            errors.push(ValidationError::MissingTlsFile {
                role: "key",
                path: tls.key_path.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
