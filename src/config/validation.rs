//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, address parses)
//! - Detect conflicting mount paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    BindAddress(String),

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroTimeout,

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("{section}.mount_path `{path}`: {reason}")]
    MountPath {
        section: &'static str,
        path: String,
        reason: &'static str,
    },

    #[error("books and inspect are both mounted at `{0}`")]
    MountConflict(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let mut mounts = Vec::new();
    if config.books.enabled {
        mounts.push(("books", config.books.mount_path.as_str()));
    }
    if config.inspect.enabled {
        mounts.push(("inspect", config.inspect.mount_path.as_str()));
    }

    for &(section, path) in &mounts {
        if let Some(reason) = mount_path_problem(path) {
            errors.push(ValidationError::MountPath {
                section,
                path: path.to_string(),
                reason,
            });
        }
    }

    if let [(_, a), (_, b)] = mounts.as_slice() {
        if a == b {
            errors.push(ValidationError::MountConflict(a.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks a prefix is usable with `nest_service`.
pub(crate) fn mount_path_problem(path: &str) -> Option<&'static str> {
    if !path.starts_with('/') {
        Some("must start with '/'")
    } else if path == "/" {
        Some("cannot mount at the root")
    } else if path.ends_with('/') {
        Some("must not end with '/'")
    } else if path.contains(['{', '}', '*']) {
        Some("must not contain '{', '}' or '*'")
    } else if path.split('/').skip(1).any(|segment| segment.is_empty()) {
        Some("must not contain empty segments")
    } else if path.split('/').any(|segment| segment.starts_with(':')) {
        Some("segments must not start with ':'")
    } else {
        None
    }
}
