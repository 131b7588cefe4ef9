//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the resource server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Books demo resource.
    pub books: BooksConfig,

    /// Request inspection endpoints.
    pub inspect: InspectConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Books demo resource configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BooksConfig {
    /// Mount the books resource.
    pub enabled: bool,

    /// Path prefix the resource is mounted under.
    pub mount_path: String,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mount_path: "/books".to_string(),
        }
    }
}

/// Request inspection endpoints configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Mount the inspection endpoints.
    pub enabled: bool,

    /// Path prefix the endpoints are mounted under.
    pub mount_path: String,

    /// Honour X-Forwarded-Proto / X-Forwarded-Host.
    pub trust_proxy: bool,

    /// Number of trailing host labels that are not subdomains
    /// (2 for "example.com").
    pub subdomain_offset: usize,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mount_path: "/inspect".to_string(),
            trust_proxy: false,
            subdomain_offset: 2,
        }
    }
}
