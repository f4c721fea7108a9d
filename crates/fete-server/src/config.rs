//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use fete_shared::constants::{DEFAULT_HTTP_PORT, MAX_PHOTO_SIZE};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Filesystem path where objects are stored.
    /// Env: `STORAGE_PATH`
    /// Default: `./objects`
    pub storage_path: PathBuf,

    /// Public base URL clients should fetch objects from.
    /// Env: `PUBLIC_URL`
    /// Default: `http://localhost:8080`
    pub public_url: String,

    /// Maximum object size in bytes (25 MiB).
    /// Env: `MAX_OBJECT_SIZE`
    pub max_object_size: usize,

    /// Human-readable name for this instance.
    /// Env: `INSTANCE_NAME`
    /// Default: `"Fete"`
    pub instance_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            storage_path: PathBuf::from("./objects"),
            public_url: format!("http://localhost:{DEFAULT_HTTP_PORT}"),
            max_object_size: MAX_PHOTO_SIZE,
            instance_name: "Fete".to_string(),
        }
    }
}

impl ServerConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let http_addr = read_env("HTTP_ADDR")
            .and_then(|raw| {
                raw.parse()
                    .map_err(|e| tracing::warn!(raw, error = %e, "invalid HTTP_ADDR, using default"))
                    .ok()
            })
            .unwrap_or(defaults.http_addr);

        let storage_path = read_env("STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        let public_url = read_env("PUBLIC_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.public_url);

        let max_object_size = read_env("MAX_OBJECT_SIZE")
            .and_then(|raw| {
                raw.parse()
                    .map_err(|e| {
                        tracing::warn!(raw, error = %e, "invalid MAX_OBJECT_SIZE, using default")
                    })
                    .ok()
            })
            .unwrap_or(defaults.max_object_size);

        let instance_name = read_env("INSTANCE_NAME").unwrap_or(defaults.instance_name);

        Self {
            http_addr,
            storage_path,
            public_url,
            max_object_size,
            instance_name,
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = ServerConfig::default();
        assert_eq!(config.http_addr.port(), DEFAULT_HTTP_PORT);
        assert_eq!(config.storage_path, PathBuf::from("./objects"));
        assert!(config.max_object_size > 0);
    }

    #[test]
    fn public_url_has_no_trailing_slash() {
        let config = ServerConfig::default();
        assert!(!config.public_url.ends_with('/'));
    }
}
