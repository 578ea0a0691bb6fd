//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export PUBLIC_API_BASE_URL="https://api.short.example"
//! export ASSET_ORIGIN="http://localhost:4173"
//! export ASSET_MANIFEST="build/manifest.json"
//! ```
//!
//! ## Required Variables
//!
//! - `PUBLIC_API_BASE_URL` - Base URL of the shortening backend
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `ASSET_ORIGIN` - Origin serving the site's build output (enables offline caching if set)
//! - `ASSET_MANIFEST` - Path to the build asset manifest (default: `build/manifest.json`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use url::Url;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Origin the build/static assets are fetched from. Offline caching is
    /// disabled when unset.
    pub asset_origin: Option<String>,
    /// Build manifest listing the asset paths and the build version.
    /// Only read when `asset_origin` is set.
    pub asset_manifest: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PUBLIC_API_BASE_URL` is missing.
    pub fn from_env() -> Result<Self> {
        let api_base_url =
            env::var("PUBLIC_API_BASE_URL").context("PUBLIC_API_BASE_URL must be set")?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let asset_origin = env::var("ASSET_ORIGIN").ok().filter(|v| !v.is_empty());
        let asset_manifest = env::var("ASSET_MANIFEST")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("build/manifest.json"));

        Ok(Self {
            api_base_url,
            listen_addr,
            log_level,
            log_format,
            asset_origin,
            asset_manifest,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `api_base_url` or `asset_origin` is not an http(s) URL
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    pub fn validate(&self) -> Result<()> {
        validate_http_url("PUBLIC_API_BASE_URL", &self.api_base_url)?;

        if let Some(ref origin) = self.asset_origin {
            validate_http_url("ASSET_ORIGIN", origin)?;
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        Ok(())
    }

    /// Returns whether offline asset caching is enabled.
    pub fn is_offline_enabled(&self) -> bool {
        self.asset_origin.is_some()
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  API base URL: {}", self.api_base_url);

        if let Some(ref origin) = self.asset_origin {
            tracing::info!(
                "  Offline cache: {} (manifest {})",
                origin,
                self.asset_manifest.display()
            );
        } else {
            tracing::info!("  Offline cache: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn validate_http_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{name} is not a valid URL: '{value}'"))?;

    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{name} must start with 'http://' or 'https://', got '{value}'");
    }

    Ok(())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            api_base_url: "https://api.example.com".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            asset_origin: None,
            asset_manifest: PathBuf::from("build/manifest.json"),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        config.api_base_url = "ftp://api.example.com".to_string();
        assert!(config.validate().is_err());

        config.api_base_url = "api.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_asset_origin_validation() {
        let mut config = valid_config();
        assert!(!config.is_offline_enabled());

        config.asset_origin = Some("http://localhost:4173".to_string());
        assert!(config.validate().is_ok());
        assert!(config.is_offline_enabled());

        config.asset_origin = Some("localhost:4173".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("PUBLIC_API_BASE_URL", "http://localhost:8080");
            env::remove_var("LISTEN");
            env::remove_var("LOG_FORMAT");
            env::remove_var("ASSET_ORIGIN");
            env::remove_var("ASSET_MANIFEST");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.log_format, "text");
        assert_eq!(config.asset_origin, None);
        assert_eq!(config.asset_manifest, PathBuf::from("build/manifest.json"));

        unsafe {
            env::remove_var("PUBLIC_API_BASE_URL");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_base_url() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("PUBLIC_API_BASE_URL");
        }

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_empty_asset_origin_disables_offline() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PUBLIC_API_BASE_URL", "http://localhost:8080");
            env::set_var("ASSET_ORIGIN", "");
        }

        let config = Config::from_env().unwrap();
        assert!(!config.is_offline_enabled());

        unsafe {
            env::remove_var("PUBLIC_API_BASE_URL");
            env::remove_var("ASSET_ORIGIN");
        }
    }
}
