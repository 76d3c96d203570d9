//! Configuration management for optrace
//!
//! This crate provides functionality for managing the optrace configuration,
//! including loading, saving and updating configuration settings. The trace
//! session reads from this configuration when the caller does not supply an
//! explicit RPC endpoint.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use optrace_common::utils::io::file::{delete_path, read_file, write_file};
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use tracing::debug;

/// Default bound, in milliseconds, on how long a single simulate call may wait
/// for the node before it is reported as unavailable.
pub const DEFAULT_TRACE_TIMEOUT_MS: u64 = 10_000;

/// The [`Configuration`] struct represents the configuration of the optrace
/// library. The trace session will attempt to read from this configuration
/// when possible.
#[derive(Deserialize, Serialize, Debug)]
pub struct Configuration {
    /// The URL for the Ethereum RPC endpoint
    pub rpc_url: String,

    /// The URL for a local Ethereum RPC endpoint
    pub local_rpc_url: String,

    /// Bound, in milliseconds, on a single simulate call against the node
    pub trace_timeout_ms: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            rpc_url: "".to_string(),
            local_rpc_url: "http://localhost:8545".to_string(),
            trace_timeout_ms: DEFAULT_TRACE_TIMEOUT_MS,
        }
    }
}

#[allow(deprecated)]
impl Configuration {
    /// Returns the current configuration.
    pub fn load() -> Result<Self, Error> {
        let mut home = home_dir().ok_or_else(|| {
            Error::Generic(
                "failed to get home directory. does your os support `std::env::home_dir()`?"
                    .to_string(),
            )
        })?;
        home.push(".optrace");
        home.push("config.toml");

        // if the config file doesn't exist, create it
        if !home.exists() {
            let config = Configuration::default();
            config.save()?;
        }

        // read the config file
        let contents = read_file(
            home.to_str()
                .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))?,
        )
        .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        // parse the config file
        let mut config: Configuration = toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))?;

        // load mesc config if enabled
        if !mesc::is_mesc_enabled() {
            return Ok(config);
        }

        if let Some(endpoint) = mesc::get_default_endpoint(Some("optrace"))
            .map_err(|e| Error::Generic(format!("MESC error: {e}")))?
        {
            debug!("overriding rpc_url with mesc endpoint");
            config.rpc_url = endpoint.url;
        }

        Ok(config)
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        let mut home = home_dir().ok_or_else(|| {
            Error::Generic(
                "failed to get home directory. does your os support `std::env::home_dir()`?"
                    .to_string(),
            )
        })?;
        home.push(".optrace");
        home.push("config.toml");

        write_file(
            home.to_str()
                .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file at `$HOME/.optrace/config.toml`.
    pub fn delete() -> Result<(), Error> {
        let mut home = home_dir().ok_or_else(|| {
            Error::Generic(
                "failed to get home directory. does your os support `std::env::home_dir()`?"
                    .to_string(),
            )
        })?;
        home.push(".optrace");
        home.push("config.toml");

        delete_path(
            home.to_str()
                .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))?,
        );

        Ok(())
    }

    /// Update a single key/value pair in the configuration.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        // update the key in the struct and ensure it's the correct type
        match key {
            "rpc_url" => {
                self.rpc_url = value.to_string();
            }
            "local_rpc_url" => {
                self.local_rpc_url = value.to_string();
            }
            "trace_timeout_ms" => {
                self.trace_timeout_ms = value.parse().map_err(|_| {
                    Error::ParseError(format!("invalid value for trace_timeout_ms: '{value}'"))
                })?;
            }
            _ => {
                return Err(Error::Generic(format!(
                    "invalid key: \'{key}\' is not a valid configuration key."
                )))
            }
        }

        // write the updated config to disk
        self.save()?;

        Ok(())
    }
}

/// Parse user input --rpc-url into a full url
pub fn parse_url_arg(url: &str) -> Result<String, String> {
    if mesc::is_mesc_enabled() {
        if let Ok(Some(endpoint)) = mesc::get_endpoint_by_query(url, Some("optrace")) {
            return Ok(endpoint.url);
        }
    }
    Ok(url.to_string())
}
