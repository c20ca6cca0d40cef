//! Configuration for estore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{EstoreError, Result};

/// Main configuration for an estore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// JSON file holding the product array. Rewritten on every mutation.
    pub products_file: PathBuf,

    /// Write an empty array to `products_file` if it does not exist yet
    pub init_if_missing: bool,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            products_file: PathBuf::from("data/products.json"),
            init_if_missing: false,
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the values that would otherwise only fail once the server starts
    pub fn validate(&self) -> Result<()> {
        if self.products_file.as_os_str().is_empty() {
            return Err(EstoreError::Config("products file path is empty".to_string()));
        }

        // Hostnames are resolved at bind time, so only the host:port shape is checked
        let valid_addr = match self.listen_addr.rsplit_once(':') {
            Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
            None => false,
        };
        if !valid_addr {
            return Err(EstoreError::Config(format!(
                "invalid listen address '{}': expected host:port",
                self.listen_addr
            )));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing JSON file
    pub fn products_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.products_file = path.into();
        self
    }

    /// Create the backing file when it is missing
    pub fn init_if_missing(mut self, init: bool) -> Self {
        self.config.init_if_missing = init;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
