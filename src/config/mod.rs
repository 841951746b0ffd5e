//! Configuration module for Sitemap-Batcher
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_batcher::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Root sitemap index: {}", config.discovery.root_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BatchingConfig, Config, DiscoveryConfig, StorageBackend, StorageConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, load_config_with_hash, parse_config,
    BUCKET_ENV_VAR,
};
pub use validation::validate;
