//! Configuration for the Sprig service.
//!
//! A typed config with per-section defaults, optionally loaded from a JSON
//! file. Operational knobs (port, API key, paths) can be overridden by CLI
//! flags and environment variables in the server binary.

mod config;

pub use config::{
    Config, ConfigError, ConfigResult, DocsConfig, LimitsConfig, LlmConfig, LoggingConfig,
    ServerConfig, StorageConfig,
};
