//! Configuration management for ragway
//!
//! This module provides hierarchical configuration with discovery and
//! precedence: CLI > environment > file > defaults. Supports TOML
//! configuration files with `[server]`, `[retrieval]`, `[generation]`, and
//! `[logging]` sections.

mod config;

pub use config::{
    CliArgs, CollaboratorConfig, Config, ConfigError, LoggingConfig, ServerConfig,
    DEFAULT_BIND, DEFAULT_GENERATION_TIMEOUT_SECS, DEFAULT_RETRIEVAL_TIMEOUT_SECS,
};
