use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default bind address for the gateway server
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Default per-call timeout for the retrieval collaborator, in seconds
pub const DEFAULT_RETRIEVAL_TIMEOUT_SECS: u64 = 10;

/// Default per-call timeout for the generation collaborator, in seconds.
/// Generation is expected to be slower than retrieval, so its bound is wider.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

const DEFAULT_RETRIEVAL_URL: &str = "http://ragway-retrieval:8000";
const DEFAULT_GENERATION_URL: &str = "http://ragway-generation:8000";

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// CLI arguments that participate in configuration precedence.
///
/// The binary parses its own flags and hands the relevant subset over here;
/// this keeps the config crate free of any clap dependency.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file path (skips discovery)
    pub config_path: Option<PathBuf>,
    /// Bind address override
    pub bind: Option<String>,
    /// Verbose logging
    pub verbose: bool,
}

/// Server section from ragway.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the gateway listens on. Default: 0.0.0.0:8080
    pub bind: Option<String>,
}

/// Per-collaborator section from ragway.toml (`[retrieval]`, `[generation]`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CollaboratorConfig {
    /// Base URL of the collaborator service
    pub base_url: Option<String>,
    /// Bounded per-call timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Logging section from ragway.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Verbose (debug-level) logging
    pub verbose: Option<bool>,
}

/// File-level model: every section optional so partial files merge cleanly
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server: Option<ServerConfig>,
    retrieval: Option<CollaboratorConfig>,
    generation: Option<CollaboratorConfig>,
    logging: Option<LoggingConfig>,
}

/// Configuration for ragway.
///
/// `Config` provides hierarchical configuration with discovery and
/// precedence: CLI arguments > environment variables > config file >
/// built-in defaults.
///
/// # Discovery
///
/// Use [`Config::discover()`] for CLI-like behavior that searches upward
/// from the current directory for a `ragway.toml`, stopping at repository
/// root markers. Environment overrides: `RAGWAY_RETRIEVAL_URL`,
/// `RAGWAY_GENERATION_URL`, `RAGWAY_BIND`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server settings
    pub server: ServerConfig,
    /// Retrieval collaborator settings
    pub retrieval: CollaboratorConfig,
    /// Generation collaborator settings
    pub generation: CollaboratorConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Discover and load configuration with precedence: CLI > env > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the merged configuration fails validation.
    pub fn discover(cli_args: &CliArgs) -> Result<Self> {
        let start_dir = env::current_dir().context("Failed to get current directory")?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory.
    ///
    /// This is the path-driven variant used by tests to avoid process-global
    /// state.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the merged configuration fails validation.
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self> {
        // Start with built-in defaults
        let mut server = ServerConfig::default();
        let mut retrieval = CollaboratorConfig::default();
        let mut generation = CollaboratorConfig::default();
        let mut logging = LoggingConfig::default();

        // Discover and load config file (if not explicitly provided)
        let config_path = if let Some(explicit_path) = &cli_args.config_path {
            Some(explicit_path.clone())
        } else {
            Self::discover_config_file_from(start_dir)
        };

        if let Some(path) = &config_path {
            let file_config = Self::load_config_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?;

            if let Some(file_server) = file_config.server
                && file_server.bind.is_some()
            {
                server.bind = file_server.bind;
            }
            if let Some(file_retrieval) = file_config.retrieval {
                if file_retrieval.base_url.is_some() {
                    retrieval.base_url = file_retrieval.base_url;
                }
                if file_retrieval.timeout_secs.is_some() {
                    retrieval.timeout_secs = file_retrieval.timeout_secs;
                }
            }
            if let Some(file_generation) = file_config.generation {
                if file_generation.base_url.is_some() {
                    generation.base_url = file_generation.base_url;
                }
                if file_generation.timeout_secs.is_some() {
                    generation.timeout_secs = file_generation.timeout_secs;
                }
            }
            if let Some(file_logging) = file_config.logging
                && file_logging.verbose.is_some()
            {
                logging.verbose = file_logging.verbose;
            }
        }

        // Environment variables override the config file
        if let Ok(env_url) = env::var("RAGWAY_RETRIEVAL_URL")
            && !env_url.is_empty()
        {
            retrieval.base_url = Some(env_url);
        }
        if let Ok(env_url) = env::var("RAGWAY_GENERATION_URL")
            && !env_url.is_empty()
        {
            generation.base_url = Some(env_url);
        }
        if let Ok(env_bind) = env::var("RAGWAY_BIND")
            && !env_bind.is_empty()
        {
            server.bind = Some(env_bind);
        }

        // CLI flags override everything
        if let Some(bind) = &cli_args.bind {
            server.bind = Some(bind.clone());
        }
        if cli_args.verbose {
            logging.verbose = Some(true);
        }

        let config = Self {
            server,
            retrieval,
            generation,
            logging,
        };

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Discover a config file by searching upward from a given directory.
    ///
    /// Walks up the directory tree looking for `ragway.toml`, stopping at
    /// repository root markers (.git, .hg, .svn) or the filesystem root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = start_dir.to_path_buf();

        loop {
            let config_path = current_dir.join("ragway.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            // Stop at repository root if no config found
            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                break;
            }

            match current_dir.parent() {
                Some(parent) => current_dir = parent.to_path_buf(),
                None => break,
            }
        }

        None
    }

    fn load_config_file(path: &Path) -> Result<FileConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let file_config: FileConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::InvalidFile(e.to_string()))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(file_config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // Bind must parse as a socket address
        let bind = self.server.bind.as_deref().unwrap_or(DEFAULT_BIND);
        if bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                key: "server.bind".to_string(),
                value: bind.to_string(),
            });
        }

        for (key, collaborator) in [
            ("retrieval", &self.retrieval),
            ("generation", &self.generation),
        ] {
            if let Some(url) = &collaborator.base_url
                && !(url.starts_with("http://") || url.starts_with("https://"))
            {
                return Err(ConfigError::InvalidValue {
                    key: format!("{key}.base_url"),
                    value: url.clone(),
                });
            }
            if collaborator.timeout_secs == Some(0) {
                return Err(ConfigError::InvalidValue {
                    key: format!("{key}.timeout_secs"),
                    value: "0".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Resolved bind address.
    ///
    /// Infallible after [`discover`](Self::discover) because validation
    /// already proved the address parses.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.server
            .bind
            .as_deref()
            .unwrap_or(DEFAULT_BIND)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080)))
    }

    /// Base URL of the retrieval collaborator
    #[must_use]
    pub fn retrieval_base_url(&self) -> &str {
        self.retrieval
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_RETRIEVAL_URL)
    }

    /// Base URL of the generation collaborator
    #[must_use]
    pub fn generation_base_url(&self) -> &str {
        self.generation
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_GENERATION_URL)
    }

    /// Bounded per-call timeout for retrieval
    #[must_use]
    pub fn retrieval_timeout(&self) -> Duration {
        Duration::from_secs(
            self.retrieval
                .timeout_secs
                .unwrap_or(DEFAULT_RETRIEVAL_TIMEOUT_SECS),
        )
    }

    /// Bounded per-call timeout for generation
    #[must_use]
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(
            self.generation
                .timeout_secs
                .unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS),
        )
    }

    /// Whether verbose logging is enabled
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Config {
    /// Create a minimal Config for testing purposes.
    ///
    /// This creates a Config with default values suitable for unit tests
    /// that don't require full configuration discovery.
    #[must_use]
    pub fn minimal_for_testing() -> Self {
        Config {
            server: ServerConfig::default(),
            retrieval: CollaboratorConfig::default(),
            generation: CollaboratorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
