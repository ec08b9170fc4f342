use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PlaylistError, Result};
use crate::filename::DEFAULT_NAME_LIMIT;

/// Config file names looked up, in order, when no file is given explicitly
const CONFIG_PATHS: [&str; 2] = ["wp-playlist-dl.toml", "config/wp-playlist-dl.toml"];

/// Configuration for the playlist downloader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP client settings
    pub http: HttpConfig,

    /// Download retry policy
    pub retry: RetryConfig,

    /// File naming and destination settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Timeout for establishing a connection (seconds)
    pub connect_timeout_seconds: u64,

    /// Timeout for a whole request including the body (seconds, unset = none)
    pub request_timeout_seconds: Option<u64>,

    /// Restrict the client to HTTP/1.1. Some media hosts reset HTTP/2 streams
    /// mid-transfer with PROTOCOL_ERROR.
    pub http1_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum attempts per file, the first one included
    pub max_attempts: u32,

    /// Delay before the first retry (milliseconds)
    pub initial_interval_ms: u64,

    /// Growth factor applied to the delay after every retry
    pub multiplier: f64,

    /// Relative jitter: each delay is drawn from `[d*(1-f), d*(1+f)]`
    pub randomization_factor: f64,

    /// Upper bound for a single delay (milliseconds, unset = unbounded)
    pub max_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Maximum file name length in characters
    pub max_file_name_length: usize,

    /// Create the destination directory when it does not exist
    pub create_dir: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    pub log_level: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("wp-playlist-dl/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_seconds: 30,
            request_timeout_seconds: None,
            http1_only: true,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_interval_ms: 500,
            multiplier: 1.5,
            randomization_factor: 0.5,
            max_interval_ms: None,
        }
    }
}

impl RetryConfig {
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn max_interval(&self) -> Option<Duration> {
        self.max_interval_ms.map(Duration::from_millis)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_file_name_length: DEFAULT_NAME_LIMIT,
            create_dir: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// First config file present under `base`, in lookup order
    pub fn locate(base: &Path) -> Option<PathBuf> {
        CONFIG_PATHS
            .iter()
            .map(|name| base.join(name))
            .find(|path| path.is_file())
    }

    /// Load configuration from an explicit file; a missing or invalid file is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path).map_err(|e| {
            PlaylistError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&config_str).map_err(|e| {
            PlaylistError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        Ok(config.with_env_overrides())
    }

    /// Defaults with environment variable overrides
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(attempts) = std::env::var("WP_PLAYLIST_DL_MAX_ATTEMPTS") {
            self.retry.max_attempts = attempts.parse().unwrap_or(self.retry.max_attempts);
        }

        if let Ok(user_agent) = std::env::var("WP_PLAYLIST_DL_USER_AGENT") {
            if !user_agent.is_empty() {
                self.http.user_agent = user_agent;
            }
        }

        if let Ok(http1_only) = std::env::var("WP_PLAYLIST_DL_HTTP1_ONLY") {
            self.http.http1_only = http1_only.parse().unwrap_or(self.http.http1_only);
        }

        if let Ok(log_level) = std::env::var("WP_PLAYLIST_DL_LOG_LEVEL") {
            self.logging.log_level = log_level;
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(PlaylistError::Config(
                "retry.max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.retry.multiplier < 1.0 {
            return Err(PlaylistError::Config(
                "retry.multiplier must be at least 1.0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.retry.randomization_factor) {
            return Err(PlaylistError::Config(
                "retry.randomization_factor must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.output.max_file_name_length == 0 {
            return Err(PlaylistError::Config(
                "output.max_file_name_length must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Playlist Downloader Configuration:\n\
            - User-Agent: {}\n\
            - HTTP/1.1 only: {}\n\
            - Max attempts: {}\n\
            - Initial retry interval: {}ms\n\
            - Max file name length: {}",
            self.http.user_agent,
            self.http.http1_only,
            self.retry.max_attempts,
            self.retry.initial_interval_ms,
            self.output.max_file_name_length,
        )
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_http1_only(mut self, http1_only: bool) -> Self {
        self.config.http.http1_only = http1_only;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.retry.max_attempts = max_attempts;
        self
    }

    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.config.retry.initial_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_randomization_factor(mut self, factor: f64) -> Self {
        self.config.retry.randomization_factor = factor;
        self
    }

    pub fn with_max_file_name_length(mut self, limit: usize) -> Self {
        self.config.output.max_file_name_length = limit;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
