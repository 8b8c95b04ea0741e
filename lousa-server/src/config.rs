//! Configuration management
//!
//! Settings come from environment variables (optionally seeded from a
//! `.env` file by `main`), then command-line flags override them.

use clap::Parser;
use std::fmt;
use std::str::FromStr;
use tracing::Level;

use crate::error::ConfigError;

/// Fallback secret when `SECRET_KEY` is unset
pub const DEFAULT_SECRET_KEY: &str = "escola";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;

/// Concurrency backend for the server runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncMode {
    /// Work-stealing thread pool
    MultiThread,
    /// Single cooperative event loop
    CurrentThread,
}

impl AsyncMode {
    /// Default when `ASYNC_MODE` is not given
    pub fn platform_default() -> Self {
        if cfg!(target_os = "windows") {
            Self::MultiThread
        } else {
            Self::CurrentThread
        }
    }

    /// Resolve a raw setting.
    ///
    /// Precedence:
    /// 1. a recognized value
    /// 2. an unrecognized value falls back to `MultiThread`
    /// 3. nothing (or blank) selects the platform default
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(value) => value.parse().unwrap_or(Self::MultiThread),
            None => Self::platform_default(),
        }
    }
}

impl FromStr for AsyncMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "threading" | "multi_thread" | "multi-thread" => Ok(Self::MultiThread),
            "eventlet" | "current_thread" | "current-thread" | "single" => Ok(Self::CurrentThread),
            _ => Err(ConfigError::UnknownAsyncMode(s.to_string())),
        }
    }
}

impl fmt::Display for AsyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsyncMode::MultiThread => write!(f, "multi_thread"),
            AsyncMode::CurrentThread => write!(f, "current_thread"),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to tracing level
    pub fn as_level(&self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

/// Command-line overrides
#[derive(Debug, Default, Parser)]
#[command(name = "lousa-server", version, about = "Real-time classroom call board")]
pub struct Cli {
    /// Bind host (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Base URL encoded in the display QR code (overrides PUBLIC_URL)
    #[arg(long)]
    pub public_url: Option<String>,

    /// threading | eventlet | multi_thread | current_thread (overrides ASYNC_MODE)
    #[arg(long)]
    pub async_mode: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment secret
    pub secret_key: String,

    /// Runtime flavour
    pub async_mode: AsyncMode,

    /// QR base URL override, without trailing slash
    pub public_url: Option<String>,

    /// Admin reset token (None disables reset)
    pub admin_token: Option<String>,

    pub host: String,
    pub port: u16,
    pub log_level: LogLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            async_mode: AsyncMode::platform_default(),
            public_url: None,
            admin_token: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: LogLevel::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // blank values count as unset
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let log_level = match var("LOG_LEVEL") {
            Some(raw) => raw.parse()?,
            None => LogLevel::default(),
        };

        Ok(Self {
            secret_key: var("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            async_mode: AsyncMode::resolve(var("ASYNC_MODE").as_deref()),
            public_url: var("PUBLIC_URL").map(|url| normalize_base_url(&url)),
            admin_token: var("ADMIN_TOKEN"),
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            log_level,
        })
    }

    /// Apply command-line overrides
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(url) = cli.public_url.as_deref().filter(|u| !u.trim().is_empty()) {
            self.public_url = Some(normalize_base_url(url));
        }
        if let Some(mode) = &cli.async_mode {
            self.async_mode = AsyncMode::resolve(Some(mode));
        }
        self
    }

    /// Address to bind, as `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
