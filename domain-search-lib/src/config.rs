//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and `DS_*`
//! environment variables, and merging them into the explicit settings objects
//! handed to the resolver and the server. Nothing here is global: callers load
//! once at startup and pass the result along.

use crate::error::DomainSearchError;
use crate::types::{CheckoutLinkConfig, ResolverConfig, DEFAULT_RDAP_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Default listen address for the HTTP server.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Longest lookup timeout accepted from any configuration source.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Configuration loaded from TOML files.
///
/// ```toml
/// [lookup]
/// endpoint = "https://rdap.org"
/// timeout = "10s"
///
/// [checkout]
/// default_url = "https://bill.example/reg"
///
/// [server]
/// bind = "127.0.0.1:8080"
/// token = "change-me"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// RDAP lookup settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup: Option<LookupConfig>,

    /// Billing checkout settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<CheckoutConfig>,

    /// HTTP server settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

/// `[lookup]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LookupConfig {
    /// RDAP service root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Lookup timeout (as string, e.g., "10s", "1m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

/// `[checkout]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CheckoutConfig {
    /// Checkout URL used when a request does not carry its own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_url: Option<String>,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    /// Shared token the form must send back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Configuration discovery and loading functionality.
#[derive(Debug, Default)]
pub struct ConfigManager;

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `FileError` when the file is missing or unreadable and
    /// `ConfigError` when it does not parse or fails validation.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainSearchError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainSearchError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainSearchError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config is lowest, then `~/.domain-search.toml`, then the current
    /// directory. Files that fail to load are skipped with a warning.
    pub fn discover_and_load(&self) -> FileConfig {
        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        let mut merged_config = FileConfig::default();
        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded configuration file");
                    merged_config = self.merge_configs(merged_config, config);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring configuration file"),
            }
        }

        merged_config
    }

    /// Get the local configuration file path.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./domain-search.toml", "./.domain-search.toml"];

        candidates
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }

    /// Get the global configuration file path in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        [".domain-search.toml", "domain-search.toml"]
            .iter()
            .map(|candidate| Path::new(&home).join(candidate))
            .find(|path| path.exists())
    }

    /// Get the XDG configuration file path.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-search").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations with proper precedence.
    ///
    /// Values from `higher` take precedence over values from `lower`.
    pub fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            lookup: match (lower.lookup, higher.lookup) {
                (Some(mut lower_lookup), Some(higher_lookup)) => {
                    if higher_lookup.endpoint.is_some() {
                        lower_lookup.endpoint = higher_lookup.endpoint;
                    }
                    if higher_lookup.timeout.is_some() {
                        lower_lookup.timeout = higher_lookup.timeout;
                    }
                    Some(lower_lookup)
                }
                (lower_lookup, higher_lookup) => higher_lookup.or(lower_lookup),
            },
            checkout: match (lower.checkout, higher.checkout) {
                (Some(mut lower_checkout), Some(higher_checkout)) => {
                    if higher_checkout.default_url.is_some() {
                        lower_checkout.default_url = higher_checkout.default_url;
                    }
                    Some(lower_checkout)
                }
                (lower_checkout, higher_checkout) => higher_checkout.or(lower_checkout),
            },
            server: match (lower.server, higher.server) {
                (Some(mut lower_server), Some(higher_server)) => {
                    if higher_server.bind.is_some() {
                        lower_server.bind = higher_server.bind;
                    }
                    if higher_server.token.is_some() {
                        lower_server.token = higher_server.token;
                    }
                    Some(lower_server)
                }
                (lower_server, higher_server) => higher_server.or(lower_server),
            },
        }
    }

    /// Validate a configuration for common issues.
    pub fn validate_config(&self, config: &FileConfig) -> Result<(), DomainSearchError> {
        if let Some(lookup) = &config.lookup {
            if let Some(endpoint) = &lookup.endpoint {
                validate_endpoint(endpoint)?;
            }

            if let Some(timeout_str) = &lookup.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(DomainSearchError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '10s', '1m' (at most 60m)",
                        timeout_str
                    )));
                }
            }
        }

        if let Some(bind) = config.server.as_ref().and_then(|s| s.bind.as_ref()) {
            if bind.parse::<SocketAddr>().is_err() {
                return Err(DomainSearchError::config(format!(
                    "Invalid bind address '{}'. Use format like '127.0.0.1:8080'",
                    bind
                )));
            }
        }

        Ok(())
    }
}

/// Reject RDAP endpoints that are not absolute http(s) URLs.
pub fn validate_endpoint(endpoint: &str) -> Result<(), DomainSearchError> {
    match url::Url::parse(endpoint.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(DomainSearchError::config(format!(
            "Invalid RDAP endpoint '{}'. Use an http(s) URL like 'https://rdap.org'",
            endpoint
        ))),
    }
}

/// Environment variable configuration.
///
/// This represents configuration values that can be set via DS_* environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub endpoint: Option<String>,
    pub timeout: Option<String>,
    pub checkout_url: Option<String>,
    pub bind: Option<String>,
    pub token: Option<String>,
}

/// Load configuration from the process environment.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    load_env_config_from(|key| env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup.
pub fn load_env_config_from<F>(lookup: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_config = EnvConfig::default();

    // DS_RDAP_ENDPOINT - RDAP service root
    if let Some(endpoint) = lookup("DS_RDAP_ENDPOINT").filter(|v| !v.trim().is_empty()) {
        match validate_endpoint(&endpoint) {
            Ok(()) => {
                debug!("using DS_RDAP_ENDPOINT={}", endpoint);
                env_config.endpoint = Some(endpoint);
            }
            Err(e) => warn!("ignoring DS_RDAP_ENDPOINT: {}", e),
        }
    }

    // DS_TIMEOUT - lookup timeout
    if let Some(timeout_str) = lookup("DS_TIMEOUT") {
        if parse_timeout_string(&timeout_str).is_some() {
            debug!("using DS_TIMEOUT={}", timeout_str);
            env_config.timeout = Some(timeout_str);
        } else {
            warn!(
                "ignoring DS_TIMEOUT='{}', use format like '5s', '10s', '1m'",
                timeout_str
            );
        }
    }

    // DS_CHECKOUT_URL - default checkout URL
    if let Some(checkout_url) = lookup("DS_CHECKOUT_URL").filter(|v| !v.trim().is_empty()) {
        debug!("using DS_CHECKOUT_URL={}", checkout_url);
        env_config.checkout_url = Some(checkout_url);
    }

    // DS_BIND - server listen address
    if let Some(bind) = lookup("DS_BIND") {
        if bind.parse::<SocketAddr>().is_ok() {
            debug!("using DS_BIND={}", bind);
            env_config.bind = Some(bind);
        } else {
            warn!("ignoring DS_BIND='{}', use format like '127.0.0.1:8080'", bind);
        }
    }

    // DS_TOKEN - shared request token
    if let Some(token) = lookup("DS_TOKEN").filter(|v| !v.is_empty()) {
        debug!("using DS_TOKEN (set)");
        env_config.token = Some(token);
    }

    env_config
}

/// Effective settings after applying file, environment and explicit overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub resolver: ResolverConfig,
    pub checkout: CheckoutLinkConfig,
    pub bind: String,
    pub token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            checkout: CheckoutLinkConfig::none(),
            bind: DEFAULT_BIND.to_string(),
            token: None,
        }
    }
}

impl Settings {
    /// Combine a file configuration with environment values.
    ///
    /// Environment values win over file values; built-in defaults fill the rest.
    pub fn from_sources(file: &FileConfig, env_config: &EnvConfig) -> Self {
        let lookup = file.lookup.clone().unwrap_or_default();
        let server = file.server.clone().unwrap_or_default();

        let endpoint = env_config
            .endpoint
            .clone()
            .or(lookup.endpoint)
            .unwrap_or_else(|| DEFAULT_RDAP_ENDPOINT.to_string());

        let mut resolver = ResolverConfig::default().with_endpoint(endpoint);
        if let Some(secs) = env_config
            .timeout
            .as_deref()
            .or(lookup.timeout.as_deref())
            .and_then(parse_timeout_string)
        {
            resolver = resolver.with_timeout(Duration::from_secs(secs));
        }

        let checkout = CheckoutLinkConfig::from(
            env_config
                .checkout_url
                .clone()
                .or_else(|| file.checkout.as_ref().and_then(|c| c.default_url.clone())),
        );

        Self {
            resolver,
            checkout,
            bind: env_config
                .bind
                .clone()
                .or(server.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            token: env_config.token.clone().or(server.token),
        }
    }

    /// Discover config files, read the environment and combine them.
    ///
    /// An explicit `config_path` replaces discovery; unlike discovered files,
    /// an explicit file that fails to load is an error.
    pub fn load(config_path: Option<&Path>) -> Result<Self, DomainSearchError> {
        let manager = ConfigManager::new();
        let file = match config_path {
            Some(path) => manager.load_file(path)?,
            None => manager.discover_and_load(),
        };
        Ok(Self::from_sources(&file, &load_env_config()))
    }
}

/// Parse a timeout such as `"10s"`, `"2m"` or a bare `"10"` into seconds.
///
/// Zero, unparseable values and anything above [`MAX_TIMEOUT_SECS`] yield `None`.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let secs = if let Some(minutes) = timeout_str.strip_suffix('m') {
        minutes.parse::<u64>().ok()?.checked_mul(60)?
    } else if let Some(seconds) = timeout_str.strip_suffix('s') {
        seconds.parse::<u64>().ok()?
    } else {
        timeout_str.parse::<u64>().ok()?
    };

    if secs == 0 || secs > MAX_TIMEOUT_SECS {
        None
    } else {
        Some(secs)
    }
}
