//! Configuration loading and credential resolution
//!
//! Settings sources priority (highest first):
//! 1. Command-line arguments (applied by the binary)
//! 2. Environment variables
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing default config file is not an error; the service starts with
//! compiled defaults. Missing credentials are not an error either; the
//! client that needs one fails on first use.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Spotify client id (catalog search)
pub const ENV_SPOTIFY_CLIENT_ID: &str = "SPOTIPY_CLIENT_ID";
/// Spotify client secret (catalog search)
pub const ENV_SPOTIFY_CLIENT_SECRET: &str = "SPOTIPY_CLIENT_SECRET";
/// Hugging Face inference token (image generation)
pub const ENV_HUGGINGFACE_API_KEY: &str = "HUGGINGFACE_API_KEY";
/// Sonoteller lyrics-analysis key (declared, not used by the cover flow)
pub const ENV_SONOTELLER_API_KEY: &str = "SONOTELLER_API_KEY";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// API credentials as written in the TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredentialsConfig {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub huggingface_api_key: Option<String>,
    pub sonoteller_api_key: Option<String>,
}

/// Analysis profile selection and threshold overrides
///
/// Band lists are descending "greater than" boundaries. Lengths are
/// checked when the profile is built.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Preset name ("classic" or "extended")
    pub profile: Option<String>,
    /// `false` disables tempo halving regardless of preset
    pub tempo_correction: Option<bool>,
    pub tempo_correction_threshold: Option<f64>,
    pub tempo_bands: Option<Vec<f64>>,
    pub centroid_bands: Option<Vec<f64>>,
    pub bandwidth_bands: Option<Vec<f64>>,
    pub result_limit: Option<u32>,
    pub deduplicate: Option<bool>,
}

/// Upstream base URLs; `None` selects the public service
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EndpointsConfig {
    pub spotify_accounts_url: Option<String>,
    pub spotify_api_url: Option<String>,
    pub deezer_api_url: Option<String>,
    pub image_generation_url: Option<String>,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5730
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Default configuration file path for the platform
///
/// `~/.config/moodcover/config.toml` on Linux, the platform config
/// directory elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("moodcover").join("config.toml"))
}

/// Where the loaded configuration came from
///
/// Loading runs before the log subscriber exists, so the outcome is
/// returned and logged by the caller once logging is up.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Read from this file
    File(PathBuf),
    /// Default location had no file
    DefaultsMissingFile(PathBuf),
    /// No platform config directory
    DefaultsNoConfigDir,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::DefaultsMissingFile(path) => {
                info!("No config file at {}, using defaults", path.display())
            }
            ConfigSource::DefaultsNoConfigDir => {
                warn!("Could not determine config directory, using defaults")
            }
        }
    }
}

/// Configuration plus its origin
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    pub source: ConfigSource,
}

/// Load the TOML configuration
///
/// An explicit `path` must exist. Without one, the default location is
/// tried and compiled defaults are used when it is absent.
pub fn load_toml_config(path: Option<&Path>) -> Result<LoadedConfig> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => {
                return Ok(LoadedConfig {
                    config: TomlConfig::default(),
                    source: ConfigSource::DefaultsNoConfigDir,
                });
            }
        },
    };

    if !path.exists() {
        if explicit {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(LoadedConfig {
            config: TomlConfig::default(),
            source: ConfigSource::DefaultsMissingFile(path),
        });
    }

    let content = std::fs::read_to_string(&path)?;
    let config = parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    Ok(LoadedConfig {
        config,
        source: ConfigSource::File(path),
    })
}

/// Parse TOML text into a config
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve one credential from environment, then TOML
///
/// Blank values are ignored at every tier. Returns `None` when no tier
/// provides a usable value.
pub fn resolve_credential(env_var: &str, toml_value: Option<&str>) -> Option<String> {
    let env_value = std::env::var(env_var).ok().filter(|v| is_valid_key(v));
    let toml_value = toml_value.filter(|v| is_valid_key(v));

    match (env_value, toml_value) {
        (Some(env), Some(_)) => {
            warn!(
                "{} found in environment and TOML config. Using environment (higher priority).",
                env_var
            );
            Some(env)
        }
        (Some(env), None) => Some(env),
        (None, Some(toml)) => Some(toml.to_string()),
        (None, None) => None,
    }
}

/// Resolved service credentials
#[derive(Clone, Default)]
pub struct Credentials {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub huggingface_api_key: Option<String>,
    pub sonoteller_api_key: Option<String>,
}

impl Credentials {
    /// Resolve every credential from environment and TOML
    pub fn resolve(config: &CredentialsConfig) -> Self {
        Self {
            spotify_client_id: resolve_credential(
                ENV_SPOTIFY_CLIENT_ID,
                config.spotify_client_id.as_deref(),
            ),
            spotify_client_secret: resolve_credential(
                ENV_SPOTIFY_CLIENT_SECRET,
                config.spotify_client_secret.as_deref(),
            ),
            huggingface_api_key: resolve_credential(
                ENV_HUGGINGFACE_API_KEY,
                config.huggingface_api_key.as_deref(),
            ),
            sonoteller_api_key: resolve_credential(
                ENV_SONOTELLER_API_KEY,
                config.sonoteller_api_key.as_deref(),
            ),
        }
    }

    /// (variable name, configured) pairs for startup diagnostics
    pub fn summary(&self) -> Vec<(&'static str, bool)> {
        vec![
            (ENV_SPOTIFY_CLIENT_ID, self.spotify_client_id.is_some()),
            (ENV_SPOTIFY_CLIENT_SECRET, self.spotify_client_secret.is_some()),
            (ENV_HUGGINGFACE_API_KEY, self.huggingface_api_key.is_some()),
            (ENV_SONOTELLER_API_KEY, self.sonoteller_api_key.is_some()),
        ]
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Credentials");
        for (name, configured) in self.summary() {
            s.field(name, &if configured { "<set>" } else { "<unset>" });
        }
        s.finish()
    }
}
