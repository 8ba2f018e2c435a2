use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Server and tunnel launch settings
    #[serde(default)]
    pub launcher: LauncherConfig,

    /// Localization key extraction settings
    #[serde(default)]
    pub i18n: I18nConfig,

    /// Translation backend settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for starting the backend server
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LauncherConfig {
    /// Shell command that starts the server (arguments are appended)
    #[serde(default = "default_server_command")]
    pub server_command: String,

    /// Extra arguments passed to the server
    #[serde(default)]
    pub server_args: Vec<String>,

    /// Working directory of the server process
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Substring of an output line that signals the server is ready
    #[serde(default = "default_ready_marker")]
    pub ready_marker: String,

    /// File receiving the server's stdout and stderr
    #[serde(default = "default_server_log")]
    pub server_log: PathBuf,

    /// Delay between reads of the server log once it has no new output, in milliseconds
    #[serde(default = "default_server_poll_ms")]
    pub poll_interval_ms: u64,

    /// Label of the model preset whose arguments are appended
    #[serde(default)]
    pub model_preset: Option<String>,

    /// Version applied to every preset (`-g`)
    #[serde(default)]
    pub model_version: String,

    /// Tunnel settings
    #[serde(default)]
    pub tunnel: TunnelConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            server_command: default_server_command(),
            server_args: Vec::new(),
            working_dir: default_working_dir(),
            ready_marker: default_ready_marker(),
            server_log: default_server_log(),
            poll_interval_ms: default_server_poll_ms(),
            model_preset: None,
            model_version: String::new(),
            tunnel: TunnelConfig::default(),
        }
    }
}

impl LauncherConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Settings for the tunnel that exposes the server
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TunnelConfig {
    /// Tunnel executable
    #[serde(default = "default_tunnel_command")]
    pub command: String,

    /// Local port forwarded by the tunnel
    #[serde(default = "default_tunnel_port")]
    pub port: u16,

    /// File receiving the tunnel's stdout
    #[serde(default = "default_stdout_log")]
    pub stdout_log: PathBuf,

    /// File receiving the tunnel's stderr
    #[serde(default = "default_stderr_log")]
    pub stderr_log: PathBuf,

    /// Text preceding the public URL in the tunnel output
    #[serde(default = "default_url_marker")]
    pub url_marker: String,

    /// Delay before the first poll, in seconds
    #[serde(default = "default_startup_delay_secs")]
    pub startup_delay_secs: u64,

    /// Delay between polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl TunnelConfig {
    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            command: default_tunnel_command(),
            port: default_tunnel_port(),
            stdout_log: default_stdout_log(),
            stderr_log: default_stderr_log(),
            url_marker: default_url_marker(),
            startup_delay_secs: default_startup_delay_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Settings for localization key extraction and dictionary sync
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct I18nConfig {
    /// Directory scanned for markup files
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Markup file extension
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Attribute flagging an element for localization
    #[serde(default = "default_marker_attribute")]
    pub marker_attribute: String,

    /// Split marker values on `;` into several entries
    #[serde(default = "default_true")]
    pub split_markers: bool,

    /// Language of the markup text
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Dictionaries updated by `i18n sync`
    #[serde(default = "default_sync_dictionaries")]
    pub sync_dictionaries: Vec<PathBuf>,

    /// Dictionaries rewritten by `i18n reset`
    #[serde(default = "default_reset_dictionaries")]
    pub reset_dictionaries: Vec<PathBuf>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            extension: default_extension(),
            marker_attribute: default_marker_attribute(),
            split_markers: true,
            source_language: default_source_language(),
            sync_dictionaries: default_sync_dictionaries(),
            reset_dictionaries: default_reset_dictionaries(),
        }
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Translate public endpoint
    #[default]
    Google,
    // @provider: LibreTranslate server
    Libre,
    // @provider: DeepLX server
    DeepLx,
}

impl TranslationProvider {
    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Libre => "libre".to_string(),
            Self::DeepLx => "deeplx".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "libre" | "libretranslate" => Ok(Self::Libre),
            "deeplx" => Ok(Self::DeepLx),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        let endpoint = match provider_type {
            TranslationProvider::Google => default_google_endpoint(),
            TranslationProvider::Libre => String::new(),
            TranslationProvider::DeepLx => default_deeplx_endpoint(),
        };

        Self {
            provider_type: provider_type.to_lowercase_string(),
            api_key: String::new(),
            endpoint,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Target language; when unset it is derived from each dictionary's file name
    #[serde(default)]
    pub target_language: Option<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::Google),
                ProviderConfig::new(TranslationProvider::Libre),
                ProviderConfig::new(TranslationProvider::DeepLx),
            ],
            target_language: None,
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::Google => default_google_endpoint(),
            TranslationProvider::Libre => String::new(),
            TranslationProvider::DeepLx => default_deeplx_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout(&self) -> Duration {
        let secs = self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs);
        Duration::from_secs(secs)
    }

    /// Set the endpoint of the active provider, adding an entry if needed
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        let provider_str = self.provider.to_lowercase_string();
        let endpoint = endpoint.into();
        match self.available_providers.iter_mut().find(|p| p.provider_type == provider_str) {
            Some(provider_config) => provider_config.endpoint = endpoint,
            None => {
                let mut provider_config = ProviderConfig::new(self.provider.clone());
                provider_config.endpoint = endpoint;
                self.available_providers.push(provider_config);
            }
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_server_command() -> String {
    "python server.py".to_string()
}

fn default_working_dir() -> PathBuf {
    PathBuf::from("/TavernAI-extras")
}

fn default_ready_marker() -> String {
    "Running on ".to_string()
}

fn default_server_log() -> PathBuf {
    PathBuf::from("./extras-server.log")
}

fn default_server_poll_ms() -> u64 {
    100
}

fn default_tunnel_command() -> String {
    "lt".to_string()
}

fn default_tunnel_port() -> u16 {
    5100
}

fn default_stdout_log() -> PathBuf {
    PathBuf::from("./extras.out")
}

fn default_stderr_log() -> PathBuf {
    PathBuf::from("./extras.err")
}

fn default_url_marker() -> String {
    "your url is: ".to_string()
}

fn default_startup_delay_secs() -> u64 {
    5
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_extension() -> String {
    "html".to_string()
}

fn default_marker_attribute() -> String {
    "data-i18n".to_string()
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_sync_dictionaries() -> Vec<PathBuf> {
    vec![PathBuf::from("public/locales/zh-cn.json")]
}

fn default_reset_dictionaries() -> Vec<PathBuf> {
    vec![PathBuf::from("public/locales/en.json")]
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_deeplx_endpoint() -> String {
    "http://127.0.0.1:1188/translate".to_string()
}

impl Config {
    /// Load the configuration file, creating it with defaults when missing
    pub fn load_or_create<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        if FileManager::file_exists(config_path) {
            let content = FileManager::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        FileManager::write_to_file(config_path, &config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", config_path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let _source_name = crate::language_utils::get_language_name(&self.i18n.source_language)?;

        if let Some(target) = &self.translation.target_language {
            let _target_name = crate::language_utils::get_language_name(target)?;
        }

        if self.i18n.marker_attribute.trim().is_empty() {
            return Err(anyhow!("Marker attribute must not be empty"));
        }

        if self.launcher.tunnel.port == 0 {
            return Err(anyhow!("Tunnel port must be non-zero"));
        }

        if self.launcher.poll_interval_ms == 0 {
            return Err(anyhow!("Server poll interval must be non-zero"));
        }

        if self.launcher.tunnel.poll_interval_ms == 0 {
            return Err(anyhow!("Tunnel poll interval must be non-zero"));
        }

        if self.translation.provider == TranslationProvider::Libre
            && self.translation.get_endpoint().is_empty()
        {
            return Err(anyhow!("An endpoint URL is required for the LibreTranslate provider"));
        }

        Ok(())
    }
}
