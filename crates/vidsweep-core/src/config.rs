use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            sweep: SweepConfig::default(),
            provider: ProviderConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (holds the platform page database)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Maximum video pages examined per run; also the window stride.
    /// Lower it for a longer coverage cycle, raise it for a shorter one.
    #[serde(default = "default_max_check_videos")]
    pub max_check_videos: u32,
    /// Maximum video pages deleted per run; unavailable videos past this
    /// cap are only logged and trigger the alert mail.
    #[serde(default = "default_max_remove_videos")]
    pub max_remove_videos: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_check_videos: default_max_check_videos(),
            max_remove_videos: default_max_remove_videos(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Request timeout for availability probes, in seconds
    #[serde(default = "default_probe_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_probe_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// HTTP mail relay endpoint alert messages are posted to
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
    /// Sender address for alert mail
    #[serde(default = "default_mail_sender")]
    pub sender: String,
    /// Alert recipients; leave empty to disable alert delivery
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Request timeout for relay submissions, in seconds
    #[serde(default = "default_mail_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            sender: default_mail_sender(),
            recipients: Vec::new(),
            request_timeout_secs: default_mail_timeout(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vidsweep")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_check_videos() -> u32 {
    1000
}

fn default_max_remove_videos() -> u32 {
    25
}

fn default_probe_timeout() -> u64 {
    30
}

fn default_relay_url() -> String {
    // Platform hosts run a local submission relay; point this at it.
    "http://127.0.0.1:8025/api/send".to_string()
}

fn default_mail_sender() -> String {
    "Vidsweep <alerts@localhost>".to_string()
}

fn default_mail_timeout() -> u64 {
    10
}

/// Expand a leading tilde to the user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/vidsweep/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("vidsweep")
            .join("config.toml")
    }

    /// Get the page database file path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("pages.db")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
