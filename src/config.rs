use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::generate::invoker::{DEFAULT_INSTALL_HINT, DEFAULT_MAX_CAPTURE_BYTES};

/// Application configuration, persisted as TOML.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub settings: AppSettings,
}

/// How the external generation tool is launched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub program: String,
    pub args: Vec<String>,
    /// Bytes of tool output kept; the rest is discarded.
    pub max_capture_bytes: usize,
    /// Shown alongside tool failures.
    pub install_hint: String,
    /// Where request/response files are created. Defaults to the OS temp dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            program: "ollama".to_string(),
            args: vec!["run".to_string(), "phi3:mini".to_string()],
            max_capture_bytes: DEFAULT_MAX_CAPTURE_BYTES,
            install_hint: DEFAULT_INSTALL_HINT.to_string(),
            work_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub log_to_file: bool,
}

impl AppConfig {
    /// Standard config directory: ~/.config/genpad
    pub fn config_dir() -> PathBuf {
        dirs_fallback().join("genpad")
    }

    /// Standard config file path: ~/.config/genpad/config.toml
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load config from disk. Returns default if file doesn't exist.
    pub fn load() -> Self {
        let path = Self::config_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path).unwrap_or_default();
            Self::parse(&content)
        } else {
            Self::default()
        }
    }

    /// Parse TOML content, falling back to defaults when it is malformed.
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_default()
    }

    /// Save config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

/// Cross-platform config directory fallback.
fn dirs_fallback() -> PathBuf {
    // Try XDG_CONFIG_HOME, then platform defaults
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata);
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config");
        }
    }

    // Fallback to current dir
    PathBuf::from(".")
}
