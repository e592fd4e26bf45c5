use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Production API origin. Endpoint paths are appended verbatim.
pub const DEFAULT_BASE_URL: &str = "https://api.aitolove.app";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let path = default_app_dir()
            .join("session.json")
            .to_string_lossy()
            .into_owned();
        Self { path }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// Returns `~/.aitolove/`, or `./.aitolove/` when no home directory is known.
pub fn default_app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".aitolove")
}

/// Returns the default config file path: `~/.aitolove/config.toml`
pub fn default_config_path() -> PathBuf {
    default_app_dir().join("config.toml")
}

impl AppConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            AppConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (AITOLOVE_API_URL, AITOLOVE_SESSION, AITOLOVE_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("AITOLOVE_API_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("AITOLOVE_SESSION") {
            self.session.path = val;
        }
        if let Ok(val) = std::env::var("AITOLOVE_LOG_LEVEL") {
            self.log.level = val;
        }
    }

    /// Resolve the session file path, expanding `~` if needed.
    pub fn resolved_session_path(&self) -> PathBuf {
        expand_tilde(&self.session.path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://api.aitolove.app");
        assert_eq!(config.log.level, "info");
        assert!(config.session.path.ends_with("session.json"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[api]
base_url = "http://localhost:3000"

[log]
level = "debug"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.log.level, "debug");
        // defaults still apply for unset sections
        assert!(config.session.path.ends_with("session.json"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert!(config.session.path.ends_with("session.json"));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AppConfig::default();
        std::env::set_var("AITOLOVE_API_URL", "http://127.0.0.1:9999");
        std::env::set_var("AITOLOVE_SESSION", "/tmp/override/session.json");
        std::env::set_var("AITOLOVE_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.api.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.session.path, "/tmp/override/session.json");
        assert_eq!(config.log.level, "trace");

        // Clean up
        std::env::remove_var("AITOLOVE_API_URL");
        std::env::remove_var("AITOLOVE_SESSION");
        std::env::remove_var("AITOLOVE_LOG_LEVEL");
    }

    #[test]
    fn tilde_expands_to_home() {
        let resolved = expand_tilde("~/sessions/s.json");
        assert!(resolved.ends_with("sessions/s.json"));
        assert_eq!(expand_tilde("/abs/s.json"), PathBuf::from("/abs/s.json"));
    }
}
