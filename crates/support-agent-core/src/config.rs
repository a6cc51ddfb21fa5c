use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/chat";
pub const ENDPOINT_ENV: &str = "SUPPORT_AGENT_ENDPOINT";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Missing file means defaults; a file that doesn't parse is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn save_endpoint(endpoint: &str) -> Result<()> {
        let mut config = Self::load()?;
        config.endpoint = Some(endpoint.to_string());
        config.save()
    }

    /// CLI flag, then `SUPPORT_AGENT_ENDPOINT`, then the file, then the default
    pub fn resolve_endpoint(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::to_string)
            .or_else(|| std::env::var(ENDPOINT_ENV).ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("support-agent").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            endpoint: Some("http://support.internal/chat".to_string()),
            log_file: Some(PathBuf::from("/tmp/agent.log")),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    #[serial(endpoint_env)]
    fn test_resolve_endpoint_precedence() {
        std::env::remove_var(ENDPOINT_ENV);

        let mut config = Config::new();
        assert_eq!(config.resolve_endpoint(None), DEFAULT_ENDPOINT);

        config.endpoint = Some("http://from-file/chat".to_string());
        assert_eq!(config.resolve_endpoint(None), "http://from-file/chat");

        std::env::set_var(ENDPOINT_ENV, "http://from-env/chat");
        assert_eq!(config.resolve_endpoint(None), "http://from-env/chat");
        assert_eq!(
            config.resolve_endpoint(Some("http://from-cli/chat")),
            "http://from-cli/chat"
        );

        std::env::remove_var(ENDPOINT_ENV);
    }
}
