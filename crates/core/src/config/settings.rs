use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File names searched for manager configuration, most specific first
pub const CONFIG_FILE_NAMES: [&str; 2] = [".buildium-config.json", "buildium-config.json"];

pub const DEFAULT_NAMESPACE: &str = "buildium";
pub const DEFAULT_ADAPTER_TIMEOUT_SECS: u64 = 30;

/// Settings of the target manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ManagerConfig {
    /// Prefix of synthesized trigger command names
    pub command_namespace: String,

    /// Post a summary notice after every refresh
    pub notification_on_refresh: bool,

    /// Seconds a provider may take to report its settings; 0 waits forever
    pub adapter_timeout_secs: u64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            command_namespace: DEFAULT_NAMESPACE.to_string(),
            notification_on_refresh: false,
            adapter_timeout_secs: DEFAULT_ADAPTER_TIMEOUT_SECS,
        }
    }
}

impl ManagerConfig {
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load the nearest config file at or above `start_path`, or defaults
    pub fn load_from_path(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => {
                tracing::debug!("Loading manager config from {:?}", path);
                Self::load_from_file(&path)
            }
            None => {
                tracing::debug!("No manager config found from {:?}, using defaults", start_path);
                Ok(Self::default())
            }
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    pub fn adapter_timeout(&self) -> Option<Duration> {
        match self.adapter_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    fn validate(&self) -> Result<()> {
        let namespace = self.command_namespace.trim();
        if namespace.is_empty() {
            return Err(Error::Config("command_namespace must not be empty".to_string()));
        }
        if namespace.contains(char::is_whitespace) {
            return Err(Error::Config(format!(
                "command_namespace must not contain whitespace: {:?}",
                self.command_namespace
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ManagerConfig::from_json(r#"{ "notification_on_refresh": true }"#).unwrap();

        assert!(config.notification_on_refresh);
        assert_eq!(config.command_namespace, "buildium");
        assert_eq!(config.adapter_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let config = ManagerConfig::from_json(r#"{ "adapter_timeout_secs": 0 }"#).unwrap();
        assert_eq!(config.adapter_timeout(), None);
    }

    #[test]
    fn test_rejects_bad_namespace() {
        let err = ManagerConfig::from_json(r#"{ "command_namespace": "my build" }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ManagerConfig::from_json(r#"{ "command_namespace": "" }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = ManagerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_walks_up_to_parent() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp_dir.path().join(".buildium-config.json"),
            r#"{ "command_namespace": "make" }"#,
        )
        .unwrap();

        let config = ManagerConfig::load_from_path(&nested).unwrap();
        assert_eq!(config.command_namespace, "make");
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("buildium-config.json");
        let config = ManagerConfig {
            notification_on_refresh: true,
            adapter_timeout_secs: 5,
            ..Default::default()
        };

        config.save_to_file(&path).unwrap();
        assert_eq!(ManagerConfig::load_from_file(&path).unwrap(), config);
    }
}
