//! Config file handling

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::HrbridgeError;
use crate::mapping::TargetPolicy;
use crate::mock::SimulationConfig;
use crate::schema::catalog;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "HRBRIDGE_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";
const STORE_FILE: &str = "configurations.json";

/// `[hr]` section
#[derive(Debug, Clone, PartialEq)]
pub struct HrConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for HrConfig {
    fn default() -> Self {
        Self {
            base_url: catalog::DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

/// hrbridge configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    /// Extra CLI arguments applied before the real ones
    pub default_options: Vec<String>,
    pub hr: HrConfig,
    pub simulation: SimulationConfig,
    pub allow_shared_targets: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_dir(Self::default_config_dir())
    }
}

impl Config {
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self {
            config_dir,
            default_options: Vec::new(),
            hr: HrConfig::default(),
            simulation: SimulationConfig::default(),
            allow_shared_targets: false,
        }
    }

    /// Load from the default config directory
    pub fn load() -> Result<Self, HrbridgeError> {
        Self::load_from(&Self::default_config_dir())
    }

    /// Load `config.toml` from `config_dir`; a missing file yields defaults
    pub fn load_from(config_dir: &Path) -> Result<Self, HrbridgeError> {
        let config_file = config_dir.join(CONFIG_FILE);
        let mut config = Self::with_dir(config_dir.to_path_buf());

        if !config_file.exists() {
            debug!(path = %config_file.display(), "no config file");
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| HrbridgeError::Config(format!("Failed to read config: {}", e)))?;
        config.apply_toml(&content)?;
        debug!(path = %config_file.display(), "config loaded");
        Ok(config)
    }

    fn apply_toml(&mut self, content: &str) -> Result<(), HrbridgeError> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| HrbridgeError::Config(format!("Invalid config TOML: {}", e)))?;

        self.default_options = toml_value
            .get("defaults")
            .and_then(|d| d.get("options"))
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(hr) = toml_value.get("hr") {
            if let Some(base_url) = hr.get("base_url").and_then(|v| v.as_str()) {
                self.hr.base_url = base_url.to_string();
            }
            self.hr.api_key = hr
                .get("api_key")
                .and_then(|v| v.as_str())
                .filter(|k| !k.trim().is_empty())
                .map(String::from);
        }

        if let Some(simulation) = toml_value.get("simulation") {
            self.simulation = simulation
                .clone()
                .try_into()
                .map_err(|e| HrbridgeError::Config(format!("Invalid [simulation] section: {}", e)))?;
        }

        self.allow_shared_targets = toml_value
            .get("mapping")
            .and_then(|m| m.get("allow_shared_targets"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        Ok(())
    }

    /// `$HRBRIDGE_CONFIG_DIR`, else the platform config dir, else `.hrbridge`
    pub fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("hrbridge"))
            .unwrap_or_else(|| PathBuf::from(".hrbridge"))
    }

    /// Saved configuration file
    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join(STORE_FILE)
    }

    pub fn target_policy(&self) -> TargetPolicy {
        if self.allow_shared_targets {
            TargetPolicy::Shared
        } else {
            TargetPolicy::Exclusive
        }
    }

    /// Insert the configured default options right after the program name
    pub fn merge_default_options(&self, args: Vec<String>) -> Vec<String> {
        if self.default_options.is_empty() || args.is_empty() {
            return args;
        }
        let mut merged = Vec::with_capacity(args.len() + self.default_options.len());
        let mut rest = args.into_iter();
        merged.extend(rest.next());
        merged.extend(self.default_options.iter().cloned());
        merged.extend(rest);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.hr.base_url, "https://api.zenhr.com/api/v2");
        assert_eq!(config.simulation.delay_ms, 1500);
        assert_eq!(config.target_policy(), TargetPolicy::Exclusive);
        assert_eq!(config.store_path(), dir.path().join("configurations.json"));
    }

    #[test]
    fn test_full_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            r#"
[defaults]
options = ["--verbose"]

[hr]
base_url = "https://staging.zenhr.test/api/v2"
api_key = "k-123"

[simulation]
success_rate = 1.0
delay_ms = 0

[mapping]
allow_shared_targets = true
"#,
        )
        .unwrap();
        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.default_options, vec!["--verbose"]);
        assert_eq!(config.hr.base_url, "https://staging.zenhr.test/api/v2");
        assert_eq!(config.hr.api_key.as_deref(), Some("k-123"));
        assert_eq!(config.simulation.success_rate, 1.0);
        assert_eq!(config.simulation.delay_ms, 0);
        assert_eq!(config.target_policy(), TargetPolicy::Shared);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[hr\nbase_url =").unwrap();
        assert!(matches!(Config::load_from(dir.path()), Err(HrbridgeError::Config(_))));
    }

    #[test]
    fn test_merge_default_options() {
        let mut config = Config::with_dir(PathBuf::from("."));
        config.default_options = vec!["--verbose".to_string()];
        let merged = config.merge_default_options(vec!["hrbridge".into(), "endpoints".into()]);
        assert_eq!(merged, vec!["hrbridge", "--verbose", "endpoints"]);
    }
}
