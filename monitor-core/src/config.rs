use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Alert thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Temperature above which a reading counts as a breach, in Celsius.
    pub temperature_threshold_c: f64,
    /// Number of consecutive breaching readings before an alert fires.
    pub consecutive_breaches: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { temperature_threshold_c: 35.0, consecutive_breaches: 2 }
    }
}

/// SMTP relay settings for alert delivery. Disabled by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender: String,
    pub receiver: String,
    pub password: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            sender: "sender@example.com".to_string(),
            receiver: "receiver@example.com".to_string(),
            password: String::new(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeatherMap API key.
    ///
    /// Example TOML:
    /// api_key = "..."
    /// cities = ["Delhi", "Mumbai"]
    #[serde(default)]
    pub api_key: String,

    /// Cities to poll, in the order they are fetched each cycle.
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,

    /// Minutes between collection cycles.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,

    #[serde(default)]
    pub alerts: AlertConfig,

    #[serde(default)]
    pub email: EmailConfig,
}

fn default_cities() -> Vec<String> {
    ["Delhi", "Mumbai", "Chennai", "Bangalore", "Kolkata", "Hyderabad"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_interval_minutes() -> u64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            cities: default_cities(),
            interval_minutes: default_interval_minutes(),
            alerts: AlertConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config dir, creating parent directories
    /// as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-monitor", "weather-monitor")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Check that the config can drive a collection run.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow!(
                "No API key configured.\n\
                 Hint: run `weather-monitor configure` and enter your OpenWeatherMap API key."
            ));
        }

        if self.cities.is_empty() {
            return Err(anyhow!("No cities configured; nothing to monitor."));
        }

        if self.cities.iter().any(|c| c.trim().is_empty()) {
            return Err(anyhow!("City names must be non-empty."));
        }

        if self.interval_minutes == 0 {
            return Err(anyhow!("interval_minutes must be at least 1."));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        Config { api_key: "KEY".to_string(), ..Config::default() }
    }

    #[test]
    fn defaults_match_shipped_deployment() {
        let cfg = Config::default();

        assert_eq!(cfg.cities.len(), 6);
        assert_eq!(cfg.cities[0], "Delhi");
        assert_eq!(cfg.interval_minutes, 1);
        assert_eq!(cfg.alerts.temperature_threshold_c, 35.0);
        assert_eq!(cfg.alerts.consecutive_breaches, 2);
        assert!(!cfg.email.enabled);
    }

    #[test]
    fn validate_errors_when_api_key_missing() {
        let cfg = Config::default();
        let err = cfg.validate().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `weather-monitor configure`"));
    }

    #[test]
    fn validate_errors_on_empty_city_list() {
        let cfg = Config { cities: Vec::new(), ..configured() };
        let err = cfg.validate().unwrap_err();

        assert!(err.to_string().contains("No cities configured"));
    }

    #[test]
    fn validate_errors_on_blank_city() {
        let cfg = Config { cities: vec!["Delhi".into(), "  ".into()], ..configured() };

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_errors_on_zero_interval() {
        let cfg = Config { interval_minutes: 0, ..configured() };

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn toml_roundtrip_preserves_fields() {
        let mut cfg = configured();
        cfg.email.enabled = true;
        cfg.email.smtp_host = "mail.example.org".to_string();

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&text).expect("parse back");

        assert_eq!(parsed.api_key, "KEY");
        assert_eq!(parsed.cities, cfg.cities);
        assert!(parsed.email.enabled);
        assert_eq!(parsed.email.smtp_host, "mail.example.org");
        assert_eq!(parsed.alerts.consecutive_breaches, 2);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: Config = toml::from_str(r#"api_key = "ABC""#).expect("parse");

        assert_eq!(parsed.api_key, "ABC");
        assert_eq!(parsed.cities.len(), 6);
        assert_eq!(parsed.interval_minutes, 1);
        assert_eq!(parsed.alerts.temperature_threshold_c, 35.0);
    }

    #[test]
    fn load_from_reads_explicit_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = \"XYZ\"\ncities = [\"Pune\"]\n").expect("write");

        let cfg = Config::load_from(&path).expect("load");

        assert_eq!(cfg.api_key, "XYZ");
        assert_eq!(cfg.cities, vec!["Pune".to_string()]);
    }

    #[test]
    fn save_to_creates_parents_and_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = configured();
        cfg.interval_minutes = 5;
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.api_key, "KEY");
        assert_eq!(loaded.interval_minutes, 5);
    }
}
