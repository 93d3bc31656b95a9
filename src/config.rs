// src/config.rs
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{DashError, Result};
use crate::pacing::RevealPacer;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client configuration, from the environment with an optional TOML overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the analysis service; `/api/analyze` is appended.
    pub api_base: String,
    pub reveal_delay_ms: u64,
    pub timeout_secs: u64,
    /// Where the terminal surface writes `report.html`.
    pub report_dir: PathBuf,
}

/// Keys accepted in a `--config` TOML file. Every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_base: Option<String>,
    reveal_delay_ms: Option<u64>,
    timeout_secs: Option<u64>,
    report_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base = lookup("DRIFTDECK_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let reveal_delay_ms = parse_number(
            "DRIFTDECK_REVEAL_DELAY_MS",
            lookup("DRIFTDECK_REVEAL_DELAY_MS"),
            DEFAULT_REVEAL_DELAY_MS,
        )?;
        let timeout_secs = parse_number(
            "DRIFTDECK_TIMEOUT_SECS",
            lookup("DRIFTDECK_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        )?;
        let report_dir = lookup("DRIFTDECK_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_report_dir);

        let config = AppConfig {
            api_base,
            reveal_delay_ms,
            timeout_secs,
            report_dir,
        };
        config.validate()?;
        Ok(config)
    }

    /// Overlays the keys present in a TOML document.
    pub fn apply_toml(&mut self, text: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(text)?;
        if let Some(api_base) = file.api_base {
            self.api_base = api_base;
        }
        if let Some(ms) = file.reveal_delay_ms {
            self.reveal_delay_ms = ms;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(dir) = file.report_dir {
            self.report_dir = dir;
        }
        self.validate()
    }

    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.apply_toml(&text)
    }

    pub fn reveal_pacer(&self) -> RevealPacer {
        RevealPacer::new(Duration::from_millis(self.reveal_delay_ms))
    }

    fn validate(&self) -> Result<()> {
        let re = Regex::new(r"^https?://[^\s/]+").unwrap();
        if !re.is_match(&self.api_base) {
            return Err(DashError::Config(format!(
                "api base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        if self.timeout_secs == 0 {
            return Err(DashError::Config("timeout must be at least one second".to_string()));
        }
        Ok(())
    }
}

fn parse_number(key: &str, raw: Option<String>, default: u64) -> Result<u64> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| DashError::Config(format!("{key} must be a whole number, got '{value}'"))),
    }
}

fn default_report_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("driftdeck"))
        .unwrap_or_else(|| PathBuf::from("driftdeck-reports"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.reveal_delay_ms, 1000);
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.reveal_pacer().delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_env_values() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DRIFTDECK_API_BASE", "https://drift.internal:9000"),
            ("DRIFTDECK_REVEAL_DELAY_MS", "0"),
            ("DRIFTDECK_REPORT_DIR", "/tmp/reports"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "https://drift.internal:9000");
        assert_eq!(config.reveal_delay_ms, 0);
        assert_eq!(config.report_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_bad_number_is_config_error() {
        let err = AppConfig::from_lookup(lookup(&[("DRIFTDECK_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, DashError::Config(msg) if msg.contains("DRIFTDECK_TIMEOUT_SECS")));
    }

    #[test]
    fn test_bad_api_base_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("DRIFTDECK_API_BASE", "localhost:8000")])).unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
    }

    #[test]
    fn test_toml_overlay() {
        let mut config = AppConfig::from_lookup(lookup(&[])).unwrap();
        config
            .apply_toml("api_base = \"http://10.0.0.5:8000\"\nreveal_delay_ms = 250\n")
            .unwrap();
        assert_eq!(config.api_base, "http://10.0.0.5:8000");
        assert_eq!(config.reveal_delay_ms, 250);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_toml_unknown_key_rejected() {
        let mut config = AppConfig::from_lookup(lookup(&[])).unwrap();
        let err = config.apply_toml("retries = 3\n").unwrap_err();
        assert!(matches!(err, DashError::TomlParse(_)));
    }
}
