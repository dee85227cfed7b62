use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::monitor::SamplerSettings;

pub const PERIOD_MS_RANGE: (u64, u64) = (100, 60_000);
pub const SERIES_CAPACITY_RANGE: (usize, usize) = (2, 86_400);
pub const PROCESS_LIMIT_RANGE: (u32, u32) = (1, 10_000);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub period_ms: u64,
    pub series_capacity: usize,
    pub process_limit: Option<u32>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            period_ms: 1000,
            series_capacity: 60,
            process_limit: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
    pub cpu_line: String,
    pub mem_line: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
            cpu_line: "#2196f3".to_string(),
            mem_line: "#4caf50".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub refresh: String,
    pub clear: String,
    pub pause: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            refresh: "r".to_string(),
            clear: "c".to_string(),
            pause: "p".to_string(),
            help: "?".to_string(),
        }
    }
}

/// Out-of-range options are rejected at startup and never retried.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    PeriodOutOfRange(u64),
    SeriesCapacityOutOfRange(usize),
    ProcessLimitOutOfRange(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PeriodOutOfRange(v) => {
                let (lo, hi) = PERIOD_MS_RANGE;
                write!(f, "period_ms {v} is outside {lo}..={hi}")
            }
            ConfigError::SeriesCapacityOutOfRange(v) => {
                let (lo, hi) = SERIES_CAPACITY_RANGE;
                write!(f, "series_capacity {v} is outside {lo}..={hi}")
            }
            ConfigError::ProcessLimitOutOfRange(v) => {
                let (lo, hi) = PROCESS_LIMIT_RANGE;
                write!(f, "process_limit {v} is outside {lo}..={hi}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Range-checks the sampling options and produces the settings the
    /// scheduler is constructed with.
    pub fn sampler_settings(&self) -> Result<SamplerSettings, ConfigError> {
        let g = &self.general;
        if !(PERIOD_MS_RANGE.0..=PERIOD_MS_RANGE.1).contains(&g.period_ms) {
            return Err(ConfigError::PeriodOutOfRange(g.period_ms));
        }
        if !(SERIES_CAPACITY_RANGE.0..=SERIES_CAPACITY_RANGE.1).contains(&g.series_capacity) {
            return Err(ConfigError::SeriesCapacityOutOfRange(g.series_capacity));
        }
        if let Some(limit) = g.process_limit
            && !(PROCESS_LIMIT_RANGE.0..=PROCESS_LIMIT_RANGE.1).contains(&limit)
        {
            return Err(ConfigError::ProcessLimitOutOfRange(limit));
        }
        Ok(SamplerSettings {
            period: Duration::from_millis(g.period_ms),
            series_capacity: g.series_capacity,
            process_limit: g.process_limit,
        })
    }
}

pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" => Some(KeyCode::Enter),
        "Escape" | "Esc" => Some(KeyCode::Esc),
        "Tab" => Some(KeyCode::Tab),
        "Space" => Some(KeyCode::Char(' ')),
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

/// Inverse of `parse_key`, for user-facing key hints.
pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        _ => "?".to_string(),
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pulsetop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.period_ms, 1000);
        assert_eq!(config.general.series_capacity, 60);
        assert_eq!(config.general.process_limit, None);
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.colors.cpu_line, "#2196f3");
        assert_eq!(config.keybinds.quit, "q");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
period_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.period_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.series_capacity, 60);
        assert_eq!(config.keybinds.refresh, "r");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
period_ms = 2000
series_capacity = 120
process_limit = 50

[colors]
theme = "light"
cpu_line = "#ff0000"

[keybinds]
quit = "x"
pause = "Space"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.period_ms, 2000);
        assert_eq!(config.general.series_capacity, 120);
        assert_eq!(config.general.process_limit, Some(50));
        assert_eq!(config.colors.theme, "light");
        assert_eq!(config.colors.cpu_line, "#ff0000");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(parse_key(&config.keybinds.pause), Some(KeyCode::Char(' ')));
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.period_ms, 1000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("pulsetop_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.period_ms, 1000);
        let _ = std::fs::remove_file(&temp);
    }

    #[test]
    fn sampler_settings_accepts_defaults() {
        let settings = Config::default().sampler_settings().unwrap();
        assert_eq!(settings.period, Duration::from_secs(1));
        assert_eq!(settings.series_capacity, 60);
        assert_eq!(settings.process_limit, None);
    }

    #[test]
    fn sampler_settings_rejects_out_of_range() {
        let mut config = Config::default();
        config.general.period_ms = 50;
        assert_eq!(
            config.sampler_settings().unwrap_err(),
            ConfigError::PeriodOutOfRange(50)
        );

        let mut config = Config::default();
        config.general.series_capacity = 1;
        assert_eq!(
            config.sampler_settings().unwrap_err(),
            ConfigError::SeriesCapacityOutOfRange(1)
        );

        let mut config = Config::default();
        config.general.process_limit = Some(0);
        assert_eq!(
            config.sampler_settings().unwrap_err(),
            ConfigError::ProcessLimitOutOfRange(0)
        );

        let mut config = Config::default();
        config.general.process_limit = Some(10_001);
        assert!(config.sampler_settings().is_err());
    }

    #[test]
    fn boundary_values_are_accepted() {
        let mut config = Config::default();
        config.general.period_ms = 100;
        config.general.series_capacity = 86_400;
        config.general.process_limit = Some(10_000);
        assert!(config.sampler_settings().is_ok());
    }

    #[test]
    fn parse_key_named_and_single_char() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("Enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key("Esc"), Some(KeyCode::Esc));
        assert_eq!(parse_key("toolong"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn key_label_inverts_parse_key() {
        for s in ["q", "Enter", "Esc", "Space", "Tab"] {
            let code = parse_key(s).unwrap();
            assert_eq!(key_label(code), s);
        }
        // Unrepresentable keys fall back to a placeholder, never Debug text.
        assert_eq!(key_label(KeyCode::Home), "?");
    }
}
