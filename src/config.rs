use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

use crate::calendar::{UpdateStrategy, WeekStart};
use crate::theme::ThemeConfig;

pub const API_URL_ENV: &str = "REMINDER_API_URL";

/// Settings read from `<config_dir>/reminder-calendar/config.toml`.
/// Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub watch_interval_secs: u64,
    pub popup_secs: u64,
    pub request_timeout_secs: u64,
    pub update_strategy: UpdateStrategy,
    pub week_start: WeekStart,
    pub log_file: Option<PathBuf>,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3000".to_string(),
            watch_interval_secs: 5,
            popup_secs: 12,
            request_timeout_secs: 10,
            update_strategy: UpdateStrategy::default(),
            week_start: WeekStart::default(),
            log_file: None,
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Load the config file if there is one, then apply environment
    /// overrides. A file that exists but does not parse is an error.
    pub fn load() -> Result<Self> {
        let config = match config_path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .wrap_err_with(|| format!("reading {}", path.display()))?;
                Self::from_toml(&content).wrap_err_with(|| format!("parsing {}", path.display()))?
            }
            _ => Self::default(),
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_secs(self.watch_interval_secs.max(1))
    }

    pub fn popup_duration(&self) -> Duration {
        Duration::from_secs(self.popup_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|d| d.join("reminder-calendar").join("reminder-calendar.log"))
        })
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("reminder-calendar").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:3000");
        assert_eq!(config.watch_interval(), Duration::from_secs(5));
        assert_eq!(config.popup_duration(), Duration::from_secs(12));
        assert_eq!(config.update_strategy, UpdateStrategy::Replace);
        assert_eq!(config.week_start, WeekStart::Sunday);
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_toml(
            r##"
            api_url = "https://reminders.example.com"
            watch_interval_secs = 2
            popup_secs = 4
            request_timeout_secs = 3
            update_strategy = "delete_then_add"
            week_start = "monday"
            log_file = "/tmp/rc.log"

            [theme]
            preset = "nord"
            reminder_fg = "#ff8800"
            "##,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://reminders.example.com");
        assert_eq!(config.watch_interval(), Duration::from_secs(2));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.update_strategy, UpdateStrategy::DeleteThenAdd);
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/rc.log")));
        assert_eq!(config.theme.preset.as_deref(), Some("nord"));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(Config::from_toml(r#"update_strategy = "patch""#).is_err());
    }

    #[test]
    fn env_overrides_api_url() {
        let config = Config::default().with_env(|key| {
            (key == API_URL_ENV).then(|| "http://10.0.0.2:8080".to_string())
        });
        assert_eq!(config.api_url, "http://10.0.0.2:8080");

        let blank = Config::default().with_env(|_| Some("  ".to_string()));
        assert_eq!(blank.api_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn zero_intervals_are_clamped() {
        let config = Config::from_toml("watch_interval_secs = 0\nrequest_timeout_secs = 0").unwrap();
        assert_eq!(config.watch_interval(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
