//! Runtime configuration.
//!
//! [`AppConfig`] is built in layers: built-in defaults, then an optional TOML
//! file, then environment overrides. The binary applies CLI flags last. The
//! resulting value is passed explicitly to whatever needs it.
//!
//! ```toml
//! vs_currency = "eur"
//! top_n = 50
//! alert_threshold_pct = 7.5
//! database_url = "data/crypto.db"
//! ```
//!
//! Recognized environment overrides:
//! - `DATABASE_URL`
//! - `COIN_TRACKER_VS_CURRENCY`
//! - `COIN_TRACKER_TOP_N`
//! - `COIN_TRACKER_HISTORY_HOURS`
//! - `COIN_TRACKER_ALERT_THRESHOLD`
//!
//! Notification credentials are not part of this file; they are read from the
//! environment by the notifier itself.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use coin_ingestor::{
    models::request_params::{MAX_TOP_N, MarketsRequestParams},
    providers::coingecko_rest::provider::DEFAULT_BASE_URL,
};
use serde::{Deserialize, Serialize};
use shared_utils::config::env_override;

/// Longest accepted trailing window: one hundred years.
pub const MAX_HISTORY_HOURS: u32 = 24 * 365 * 100;

/// Errors raised while loading or validating [`AppConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override is set to an unparseable value.
    #[error(transparent)]
    Env(#[from] shared_utils::config::ConfigError),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// All tunables of the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Base URL of the market data API.
    pub api_base_url: String,
    /// Quote currency for prices.
    pub vs_currency: String,
    /// How many coins to fetch per cycle, by market cap.
    pub top_n: u32,
    /// Trailing window for statistics and exports.
    pub history_hours: u32,
    /// Absolute 24h change, in percent, at which a coin raises an alert.
    pub alert_threshold_pct: f64,
    /// SQLite database path or `sqlite:` URL.
    pub database_url: String,
    /// Directory for exports written without an explicit output path.
    pub export_dir: PathBuf,
    /// Pause between consecutive notifications.
    pub notify_spacing_ms: u64,
    /// Pause between cycles in watch mode.
    pub fetch_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            vs_currency: "usd".to_string(),
            top_n: 20,
            history_hours: 24,
            alert_threshold_pct: 5.0,
            database_url: "crypto_data.db".to_string(),
            export_dir: PathBuf::from("exports"),
            notify_spacing_ms: 1000,
            fetch_interval_secs: 300,
        }
    }
}

impl AppConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults, then `path` if given, then environment overrides.
    ///
    /// The result is not validated; call [`AppConfig::validate`] after any
    /// further overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::default(),
        };
        cfg.apply_env()?;
        Ok(cfg)
    }

    /// Applies environment overrides in place.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_override::<String>("DATABASE_URL")? {
            self.database_url = v;
        }
        if let Some(v) = env_override::<String>("COIN_TRACKER_VS_CURRENCY")? {
            self.vs_currency = v;
        }
        if let Some(v) = env_override::<u32>("COIN_TRACKER_TOP_N")? {
            self.top_n = v;
        }
        if let Some(v) = env_override::<u32>("COIN_TRACKER_HISTORY_HOURS")? {
            self.history_hours = v;
        }
        if let Some(v) = env_override::<f64>("COIN_TRACKER_ALERT_THRESHOLD")? {
            self.alert_threshold_pct = v;
        }
        Ok(())
    }

    /// Rejects values the rest of the tracker cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOP_N).contains(&self.top_n) {
            return Err(ConfigError::Invalid(format!(
                "top_n must be between 1 and {MAX_TOP_N}, got {}",
                self.top_n
            )));
        }
        if !(1..=MAX_HISTORY_HOURS).contains(&self.history_hours) {
            return Err(ConfigError::Invalid(format!(
                "history_hours must be between 1 and {MAX_HISTORY_HOURS}, got {}",
                self.history_hours
            )));
        }
        if !self.alert_threshold_pct.is_finite() || self.alert_threshold_pct < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "alert_threshold_pct must be a non-negative number, got {}",
                self.alert_threshold_pct
            )));
        }
        if self.vs_currency.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "vs_currency must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Request parameters for the snapshot source.
    pub fn markets_params(&self) -> MarketsRequestParams {
        MarketsRequestParams {
            vs_currency: self.vs_currency.clone(),
            top_n: self.top_n,
        }
    }

    /// Pause between notifications as a [`Duration`].
    pub fn notify_spacing(&self) -> Duration {
        Duration::from_millis(self.notify_spacing_ms)
    }

    /// Pause between watch cycles as a [`Duration`].
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.fetch_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const OVERRIDES: [&str; 5] = [
        "DATABASE_URL",
        "COIN_TRACKER_VS_CURRENCY",
        "COIN_TRACKER_TOP_N",
        "COIN_TRACKER_HISTORY_HOURS",
        "COIN_TRACKER_ALERT_THRESHOLD",
    ];

    fn clear_env() {
        for name in OVERRIDES {
            unsafe { std::env::remove_var(name) };
        }
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.top_n, 20);
        assert_eq!(cfg.notify_spacing(), Duration::from_secs(1));
        assert_eq!(cfg.markets_params(), MarketsRequestParams::default());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = AppConfig::from_toml_str("vs_currency = \"eur\"\ntop_n = 50\n").unwrap();
        assert_eq!(cfg.vs_currency, "eur");
        assert_eq!(cfg.top_n, 50);
        assert_eq!(cfg.history_hours, 24);
        assert_eq!(cfg.database_url, "crypto_data.db");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_toml_str("top_m = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let bad = [
            AppConfig { top_n: 0, ..Default::default() },
            AppConfig { top_n: 251, ..Default::default() },
            AppConfig { history_hours: 0, ..Default::default() },
            AppConfig { history_hours: MAX_HISTORY_HOURS + 1, ..Default::default() },
            AppConfig { history_hours: u32::MAX, ..Default::default() },
            AppConfig { alert_threshold_pct: -1.0, ..Default::default() },
            AppConfig { alert_threshold_pct: f64::NAN, ..Default::default() },
            AppConfig { vs_currency: "  ".into(), ..Default::default() },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))), "{cfg:?}");
        }
        AppConfig {
            alert_threshold_pct: 0.0,
            top_n: 250,
            history_hours: MAX_HISTORY_HOURS,
            ..Default::default()
        }
        .validate()
        .unwrap();
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppConfig::from_path(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    #[serial]
    fn env_overrides_file_values() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.toml");
        std::fs::write(&path, "top_n = 50\nhistory_hours = 12\n").unwrap();

        unsafe {
            std::env::set_var("COIN_TRACKER_TOP_N", "5");
            std::env::set_var("DATABASE_URL", "sqlite://other.db");
        }
        let cfg = AppConfig::load(Some(&path)).unwrap();
        clear_env();

        assert_eq!(cfg.top_n, 5);
        assert_eq!(cfg.history_hours, 12);
        assert_eq!(cfg.database_url, "sqlite://other.db");
    }

    #[test]
    #[serial]
    fn bad_env_value_is_reported() {
        clear_env();
        unsafe { std::env::set_var("COIN_TRACKER_ALERT_THRESHOLD", "lots") };
        let err = AppConfig::load(None).unwrap_err();
        clear_env();

        assert!(matches!(err, ConfigError::Env(_)));
        assert!(err.to_string().contains("COIN_TRACKER_ALERT_THRESHOLD"));
    }
}
