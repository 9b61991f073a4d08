//! Config model and persistence helpers.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::iss::types::Observer;

/// Top-level configuration stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote API location and client limits.
    pub api: ApiCfg,
    /// Ground location used for pass predictions.
    pub observer: Observer,
    /// Background refresh cadence.
    pub poller: PollerCfg,
    /// Emulated display geometry and frame pacing.
    pub display: DisplayCfg,
}

/// open-notify endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCfg {
    /// Base URL without trailing path, e.g. `http://api.open-notify.org`.
    pub base_url: String,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
}

/// Poller settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollerCfg {
    /// Seconds between refreshes.
    pub interval_secs: u64,
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCfg {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// Upper bound on one frame's input wait, in milliseconds.
    pub frame_ms: u64,
}

impl Config {
    /// Load from disk or create defaults when missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)?;
            Ok(toml::from_str(&s)?)
        } else {
            let cfg = Self::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }
}

impl PollerCfg {
    /// Refresh period, never shorter than one second.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl DisplayCfg {
    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

impl Default for ApiCfg {
    fn default() -> Self {
        Self {
            base_url: "http://api.open-notify.org".into(),
            timeout_secs: 10,
        }
    }
}

impl Default for Config {
    /// Defaults match the reference 128x32 OLED build.
    fn default() -> Self {
        Self {
            api: ApiCfg::default(),
            observer: Observer {
                latitude: 35.216087,
                longitude: -80.853537,
            },
            poller: PollerCfg { interval_secs: 5 },
            display: DisplayCfg {
                width: 128,
                height: 32,
                frame_ms: 50,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_survives_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("[observer]"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn load_or_default_creates_missing_file() {
        let path = std::env::temp_dir().join(format!("iss_tracker_cfg_{}.toml", std::process::id()));
        let _ = fs::remove_file(&path);

        let cfg = Config::load_or_default(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_or_default(&path).unwrap();
        assert_eq!(reloaded, cfg);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let p = PollerCfg { interval_secs: 0 };
        assert_eq!(p.interval(), Duration::from_secs(1));
    }
}
