use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::background::BackgroundId;
use crate::fullscreen::DEFAULT_CONTROLS_IDLE;
use crate::menu::StyleId;
use crate::region::RegionId;
use crate::time_format::HourFormat;

/// Start-up values. Read once, never written back.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ClockConfig {
    pub region: RegionId,
    pub hour_format: HourFormat,
    pub dark_mode: bool,
    pub style: StyleId,
    pub background: BackgroundId,
    pub controls_idle: Duration,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            region: RegionId::default(),
            hour_format: HourFormat::default(),
            dark_mode: false,
            style: StyleId::default(),
            background: BackgroundId::default(),
            controls_idle: DEFAULT_CONTROLS_IDLE,
        }
    }
}

pub fn load_clock_config(path: &Path) -> Result<ClockConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read config file {}", path.display()))?;
    parse_clock_config_text(&content)
}

pub fn parse_clock_config_text(content: &str) -> Result<ClockConfig> {
    let raw = serde_json::from_str::<ClockConfigFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow::anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.version != 1 {
        bail!(
            "unsupported config version {}; expected version 1",
            raw.version
        );
    }

    let defaults = ClockConfig::default();
    let hour_format = match raw.hour_format {
        Some(hours) => HourFormat::from_hours(hours)?,
        None => defaults.hour_format,
    };
    let style = match raw.style.as_deref() {
        Some(name) => name.parse::<StyleId>()?,
        None => defaults.style,
    };
    let background = match raw.background.as_deref() {
        Some(name) => name.parse::<BackgroundId>()?,
        None => defaults.background,
    };
    if raw.controls_idle_ms == 0 {
        bail!("controls_idle_ms must be greater than zero");
    }

    Ok(ClockConfig {
        region: raw.region.map(RegionId::new).unwrap_or(defaults.region),
        hour_format,
        dark_mode: raw.dark_mode,
        style,
        background,
        controls_idle: Duration::from_millis(raw.controls_idle_ms),
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClockConfigFile {
    version: u32,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    hour_format: Option<u8>,
    #[serde(default)]
    dark_mode: bool,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    background: Option<String>,
    #[serde(default = "default_controls_idle_ms")]
    controls_idle_ms: u64,
}

fn default_controls_idle_ms() -> u64 {
    DEFAULT_CONTROLS_IDLE.as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let json = r#"
{
  "version": 1,
  "region": "Asia/Tokyo",
  "hour_format": 24,
  "dark_mode": true,
  "style": "neon",
  "background": "monte-carlo",
  "controls_idle_ms": 1500
}
"#;
        let config = parse_clock_config_text(json).expect("valid config");
        assert_eq!(config.region.as_str(), "Asia/Tokyo");
        assert_eq!(config.hour_format, HourFormat::Hour24);
        assert!(config.dark_mode);
        assert_eq!(config.style, StyleId::Neon);
        assert_eq!(config.background, BackgroundId::MonteCarlo);
        assert_eq!(config.controls_idle, Duration::from_millis(1_500));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = parse_clock_config_text(r#"{ "version": 1 }"#).expect("valid config");
        assert_eq!(config, ClockConfig::default());
        assert_eq!(config.controls_idle, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_hour_format() {
        let err = parse_clock_config_text(r#"{ "version": 1, "hour_format": 13 }"#)
            .expect_err("13 is not a format");
        assert!(err.to_string().contains("invalid hour format"));
    }

    #[test]
    fn rejects_unknown_style() {
        let err = parse_clock_config_text(r#"{ "version": 1, "style": "glitter" }"#)
            .expect_err("unknown style");
        assert!(err.to_string().contains("unknown style"));
    }

    #[test]
    fn rejects_unsupported_version() {
        let err = parse_clock_config_text(r#"{ "version": 2 }"#).expect_err("version 2");
        assert!(err.to_string().contains("unsupported config version"));
    }

    #[test]
    fn malformed_json_reports_position() {
        let err = parse_clock_config_text("{ \"version\": ").expect_err("truncated");
        assert!(err.to_string().contains("invalid JSON at line 1"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = parse_clock_config_text(r#"{ "version": 1, "colour": "red" }"#)
            .expect_err("typo'd key");
        assert!(err.to_string().contains("unknown field `colour`"));
    }
}
