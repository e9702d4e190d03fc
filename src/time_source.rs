use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};

pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    fn is_live(&self) -> bool;
}

pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn is_live(&self) -> bool {
        true
    }
}

/// Always reports the same instant; used for `--at` renders.
pub struct FixedTimeSource {
    instant: DateTime<Utc>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn is_live(&self) -> bool {
        false
    }
}

pub struct SelectedTimeSource {
    pub source: Box<dyn TimeSource>,
    pub label: &'static str,
}

pub fn select_source(at: Option<&str>) -> Result<SelectedTimeSource> {
    match at {
        None => Ok(SelectedTimeSource {
            source: Box::new(SystemTimeSource),
            label: "SYSTEM",
        }),
        Some(text) => {
            let instant = parse_instant(text)?;
            Ok(SelectedTimeSource {
                source: Box::new(FixedTimeSource::new(instant)),
                label: "FIXED",
            })
        }
    }
}

fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid --at instant '{input}', expected RFC 3339: {err}"))
}
