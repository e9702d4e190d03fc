use std::fmt;

use chrono_tz::Tz;
use log::debug;

use crate::error::ClockError;

pub const DEFAULT_REGION: &str = "Asia/Kolkata";
const DEFAULT_REGION_LABEL: &str = "India Standard Time";

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_REGION
    }

    pub fn resolve(&self) -> Result<Tz, ClockError> {
        self.0
            .parse::<Tz>()
            .map_err(|_| ClockError::InvalidRegion(self.0.clone()))
    }
}

impl Default for RegionId {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RegionOption {
    pub id: &'static str,
    pub display_text: &'static str,
}

pub const REGION_OPTIONS: &[RegionOption] = &[
    RegionOption {
        id: "Asia/Kolkata",
        display_text: "India (IST)",
    },
    RegionOption {
        id: "America/New_York",
        display_text: "New York (EST)",
    },
    RegionOption {
        id: "America/Los_Angeles",
        display_text: "Los Angeles (PST)",
    },
    RegionOption {
        id: "America/Chicago",
        display_text: "Chicago (CST)",
    },
    RegionOption {
        id: "Europe/London",
        display_text: "London (GMT)",
    },
    RegionOption {
        id: "Europe/Paris",
        display_text: "Paris (CET)",
    },
    RegionOption {
        id: "Europe/Monaco",
        display_text: "Monte Carlo (CET)",
    },
    RegionOption {
        id: "Asia/Dubai",
        display_text: "Dubai (GST)",
    },
    RegionOption {
        id: "Asia/Singapore",
        display_text: "Singapore (SGT)",
    },
    RegionOption {
        id: "Asia/Tokyo",
        display_text: "Tokyo (JST)",
    },
    RegionOption {
        id: "Australia/Sydney",
        display_text: "Sydney (AEST)",
    },
    RegionOption {
        id: "UTC",
        display_text: "Coordinated Universal Time (UTC)",
    },
];

/// Active region plus the friendly label shown under the clock.
#[derive(Debug, Clone)]
pub struct RegionSelector {
    active: RegionId,
    label: String,
}

impl RegionSelector {
    pub fn new(initial: RegionId) -> Self {
        let label = label_for(&initial);
        Self {
            active: initial,
            label,
        }
    }

    pub fn options(&self) -> &'static [RegionOption] {
        REGION_OPTIONS
    }

    pub fn active(&self) -> &RegionId {
        &self.active
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_region(&mut self, id: RegionId) -> &str {
        self.label = label_for(&id);
        debug!("region set to {id} ({})", self.label);
        self.active = id;
        &self.label
    }
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self::new(RegionId::default())
    }
}

pub fn label_for(id: &RegionId) -> String {
    if id.is_default() {
        return DEFAULT_REGION_LABEL.to_string();
    }
    REGION_OPTIONS
        .iter()
        .find(|option| option.id == id.as_str())
        .map(|option| option.display_text.to_string())
        .unwrap_or_else(|| id.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_uses_canonical_label() {
        let mut selector = RegionSelector::new(RegionId::new("Europe/London"));
        let label = selector.set_region(RegionId::new(DEFAULT_REGION)).to_string();
        assert_eq!(label, "India Standard Time");
        assert_eq!(selector.label(), "India Standard Time");
    }

    #[test]
    fn other_regions_use_display_text_verbatim() {
        let mut selector = RegionSelector::default();
        assert_eq!(
            selector.set_region(RegionId::new("Asia/Tokyo")),
            "Tokyo (JST)"
        );
        assert_eq!(selector.active().as_str(), "Asia/Tokyo");
    }

    #[test]
    fn unknown_region_keeps_raw_id_as_label() {
        let selector = RegionSelector::new(RegionId::new("Mars/Olympus_Mons"));
        assert_eq!(selector.label(), "Mars/Olympus_Mons");
        assert_eq!(
            selector.active().resolve(),
            Err(ClockError::InvalidRegion("Mars/Olympus_Mons".to_string()))
        );
    }

    #[test]
    fn every_option_resolves_to_a_zone() {
        for option in REGION_OPTIONS {
            RegionId::new(option.id)
                .resolve()
                .unwrap_or_else(|err| panic!("{}: {err}", option.id));
        }
    }
}
