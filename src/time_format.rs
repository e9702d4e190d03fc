use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Timelike};

use crate::error::ClockError;
use crate::region::RegionId;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum HourFormat {
    #[default]
    Hour12,
    Hour24,
}

impl HourFormat {
    pub fn toggled(self) -> Self {
        match self {
            HourFormat::Hour12 => HourFormat::Hour24,
            HourFormat::Hour24 => HourFormat::Hour12,
        }
    }

    pub fn from_hours(hours: u8) -> Result<Self, ClockError> {
        match hours {
            12 => Ok(HourFormat::Hour12),
            24 => Ok(HourFormat::Hour24),
            other => Err(ClockError::InvalidHourFormat(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HourFormat::Hour12 => "12H",
            HourFormat::Hour24 => "24H",
        }
    }
}

impl FromStr for HourFormat {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['h', 'H']);
        trimmed
            .parse::<u8>()
            .map_err(|_| ClockError::InvalidHourFormat(s.to_string()))
            .and_then(HourFormat::from_hours)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DisplayFields {
    pub hour: String,
    pub minute: String,
    pub second: String,
    pub meridiem: Option<&'static str>,
    pub weekday: String,
    pub month: String,
    pub day: String,
    pub year: String,
}

impl DisplayFields {
    pub fn time_text(&self) -> String {
        match self.meridiem {
            Some(tag) => format!("{}:{}:{} {tag}", self.hour, self.minute, self.second),
            None => format!("{}:{}:{}", self.hour, self.minute, self.second),
        }
    }

    pub fn day_month(&self) -> String {
        format!("{} {}", self.month, self.day)
    }

    pub fn date_text(&self) -> String {
        format!("{}, {} {}, {}", self.weekday, self.month, self.day, self.year)
    }
}

pub fn format<Z: TimeZone>(
    timestamp: &DateTime<Z>,
    region: &RegionId,
    hour_format: HourFormat,
) -> Result<DisplayFields, ClockError> {
    let zone = region.resolve()?;
    let local = timestamp.with_timezone(&zone);

    let (hour, meridiem) = match hour_format {
        HourFormat::Hour24 => (local.hour(), None),
        HourFormat::Hour12 => {
            let (is_pm, hour12) = local.hour12();
            (hour12, Some(if is_pm { "PM" } else { "AM" }))
        }
    };

    Ok(DisplayFields {
        hour: format!("{hour:02}"),
        minute: format!("{:02}", local.minute()),
        second: format!("{:02}", local.second()),
        meridiem,
        weekday: local.format("%A").to_string(),
        month: local.format("%B").to_string(),
        day: local.day().to_string(),
        year: local.year().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::region::REGION_OPTIONS;

    fn india_morning() -> DateTime<Utc> {
        // 09:05:03 in Asia/Kolkata (UTC+05:30)
        Utc.with_ymd_and_hms(2026, 1, 5, 3, 35, 3)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn india_morning_in_twelve_hour_format() {
        let fields = format(&india_morning(), &RegionId::default(), HourFormat::Hour12)
            .expect("india formats");
        assert_eq!(fields.hour, "09");
        assert_eq!(fields.minute, "05");
        assert_eq!(fields.second, "03");
        assert_eq!(fields.meridiem, Some("AM"));
        assert_eq!(fields.weekday, "Monday");
        assert_eq!(fields.month, "January");
        assert_eq!(fields.day, "5");
        assert_eq!(fields.year, "2026");
        assert_eq!(fields.time_text(), "09:05:03 AM");
        assert_eq!(fields.date_text(), "Monday, January 5, 2026");
    }

    #[test]
    fn same_instant_in_twenty_four_hour_format_drops_meridiem() {
        let fields = format(&india_morning(), &RegionId::default(), HourFormat::Hour24)
            .expect("india formats");
        assert_eq!(
            (fields.hour.as_str(), fields.minute.as_str(), fields.second.as_str()),
            ("09", "05", "03")
        );
        assert_eq!(fields.meridiem, None);
        assert_eq!(fields.time_text(), "09:05:03");
    }

    #[test]
    fn midnight_and_afternoon_edges() {
        let region = RegionId::new("UTC");
        let midnight = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).single().expect("valid");
        let twelve = format(&midnight, &region, HourFormat::Hour12).expect("utc");
        assert_eq!((twelve.hour.as_str(), twelve.meridiem), ("12", Some("AM")));
        let twenty_four = format(&midnight, &region, HourFormat::Hour24).expect("utc");
        assert_eq!(twenty_four.hour, "00");

        let afternoon = midnight + Duration::hours(15) + Duration::seconds(7);
        let pm = format(&afternoon, &region, HourFormat::Hour12).expect("utc");
        assert_eq!(pm.time_text(), "03:00:07 PM");
    }

    #[test]
    fn meridiem_presence_follows_hour_format_for_all_regions() {
        let base = Utc.with_ymd_and_hms(2026, 6, 21, 0, 0, 0).single().expect("valid");
        for option in REGION_OPTIONS {
            let region = RegionId::new(option.id);
            for step in 0..48 {
                let at = base + Duration::minutes(step * 37);
                let h24 = format(&at, &region, HourFormat::Hour24).expect("valid region");
                assert!(h24.meridiem.is_none());
                let h12 = format(&at, &region, HourFormat::Hour12).expect("valid region");
                assert!(matches!(h12.meridiem, Some("AM") | Some("PM")));
                assert_eq!(h12.hour.len(), 2);
                assert_eq!(h24.hour.len(), 2);
            }
        }
    }

    #[test]
    fn date_fields_follow_region_not_utc() {
        // Late evening in New York is already the next day in Tokyo.
        let at = Utc.with_ymd_and_hms(2026, 12, 31, 23, 30, 0).single().expect("valid");
        let tokyo = format(&at, &RegionId::new("Asia/Tokyo"), HourFormat::Hour24).expect("tokyo");
        assert_eq!(tokyo.date_text(), "Friday, January 1, 2027");
        let new_york =
            format(&at, &RegionId::new("America/New_York"), HourFormat::Hour24).expect("ny");
        assert_eq!(new_york.day_month(), "December 31");
        assert_eq!(new_york.hour, "18");
    }

    #[test]
    fn unknown_region_is_reported() {
        let err = format(&india_morning(), &RegionId::new("Not/AZone"), HourFormat::Hour12)
            .expect_err("should fail");
        assert_eq!(err, ClockError::InvalidRegion("Not/AZone".to_string()));
    }

    #[test]
    fn hour_format_parses_cli_tokens() {
        assert_eq!("12".parse::<HourFormat>(), Ok(HourFormat::Hour12));
        assert_eq!("24h".parse::<HourFormat>(), Ok(HourFormat::Hour24));
        assert!("13".parse::<HourFormat>().is_err());
        assert_eq!(HourFormat::Hour12.toggled(), HourFormat::Hour24);
    }
}
