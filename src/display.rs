use chrono::{DateTime, TimeZone};
use log::{debug, warn};

use crate::error::ClockError;
use crate::settings::ClockSettings;
use crate::time_format::{self, DisplayFields};

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TimeSlots {
    pub hour: String,
    pub minute: String,
    pub second: String,
    pub meridiem: Option<String>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DateSlots {
    pub weekday: String,
    pub day_month: String,
    pub year: String,
}

/// Something the clock can be written into. Targets without sub-slots only
/// receive the coarse full-text writes.
pub trait DisplayTarget {
    fn time_slots(&mut self) -> Option<&mut TimeSlots>;
    fn date_slots(&mut self) -> Option<&mut DateSlots>;
    fn write_time_text(&mut self, text: &str);
    fn write_date_text(&mut self, text: &str);
}

/// Slotted target backing the GUI clock face.
#[derive(Debug, Clone, Default)]
pub struct ClockFace {
    pub time: TimeSlots,
    pub date: DateSlots,
}

impl DisplayTarget for ClockFace {
    fn time_slots(&mut self) -> Option<&mut TimeSlots> {
        Some(&mut self.time)
    }

    fn date_slots(&mut self) -> Option<&mut DateSlots> {
        Some(&mut self.date)
    }

    fn write_time_text(&mut self, text: &str) {
        self.time = TimeSlots {
            hour: text.to_string(),
            ..TimeSlots::default()
        };
    }

    fn write_date_text(&mut self, text: &str) {
        self.date = DateSlots {
            weekday: text.to_string(),
            ..DateSlots::default()
        };
    }
}

/// Slot-less target: one line of time and one line of date.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LineTarget {
    pub time_line: String,
    pub date_line: String,
}

impl DisplayTarget for LineTarget {
    fn time_slots(&mut self) -> Option<&mut TimeSlots> {
        None
    }

    fn date_slots(&mut self) -> Option<&mut DateSlots> {
        None
    }

    fn write_time_text(&mut self, text: &str) {
        self.time_line = text.to_string();
    }

    fn write_date_text(&mut self, text: &str) {
        self.date_line = text.to_string();
    }
}

#[derive(Debug, Default)]
pub struct DisplayUpdater {
    last_good: Option<DisplayFields>,
    failed_region: Option<String>,
}

impl DisplayUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_good(&self) -> Option<&DisplayFields> {
        self.last_good.as_ref()
    }

    /// Formats `now` for the configured region and renders it. An
    /// unrecognized region leaves the target showing the last good frame.
    pub fn refresh<Z: TimeZone>(
        &mut self,
        target: &mut dyn DisplayTarget,
        now: &DateTime<Z>,
        settings: &ClockSettings,
    ) -> Result<(), ClockError> {
        match time_format::format(now, &settings.region, settings.hour_format) {
            Ok(fields) => {
                self.failed_region = None;
                render(target, &fields);
                self.last_good = Some(fields);
                Ok(())
            }
            Err(err) => {
                // Warn once per bad region rather than every tick.
                if self.failed_region.as_deref() != Some(settings.region.as_str()) {
                    warn!("keeping last rendering: {err}");
                    self.failed_region = Some(settings.region.as_str().to_string());
                }
                Err(err)
            }
        }
    }
}

pub fn render(target: &mut dyn DisplayTarget, fields: &DisplayFields) {
    if let Err(err) = render_time_slots(target, fields) {
        debug!("{err}; writing full time text");
        target.write_time_text(&fields.time_text());
    }
    if let Err(err) = render_date_slots(target, fields) {
        debug!("{err}; writing full date text");
        target.write_date_text(&fields.date_text());
    }
}

fn render_time_slots(
    target: &mut dyn DisplayTarget,
    fields: &DisplayFields,
) -> Result<(), ClockError> {
    let slots = target
        .time_slots()
        .ok_or(ClockError::MissingUiStructure("time"))?;
    slots.hour.clone_from(&fields.hour);
    slots.minute.clone_from(&fields.minute);
    slots.second.clone_from(&fields.second);
    slots.meridiem = fields.meridiem.map(str::to_string);
    Ok(())
}

fn render_date_slots(
    target: &mut dyn DisplayTarget,
    fields: &DisplayFields,
) -> Result<(), ClockError> {
    let slots = target
        .date_slots()
        .ok_or(ClockError::MissingUiStructure("date"))?;
    slots.weekday.clone_from(&fields.weekday);
    slots.day_month = fields.day_month();
    slots.year.clone_from(&fields.year);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::region::RegionId;
    use crate::time_format::HourFormat;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 3, 35, 3)
            .single()
            .expect("valid")
    }

    #[test]
    fn slotted_target_receives_each_field() {
        let mut face = ClockFace::default();
        let mut updater = DisplayUpdater::new();
        updater
            .refresh(&mut face, &instant(), &ClockSettings::default())
            .expect("default region formats");

        assert_eq!(face.time.hour, "09");
        assert_eq!(face.time.minute, "05");
        assert_eq!(face.time.second, "03");
        assert_eq!(face.time.meridiem.as_deref(), Some("AM"));
        assert_eq!(face.date.weekday, "Monday");
        assert_eq!(face.date.day_month, "January 5");
        assert_eq!(face.date.year, "2026");
    }

    #[test]
    fn slotless_target_falls_back_to_full_text() {
        let mut line = LineTarget::default();
        let settings = ClockSettings {
            hour_format: HourFormat::Hour24,
            ..ClockSettings::default()
        };
        DisplayUpdater::new()
            .refresh(&mut line, &instant(), &settings)
            .expect("formats");
        assert_eq!(line.time_line, "09:05:03");
        assert_eq!(line.date_line, "Monday, January 5, 2026");
    }

    #[test]
    fn invalid_region_keeps_last_good_rendering() {
        let mut face = ClockFace::default();
        let mut updater = DisplayUpdater::new();
        let mut settings = ClockSettings::default();
        updater
            .refresh(&mut face, &instant(), &settings)
            .expect("formats");
        let before = face.time.clone();

        settings.region = RegionId::new("Atlantis/Central");
        let later = instant() + chrono::Duration::seconds(30);
        let err = updater
            .refresh(&mut face, &later, &settings)
            .expect_err("unknown region");
        assert!(matches!(err, ClockError::InvalidRegion(_)));
        assert_eq!(face.time, before);
        assert_eq!(updater.last_good().map(|f| f.second.as_str()), Some("03"));
    }

    #[test]
    fn switching_to_twenty_four_hours_clears_meridiem_slot() {
        let mut face = ClockFace::default();
        let mut updater = DisplayUpdater::new();
        let mut settings = ClockSettings::default();
        updater.refresh(&mut face, &instant(), &settings).expect("12h");
        settings.hour_format = HourFormat::Hour24;
        updater.refresh(&mut face, &instant(), &settings).expect("24h");
        assert_eq!(face.time.meridiem, None);
        assert_eq!(face.time.hour, "09");
    }
}
