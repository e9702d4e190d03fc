use crate::region::RegionId;
use crate::time_format::HourFormat;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ClockSettings {
    pub region: RegionId,
    pub hour_format: HourFormat,
    pub dark_mode: bool,
}
