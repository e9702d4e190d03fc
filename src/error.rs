use thiserror::Error;

#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ClockError {
    #[error("unrecognized region '{0}'")]
    InvalidRegion(String),

    #[error("display target has no {0} sub-slots")]
    MissingUiStructure(&'static str),

    #[error("fullscreen request denied: {0}")]
    FullscreenDenied(String),

    #[error("unknown style '{0}'")]
    UnknownStyle(String),

    #[error("unknown background '{0}'")]
    UnknownBackground(String),

    #[error("invalid hour format '{0}', expected 12 or 24")]
    InvalidHourFormat(String),
}
