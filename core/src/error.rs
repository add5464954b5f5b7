use thiserror::Error;

use crate::params::SignalMode;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UcheckinError {
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("mode {0} not implemented yet")]
    ModeNotImplemented(SignalMode),

    #[error("Repetition must be at least 1 (got {0})")]
    InvalidRepeat(usize),

    #[error("Volume must be between 0 and 1 (got {0})")]
    InvalidVolume(f64),

    #[error("Duration must be between 0 and {max} seconds (got {0})", max = crate::MAX_DURATION_SECS)]
    InvalidDuration(f64),

    #[error("Chirp of {0} samples has no positive peak to normalize against")]
    DegenerateChirp(usize),

    #[error("Signal is silent, cannot normalize")]
    DegenerateSignal,
}

pub type Result<T> = std::result::Result<T, UcheckinError>;
