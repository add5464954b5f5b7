use std::fmt;

use log::warn;

use crate::error::{Result, UcheckinError};
use crate::{
    DEFAULT_BANDWIDTH, DEFAULT_CENTER_FREQUENCY, DEFAULT_SAMPLE_RATE, DEFAULT_SYMBOL_SAMPLES,
    MIN_SYMBOL_SAMPLES,
};

/// Signal family. Only UCheck.in is implemented; Wi-Us is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalMode {
    #[default]
    UCheckIn = 0,
    WiUs = 1,
}

impl TryFrom<u8> for SignalMode {
    type Error = UcheckinError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(SignalMode::UCheckIn),
            1 => Ok(SignalMode::WiUs),
            other => Err(UcheckinError::InvalidParameter(format!(
                "signal mode must be 0 or 1 (got {other})"
            ))),
        }
    }
}

impl fmt::Display for SignalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Fixed physical parameters of a chirp signal
#[derive(Debug, Clone, PartialEq)]
pub struct SignalParameters {
    center_frequency: f64,
    bandwidth: f64,
    symbol_duration: usize,
    sample_rate: u32,
    mode: SignalMode,
}

impl SignalParameters {
    /// # Arguments
    /// * `center_frequency` - Chirp center frequency in Hz
    /// * `bandwidth` - Sweep width in Hz
    /// * `symbol_duration` - Samples per data chirp
    /// * `sample_rate` - Output sample rate in Hz
    /// * `mode` - Signal family
    pub fn new(
        center_frequency: f64,
        bandwidth: f64,
        symbol_duration: usize,
        sample_rate: u32,
        mode: SignalMode,
    ) -> Result<Self> {
        if !(center_frequency.is_finite() && center_frequency > 0.0) {
            return Err(UcheckinError::InvalidParameter(format!(
                "center frequency must be a positive number of Hz (got {center_frequency})"
            )));
        }
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return Err(UcheckinError::InvalidParameter(format!(
                "bandwidth must be a positive number of Hz (got {bandwidth})"
            )));
        }
        if symbol_duration < MIN_SYMBOL_SAMPLES {
            return Err(UcheckinError::InvalidParameter(format!(
                "symbol duration must be at least {MIN_SYMBOL_SAMPLES} samples (got {symbol_duration})"
            )));
        }
        if sample_rate == 0 {
            return Err(UcheckinError::InvalidParameter(
                "sample rate must be positive".to_string(),
            ));
        }

        let top = center_frequency + bandwidth / 2.0;
        let nyquist = sample_rate as f64 / 2.0;
        if top >= nyquist {
            warn!(
                "chirp band reaches {:.0} Hz, above the {:.0} Hz Nyquist limit; output will alias",
                top, nyquist
            );
        }

        Ok(Self {
            center_frequency,
            bandwidth,
            symbol_duration,
            sample_rate,
            mode,
        })
    }

    pub fn center_frequency(&self) -> f64 {
        self.center_frequency
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn symbol_duration(&self) -> usize {
        self.symbol_duration
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn mode(&self) -> SignalMode {
        self.mode
    }
}

impl Default for SignalParameters {
    fn default() -> Self {
        Self {
            center_frequency: DEFAULT_CENTER_FREQUENCY,
            bandwidth: DEFAULT_BANDWIDTH,
            symbol_duration: DEFAULT_SYMBOL_SAMPLES,
            sample_rate: DEFAULT_SAMPLE_RATE,
            mode: SignalMode::UCheckIn,
        }
    }
}
