use log::info;

use crate::error::{Result, UcheckinError};
use crate::{
    DEFAULT_INTERVAL_MS, DEFAULT_REPEAT, DEFAULT_VOLUME, MAX_DURATION_SECS, MAX_RENDER_SAMPLES,
    PCM_FULL_SCALE,
};

/// How an assembled signal is turned into a PCM file body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Silence between two transmissions, in milliseconds
    pub interval_ms: u32,
    /// Number of transmissions (at least 1)
    pub repeat: usize,
    /// Output gain in [0, 1]
    pub volume: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            repeat: DEFAULT_REPEAT,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<()> {
        if self.repeat < 1 {
            return Err(UcheckinError::InvalidRepeat(self.repeat));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(UcheckinError::InvalidVolume(self.volume));
        }
        Ok(())
    }
}

/// Final 16-bit mono PCM buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAudio {
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

impl RenderedAudio {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Silence between transmissions in samples
pub fn gap_samples(interval_ms: u32, sample_rate: u32) -> usize {
    (interval_ms as f64 / 1000.0 * sample_rate as f64).round() as usize
}

/// Number of whole transmissions (signal + gap) fitting in `duration_secs`
///
/// `duration_secs` must lie in `[0, MAX_DURATION_SECS]`.
pub fn repeats_to_fill(
    duration_secs: f64,
    signal_len: usize,
    interval_ms: u32,
    sample_rate: u32,
) -> Result<usize> {
    if !(0.0..=MAX_DURATION_SECS).contains(&duration_secs) {
        return Err(UcheckinError::InvalidDuration(duration_secs));
    }
    let cycle = signal_len + gap_samples(interval_ms, sample_rate);
    if cycle == 0 || sample_rate == 0 {
        return Ok(0);
    }
    let cycle_secs = cycle as f64 / sample_rate as f64;
    Ok((duration_secs / cycle_secs).floor() as usize)
}

/// Repeat, peak-normalize, apply volume and quantize to 16 bits
pub fn render(signal: &[f64], sample_rate: u32, settings: &RenderSettings) -> Result<RenderedAudio> {
    settings.validate()?;

    let peak = signal.iter().fold(0.0f64, |acc, &x| acc.max(x.abs()));
    if !(peak > 0.0) {
        return Err(UcheckinError::DegenerateSignal);
    }

    let gap = gap_samples(settings.interval_ms, sample_rate);
    let stride = signal.len() + gap;
    let total = stride
        .checked_mul(settings.repeat)
        .filter(|&total| total <= MAX_RENDER_SAMPLES)
        .ok_or_else(|| {
            UcheckinError::InvalidParameter(format!(
                "{} repetitions of {} samples exceed {} samples",
                settings.repeat, stride, MAX_RENDER_SAMPLES
            ))
        })?;

    let scaled: Vec<i16> = signal
        .iter()
        .map(|&x| (x * settings.volume / peak * PCM_FULL_SCALE).round() as i16)
        .collect();

    let mut samples = vec![0i16; total];
    for chunk in samples.chunks_exact_mut(stride) {
        chunk[..scaled.len()].copy_from_slice(&scaled);
    }

    info!(
        "rendered {} x ({} + {} gap) = {} samples at {} Hz",
        settings.repeat,
        signal.len(),
        gap,
        total,
        sample_rate
    );

    Ok(RenderedAudio {
        sample_rate,
        samples,
    })
}
