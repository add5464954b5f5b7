use std::f64::consts::PI;

use log::debug;

use crate::error::{Result, UcheckinError};
use crate::params::SignalParameters;
use crate::{SYNC_CHIRP_FACTOR, TUKEY_ALPHA};

/// The three elementary waveforms a signal is built from
#[derive(Debug, Clone)]
pub struct ChirpSet {
    /// Long up-chirp preamble (`SYNC_CHIRP_FACTOR` symbols long)
    pub sync: Vec<f64>,
    /// Up-chirp, transmitted for bit 1
    pub up: Vec<f64>,
    /// Down-chirp, transmitted for bit 0
    pub down: Vec<f64>,
}

/// Generates Tukey-windowed linear chirps around a center frequency
#[derive(Debug, Clone)]
pub struct ChirpSynthesizer {
    /// Carrier phase step per sample (radians)
    wc: f64,
    /// Sweep width per sample (radians)
    b_rad: f64,
    symbol_duration: usize,
}

impl ChirpSynthesizer {
    pub fn new(params: &SignalParameters) -> Self {
        let fe = params.sample_rate() as f64;
        Self {
            wc: params.center_frequency() * 2.0 * PI / fe,
            b_rad: params.bandwidth() * 2.0 * PI / fe,
            symbol_duration: params.symbol_duration(),
        }
    }

    /// Generate one chirp of `duration` samples, normalized to a peak of 1.0
    ///
    /// Sample `i` is taken at the phase accumulated over steps `0..i`, so the
    /// first sample is always `sin(0)`.
    pub fn synthesize(&self, is_up: bool, duration: usize) -> Result<Vec<f64>> {
        let slope = if is_up { 1.0 } else { -1.0 };
        let t = duration as f64;

        let mut chirp = vec![0.0; duration];
        let mut phase = 0.0f64;
        for (i, sample) in chirp.iter_mut().enumerate() {
            *sample = phase.sin();
            phase += slope * self.b_rad / t * (i as f64 + 0.5 * (1.0 - t)) + self.wc;
        }

        let window = tukey_window(duration, TUKEY_ALPHA);
        for (sample, w) in chirp.iter_mut().zip(window.iter()) {
            *sample *= w;
        }

        let peak = chirp.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !(peak > 0.0) {
            return Err(UcheckinError::DegenerateChirp(duration));
        }
        debug!(
            "chirp: {} {} samples, pre-normalization peak {:.6}",
            if is_up { "up" } else { "down" },
            duration,
            peak
        );

        for sample in chirp.iter_mut() {
            *sample /= peak;
        }
        Ok(chirp)
    }

    /// Build the sync chirp and both data chirps
    pub fn synthesize_set(&self) -> Result<ChirpSet> {
        Ok(ChirpSet {
            sync: self.synthesize(true, SYNC_CHIRP_FACTOR * self.symbol_duration)?,
            up: self.synthesize(true, self.symbol_duration)?,
            down: self.synthesize(false, self.symbol_duration)?,
        })
    }
}

/// Tukey window: Hann-tapered edges around a flat middle
///
/// A Hann window of length `di = ceil(nb_samples * alpha)` is split in two;
/// the first `ceil(di / 2)` samples of it form the rising edge and the last
/// `ceil(di / 2)` the falling edge.
pub fn tukey_window(nb_samples: usize, alpha: f64) -> Vec<f64> {
    let di = (nb_samples as f64 * alpha).ceil() as usize;
    if di < 2 {
        return vec![1.0; nb_samples];
    }

    let hann: Vec<f64> = (0..di)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / (di - 1) as f64).cos()))
        .collect();

    let lim = di.div_ceil(2);
    let mut window = vec![1.0; nb_samples];
    window[..lim].copy_from_slice(&hann[..lim]);
    window[nb_samples - lim..].copy_from_slice(&hann[di - lim..]);
    window
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_tukey_window_shape() {
        let window = tukey_window(8, 0.5);
        let expected = [0.0, 0.75, 1.0, 1.0, 1.0, 1.0, 0.75, 0.0];
        for (w, e) in window.iter().zip(expected.iter()) {
            assert!(approx_eq(*w, *e, 1e-12), "{:?}", window);
        }

        let window = tukey_window(10, 0.5);
        let expected = [0.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 0.0];
        for (w, e) in window.iter().zip(expected.iter()) {
            assert!(approx_eq(*w, *e, 1e-12), "{:?}", window);
        }
    }

    #[test]
    fn test_tukey_window_short() {
        assert_eq!(tukey_window(2, 0.5), vec![1.0, 1.0]);
        assert_eq!(tukey_window(0, 0.5), Vec::<f64>::new());
        assert_eq!(tukey_window(3, 0.5).len(), 3);
    }

    #[test]
    fn test_chirp_reference_values() {
        let synth = ChirpSynthesizer::new(&SignalParameters::default());

        let up = synth.synthesize(true, 1024).unwrap();
        assert_eq!(up.len(), 1024);
        assert!(approx_eq(up[300], -0.8625092247470503, 1e-9));
        assert!(approx_eq(up[512], 0.8661110284988848, 1e-9));

        let down = synth.synthesize(false, 1024).unwrap();
        assert!(approx_eq(down[300], 0.5061907491063111, 1e-9));
        assert!(approx_eq(down[512], -0.8660324248338794, 1e-9));
    }

    #[test]
    fn test_chirp_peak_and_edges() {
        let synth = ChirpSynthesizer::new(&SignalParameters::default());
        for (is_up, duration) in [(true, 1024), (false, 1024), (true, 4096)] {
            let chirp = synth.synthesize(is_up, duration).unwrap();
            let peak = chirp.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(peak, 1.0);
            assert!(chirp.iter().all(|s| s.abs() < 1.0 + 1e-3));
            assert!(chirp[0].abs() < 1.0);
            assert!(chirp[duration - 1].abs() < 1.0);
        }
    }

    #[test]
    fn test_chirp_set_lengths() {
        let params = SignalParameters::default();
        let set = ChirpSynthesizer::new(&params).synthesize_set().unwrap();
        assert_eq!(set.sync.len(), 4096);
        assert_eq!(set.up.len(), 1024);
        assert_eq!(set.down.len(), 1024);
        assert_ne!(set.up, set.down);
    }

    #[test]
    fn test_degenerate_chirp() {
        let synth = ChirpSynthesizer::new(&SignalParameters::default());
        // A single windowed sample is sin(0) = 0
        assert_eq!(
            synth.synthesize(true, 1),
            Err(UcheckinError::DegenerateChirp(1))
        );
        assert_eq!(
            synth.synthesize(true, 0),
            Err(UcheckinError::DegenerateChirp(0))
        );
    }
}
