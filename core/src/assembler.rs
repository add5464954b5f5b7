use log::debug;

use crate::chirp::ChirpSet;
use crate::error::{Result, UcheckinError};
use crate::SYNC_CHIRP_FACTOR;

/// One complete transmission: silence, sync chirp, then one chirp per bit
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledSignal {
    samples: Vec<f64>,
    symbol_count: usize,
}

impl AssembledSignal {
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of data chirps following the sync chirp
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

/// Number of samples consecutive data chirps share
pub fn overlap_samples(symbol_duration: usize, overlap_fraction: f64) -> Result<usize> {
    if !(0.0..1.0).contains(&overlap_fraction) {
        return Err(UcheckinError::InvalidParameter(format!(
            "overlap must be in [0, 1) (got {overlap_fraction})"
        )));
    }
    let overlap = (symbol_duration as f64 * overlap_fraction).round() as usize;
    if symbol_duration > 0 && overlap >= symbol_duration {
        return Err(UcheckinError::InvalidParameter(format!(
            "overlap {overlap_fraction} rounds to a whole {symbol_duration}-sample chirp"
        )));
    }
    Ok(overlap)
}

/// Closed-form buffer length for `symbol_count` data chirps
pub fn assembled_len(symbol_duration: usize, symbol_count: usize, overlap: usize) -> usize {
    let leading = symbol_duration + SYNC_CHIRP_FACTOR * symbol_duration;
    let message = symbol_count * symbol_duration;
    leading + message - overlap * symbol_count.saturating_sub(1)
}

/// Lay out `bits` as chirps behind a leading silence and the sync chirp
///
/// Overlapping chirps are summed, not overwritten.
pub fn assemble(
    bits: &[u8],
    chirps: &ChirpSet,
    symbol_duration: usize,
    overlap_fraction: f64,
) -> Result<AssembledSignal> {
    if chirps.up.len() != symbol_duration || chirps.down.len() != symbol_duration {
        return Err(UcheckinError::InvalidParameter(format!(
            "data chirps must last {symbol_duration} samples"
        )));
    }
    if chirps.sync.len() != SYNC_CHIRP_FACTOR * symbol_duration {
        return Err(UcheckinError::InvalidParameter(format!(
            "sync chirp must last {} samples",
            SYNC_CHIRP_FACTOR * symbol_duration
        )));
    }

    let overlap = overlap_samples(symbol_duration, overlap_fraction)?;
    let size = assembled_len(symbol_duration, bits.len(), overlap);
    let mut samples = vec![0.0; size];

    let mut cursor = symbol_duration + chirps.sync.len();
    samples[symbol_duration..cursor].copy_from_slice(&chirps.sync);

    for &bit in bits {
        let chirp = if bit == 1 { &chirps.up } else { &chirps.down };
        for (dst, &src) in samples[cursor..cursor + symbol_duration]
            .iter_mut()
            .zip(chirp.iter())
        {
            *dst += src;
        }
        cursor += symbol_duration - overlap;
    }

    debug!(
        "assembled {} symbols into {} samples (overlap {})",
        bits.len(),
        size,
        overlap
    );

    Ok(AssembledSignal {
        samples,
        symbol_count: bits.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_chirps(symbol_duration: usize) -> ChirpSet {
        ChirpSet {
            sync: vec![0.5; SYNC_CHIRP_FACTOR * symbol_duration],
            up: vec![1.0; symbol_duration],
            down: vec![-1.0; symbol_duration],
        }
    }

    #[test]
    fn test_length_without_overlap() {
        let chirps = test_chirps(16);
        let signal = assemble(&[1, 0, 1], &chirps, 16, 0.0).unwrap();
        assert_eq!(signal.len(), 16 + 64 + 3 * 16);
        assert_eq!(signal.len(), assembled_len(16, 3, 0));
        assert_eq!(signal.symbol_count(), 3);
    }

    #[test]
    fn test_layout() {
        let chirps = test_chirps(4);
        let signal = assemble(&[1, 0], &chirps, 4, 0.0).unwrap();
        let s = signal.samples();
        assert!(s[..4].iter().all(|&x| x == 0.0));
        assert!(s[4..20].iter().all(|&x| x == 0.5));
        assert!(s[20..24].iter().all(|&x| x == 1.0));
        assert!(s[24..28].iter().all(|&x| x == -1.0));
    }

    #[test]
    fn test_overlap_accumulates() {
        let chirps = test_chirps(4);
        // 4 * 0.5 = 2 shared samples between neighbours
        let signal = assemble(&[1, 1, 0], &chirps, 4, 0.5).unwrap();
        assert_eq!(signal.len(), assembled_len(4, 3, 2));
        assert_eq!(signal.len(), 4 + 16 + 12 - 4);

        let s = &signal.samples()[20..];
        assert_eq!(s, &[1.0, 1.0, 2.0, 2.0, 0.0, 0.0, -1.0, -1.0]);
    }

    #[test]
    fn test_invalid_overlap() {
        let chirps = test_chirps(4);
        for overlap in [-0.1, 1.0, f64::NAN] {
            assert!(matches!(
                assemble(&[1], &chirps, 4, overlap),
                Err(UcheckinError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_overlap_rounding_to_full_chirp() {
        assert!(overlap_samples(4, 0.875).is_err());
        assert!(overlap_samples(1024, 0.9996).is_err());
        assert_eq!(overlap_samples(4, 0.8), Ok(3));
        assert_eq!(overlap_samples(1024, 0.999), Ok(1023));

        let chirps = test_chirps(4);
        assert!(matches!(
            assemble(&[1, 0, 1], &chirps, 4, 0.875),
            Err(UcheckinError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_mismatched_chirps() {
        let chirps = test_chirps(4);
        assert!(assemble(&[1], &chirps, 8, 0.0).is_err());
    }
}
