use log::debug;

use crate::CHUNK_PARITY_STRIDES;

/// Coded bit sequence: Hamming block followed by the chunk parities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedSequence {
    bits: Vec<u8>,
    parity_bits: usize,
}

/// A parity relation that no longer holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityCheck {
    /// Hamming parity stored at 1-indexed position `2^i`
    Hamming(usize),
    /// Chunk parity computed with the given stride
    Chunk(usize),
}

/// Smallest `r` such that `2^r >= m + r + 1`
pub fn parity_bit_count(m: usize) -> usize {
    (0..usize::BITS as usize)
        .find(|&r| (1usize << r) >= m + r + 1)
        .unwrap_or(usize::BITS as usize - 1)
}

/// Encode data bits with extended Hamming parity
///
/// Parity bits occupy the power-of-two positions (1-indexed) of a block of
/// length `m + r`. One overall parity per entry of `CHUNK_PARITY_STRIDES`
/// is then appended, each taken over the Hamming block only.
pub fn encode(data: &[u8]) -> CodedSequence {
    let m = data.len();
    let r = parity_bit_count(m);
    let n = m + r;

    let mut res = Vec::with_capacity(n + CHUNK_PARITY_STRIDES.len());
    let mut data_iter = data.iter();
    for position in 1..=n {
        if position.is_power_of_two() {
            res.push(0);
        } else if let Some(&bit) = data_iter.next() {
            res.push(bit);
        }
    }

    // Each parity covers its own (still zero) slot as well
    for i in 0..r {
        let mask = 1usize << i;
        res[mask - 1] = coverage_xor(&res, mask);
    }

    for &stride in CHUNK_PARITY_STRIDES.iter() {
        let val = stride_xor(&res[..n], stride);
        res.push(val);
    }

    let parity_bits = r + CHUNK_PARITY_STRIDES.len();
    debug!(
        "hamming: {} data bits -> {} coded bits ({} parity)",
        m,
        res.len(),
        parity_bits
    );

    CodedSequence {
        bits: res,
        parity_bits,
    }
}

fn coverage_xor(block: &[u8], mask: usize) -> u8 {
    block
        .iter()
        .enumerate()
        .filter(|(j, _)| (j + 1) & mask == mask)
        .fold(0, |acc, (_, &bit)| acc ^ bit)
}

fn stride_xor(block: &[u8], stride: usize) -> u8 {
    block.iter().step_by(stride).fold(0, |acc, &bit| acc ^ bit)
}

impl CodedSequence {
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Total number of parity bits (Hamming + chunk parities)
    pub fn parity_bits(&self) -> usize {
        self.parity_bits
    }

    pub fn data_bits(&self) -> usize {
        self.bits.len() - self.parity_bits
    }

    /// Re-evaluate every parity relation and list the ones that fail
    pub fn failed_checks(&self) -> Vec<ParityCheck> {
        failed_checks(&self.bits)
    }
}

/// Check a received coded sequence (Hamming block then chunk parities)
///
/// A Hamming check holds when its whole coverage set, parity included,
/// XORs to zero. There is no correction step.
pub fn failed_checks(bits: &[u8]) -> Vec<ParityCheck> {
    let n = bits.len().saturating_sub(CHUNK_PARITY_STRIDES.len());
    let block = &bits[..n];
    // Parity bits sit at every power-of-two position of the block
    let r = (1..=n).filter(|p| p.is_power_of_two()).count();

    let mut failed = Vec::new();
    for i in 0..r {
        if coverage_xor(block, 1 << i) != 0 {
            failed.push(ParityCheck::Hamming(i));
        }
    }
    for (k, &stride) in CHUNK_PARITY_STRIDES.iter().enumerate() {
        if bits.get(n + k) != Some(&stride_xor(block, stride)) {
            failed.push(ParityCheck::Chunk(stride));
        }
    }
    failed
}
