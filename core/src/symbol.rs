use crate::error::{Result, UcheckinError};
use crate::BITS_PER_SYMBOL;

/// Symbol patterns for digits in the first half of the message
const LEFT_TABLE: [u8; 16] = [
    0b1100, 0b1110, 0b0001, 0b0011, 0b0101, 0b0111, 0b1001, 0b1011, //
    0b1101, 0b1111, 0b0000, 0b0010, 0b0100, 0b0110, 0b1000, 0b1010,
];

/// Symbol patterns for digits in the second half of the message
const RIGHT_TABLE: [u8; 16] = [
    0b0001, 0b0011, 0b0110, 0b1000, 0b1010, 0b1100, 0b1110, 0b0000, //
    0b0010, 0b0100, 0b0101, 0b0111, 0b1001, 0b1011, 0b1101, 0b1111,
];

/// Index of the first digit that switches to the right-hand table
///
/// Odd lengths put the middle digit on the left; even lengths put one
/// digit more than half on the left.
pub fn table_split(size: usize) -> usize {
    if size & 1 == 1 {
        (size + 1) / 2
    } else {
        (size + 2) / 2
    }
}

/// Expand a 4-bit pattern into bits, most significant first
fn pattern_bits(pattern: u8) -> [u8; BITS_PER_SYMBOL] {
    [
        (pattern >> 3) & 1,
        (pattern >> 2) & 1,
        (pattern >> 1) & 1,
        pattern & 1,
    ]
}

/// Map every hex digit of `message` to its 4-bit symbol
///
/// Returns a sequence of 0/1 values of length `4 * message.len()`.
pub fn encode_message(message: &str) -> Result<Vec<u8>> {
    let size = message.chars().count();
    let lim = table_split(size);

    let mut bits = Vec::with_capacity(BITS_PER_SYMBOL * size);
    for (i, c) in message.chars().enumerate() {
        let index = c.to_digit(16).ok_or_else(|| {
            UcheckinError::InvalidMessage(format!(
                "'{c}' at position {i} is not a hexadecimal digit"
            ))
        })? as usize;

        let pattern = if i < lim {
            LEFT_TABLE[index]
        } else {
            RIGHT_TABLE[index]
        };
        bits.extend_from_slice(&pattern_bits(pattern));
    }

    Ok(bits)
}
