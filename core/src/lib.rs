//! Acoustic check-in signal generator
//!
//! Encodes a 5-digit hexadecimal code into a near-ultrasonic chirp signal:
//! positional symbol tables, extended Hamming parity, up/down chirps behind a
//! long synchronization chirp, then 16-bit PCM rendering.

pub mod error;
pub mod params;
pub mod symbol;
pub mod hamming;
pub mod chirp;
pub mod assembler;
pub mod renderer;
pub mod encoder;

pub use assembler::AssembledSignal;
pub use chirp::{ChirpSet, ChirpSynthesizer};
pub use encoder::SignalEncoder;
pub use error::{UcheckinError, Result};
pub use hamming::CodedSequence;
pub use params::{SignalMode, SignalParameters};
pub use renderer::{RenderSettings, RenderedAudio};

// Signal defaults
pub const DEFAULT_CENTER_FREQUENCY: f64 = 19_500.0; // Hz
pub const DEFAULT_BANDWIDTH: f64 = 1_000.0; // Hz
pub const DEFAULT_SYMBOL_SAMPLES: usize = 1024;
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000; // Hz
pub const MIN_SYMBOL_SAMPLES: usize = 4;

// Rendering defaults
pub const DEFAULT_INTERVAL_MS: u32 = 500;
pub const DEFAULT_REPEAT: usize = 10;
pub const DEFAULT_VOLUME: f64 = 0.8;
pub const MAX_DURATION_SECS: f64 = 300.0;
/// A 16-bit WAV data chunk holds at most `u32::MAX` bytes
pub const MAX_RENDER_SAMPLES: usize = (u32::MAX / 2) as usize;

// Message layout
pub const BITS_PER_SYMBOL: usize = 4;
pub const CHARS_PER_MESSAGE: usize = 5;
pub const USEFUL_BITS: usize = BITS_PER_SYMBOL * CHARS_PER_MESSAGE; // 20

// Waveform shaping
pub const SYNC_CHIRP_FACTOR: usize = 4; // sync chirp lasts 4 symbols
pub const TUKEY_ALPHA: f64 = 0.5;
pub const PCM_FULL_SCALE: f64 = 32767.0;

/// Strides of the overall-parity bits appended after the Hamming block
pub const CHUNK_PARITY_STRIDES: [usize; 2] = [4, 8];
