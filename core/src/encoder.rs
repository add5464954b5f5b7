use log::debug;

use crate::assembler::{self, AssembledSignal};
use crate::chirp::{ChirpSet, ChirpSynthesizer};
use crate::error::{Result, UcheckinError};
use crate::hamming::{self, CodedSequence};
use crate::params::{SignalMode, SignalParameters};
use crate::renderer::{self, RenderSettings, RenderedAudio};
use crate::symbol;
use crate::CHARS_PER_MESSAGE;

/// Check-in signal encoder
///
/// Synthesizes the elementary chirps once; each message then only goes
/// through symbol mapping, parity coding, assembly and rendering.
#[derive(Debug)]
pub struct SignalEncoder {
    params: SignalParameters,
    chirps: ChirpSet,
    overlap_fraction: f64,
}

impl SignalEncoder {
    pub fn new(params: SignalParameters) -> Result<Self> {
        if params.mode() != SignalMode::UCheckIn {
            return Err(UcheckinError::ModeNotImplemented(params.mode()));
        }
        let chirps = ChirpSynthesizer::new(&params).synthesize_set()?;
        Ok(Self {
            params,
            chirps,
            overlap_fraction: 0.0,
        })
    }

    pub fn params(&self) -> &SignalParameters {
        &self.params
    }

    pub fn chirps(&self) -> &ChirpSet {
        &self.chirps
    }

    pub fn overlap(&self) -> f64 {
        self.overlap_fraction
    }

    /// Share a fraction of each data chirp with the next one (default 0)
    pub fn set_overlap(&mut self, fraction: f64) -> Result<()> {
        assembler::overlap_samples(self.params.symbol_duration(), fraction)?;
        self.overlap_fraction = fraction;
        Ok(())
    }

    /// Symbol mapping followed by parity coding
    pub fn encode_bits(&self, message: &str) -> Result<CodedSequence> {
        validate_message(message)?;
        let bits = symbol::encode_message(message)?;
        Ok(hamming::encode(&bits))
    }

    /// Build one transmission of `message`
    pub fn assemble(&self, message: &str) -> Result<AssembledSignal> {
        let coded = self.encode_bits(message)?;
        debug!("message {} -> {} coded bits", message, coded.len());
        assembler::assemble(
            coded.bits(),
            &self.chirps,
            self.params.symbol_duration(),
            self.overlap_fraction,
        )
    }

    /// Build the full PCM buffer for `message`
    pub fn render(&self, message: &str, settings: &RenderSettings) -> Result<RenderedAudio> {
        settings.validate()?;
        let signal = self.assemble(message)?;
        renderer::render(signal.samples(), self.params.sample_rate(), settings)
    }

    /// Repeat count that fills `duration_secs` with whole transmissions
    ///
    /// Only the signal length is needed, so nothing is assembled.
    pub fn repeats_to_fill(&self, message: &str, duration_secs: f64, interval_ms: u32) -> Result<usize> {
        let coded = self.encode_bits(message)?;
        let symbol_duration = self.params.symbol_duration();
        let overlap = assembler::overlap_samples(symbol_duration, self.overlap_fraction)?;
        renderer::repeats_to_fill(
            duration_secs,
            assembler::assembled_len(symbol_duration, coded.len(), overlap),
            interval_ms,
            self.params.sample_rate(),
        )
    }

    /// Name of the WAV file generated for `message`
    pub fn file_name(message: &str) -> String {
        format!("{message}.wav")
    }
}

/// Messages are exactly `CHARS_PER_MESSAGE` hexadecimal digits
pub fn validate_message(message: &str) -> Result<()> {
    let len = message.chars().count();
    if len != CHARS_PER_MESSAGE {
        return Err(UcheckinError::InvalidMessage(format!(
            "Signal {message} must have {CHARS_PER_MESSAGE} hex characters (got {len})"
        )));
    }
    if let Some(c) = message.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(UcheckinError::InvalidMessage(format!(
            "'{c}' is not a hexadecimal digit"
        )));
    }
    Ok(())
}
