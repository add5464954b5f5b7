use thiserror::Error;
use ucheckin_core::UcheckinError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Signal(#[from] UcheckinError),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
