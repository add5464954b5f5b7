use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use ucheckin_core::RenderedAudio;

use crate::error::CliError;

/// Mono 16-bit PCM at the rendered sample rate
pub fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn write_samples<W: Write + Seek>(writer: W, audio: &RenderedAudio) -> Result<(), hound::Error> {
    let mut writer = WavWriter::new(writer, wav_spec(audio.sample_rate))?;
    for &sample in &audio.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

/// Write `audio` to `path`
///
/// The file is written next to its destination and renamed into place once
/// complete, so a failed write never leaves a truncated WAV behind.
pub fn write_wav(path: &Path, audio: &RenderedAudio) -> Result<(), CliError> {
    let partial = partial_path(path);
    let result = fs::File::create(&partial)
        .map_err(CliError::from)
        .and_then(|file| {
            write_samples(std::io::BufWriter::new(file), audio).map_err(CliError::from)
        })
        .and_then(|()| fs::rename(&partial, path).map_err(CliError::from));

    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }
    result
}

/// Encode `audio` as an in-memory WAV file
pub fn wav_bytes(audio: &RenderedAudio) -> Result<Vec<u8>, CliError> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + audio.samples.len() * 2));
    write_samples(&mut cursor, audio)?;
    Ok(cursor.into_inner())
}
