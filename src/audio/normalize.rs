use std::io::Cursor;
use std::process::Command;

use hound::{SampleFormat, WavReader};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::{Result, VaaniError};

/// Convert an uploaded audio stream to the canonical mono/16kHz/16-bit PCM
/// WAV representation.
///
/// A stream declared as `wav` that actually parses as 16-bit integer PCM is
/// passed through unchanged. Everything else is decoded by FFmpeg, which
/// sniffs the true content; the declared extension is only a temp-file
/// suffix hint, so a lying extension still decodes or fails loudly.
pub async fn normalize(audio: &[u8], declared_extension: &str) -> Result<Vec<u8>> {
    let ext = declared_extension
        .trim()
        .trim_start_matches('.')
        .to_ascii_lowercase();

    if ext == "wav" && is_pcm16_wav(audio) {
        debug!("Declared WAV verified by content sniff, passing through");
        return Ok(audio.to_vec());
    }

    check_ffmpeg_for_normalize()?;

    let temp_dir = TempDir::new().map_err(|e| {
        VaaniError::Normalization(format!("Failed to create temp directory: {e}"))
    })?;

    let suffix = if ext.is_empty() { "bin".to_string() } else { ext };
    let input_path = temp_dir.path().join(format!("input.{suffix}"));
    let output_path = temp_dir.path().join("normalized.wav");

    std::fs::write(&input_path, audio)
        .map_err(|e| VaaniError::Normalization(format!("Failed to stage audio upload: {e}")))?;

    info!(
        "Normalizing {} byte '{}' upload to mono/16kHz PCM",
        audio.len(),
        suffix
    );

    let output = Command::new("ffmpeg")
        .args(["-y", "-i"])
        .arg(&input_path)
        .args(["-vn", "-acodec", "pcm_s16le", "-ar", "16000", "-ac", "1"])
        .arg(&output_path)
        .output()
        .map_err(|e| VaaniError::Normalization(format!("Failed to run FFmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VaaniError::Normalization(format!(
            "FFmpeg could not decode the audio stream: {}",
            stderr.trim()
        )));
    }

    let wav = std::fs::read(&output_path).map_err(|e| {
        VaaniError::Normalization(format!("Normalized audio was not readable: {e}"))
    })?;

    Ok(wav)
}

/// Content sniff: does the stream parse as a 16-bit integer PCM WAV?
fn is_pcm16_wav(audio: &[u8]) -> bool {
    match WavReader::new(Cursor::new(audio)) {
        Ok(reader) => {
            let spec = reader.spec();
            spec.sample_format == SampleFormat::Int && spec.bits_per_sample == 16
        }
        Err(_) => false,
    }
}

fn check_ffmpeg_for_normalize() -> Result<()> {
    super::extract::check_ffmpeg()
        .map_err(|e| VaaniError::Normalization(e.to_string()))
}
