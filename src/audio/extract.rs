use std::process::Command;

use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::{Result, VaaniError};

/// Check if FFmpeg is installed and accessible.
pub fn check_ffmpeg() -> Result<()> {
    let output = Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map_err(|e| {
            VaaniError::AudioExtraction(format!(
                "FFmpeg not found. Please install FFmpeg and ensure it's in your PATH. Error: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(VaaniError::AudioExtraction(
            "FFmpeg check failed".to_string(),
        ));
    }

    debug!("FFmpeg is available");
    Ok(())
}

/// Extract the audio track from an uploaded video and convert it to WAV.
///
/// The output is mono 16-bit PCM at 16kHz, which is optimal for speech
/// recognition. Input and intermediate files live in a scoped temp
/// directory that is removed on every exit path.
pub async fn extract_audio(video: &[u8]) -> Result<Vec<u8>> {
    check_ffmpeg()?;

    let temp_dir = TempDir::new().map_err(|e| {
        VaaniError::AudioExtraction(format!("Failed to create temp directory: {e}"))
    })?;

    let input_path = temp_dir.path().join("input.mp4");
    let output_path = temp_dir.path().join("audio.wav");

    std::fs::write(&input_path, video)
        .map_err(|e| VaaniError::AudioExtraction(format!("Failed to stage video upload: {e}")))?;

    info!("Extracting audio from {} byte video upload", video.len());

    let output = Command::new("ffmpeg")
        .args(["-y", "-i"])
        .arg(&input_path)
        .args(["-vn", "-acodec", "pcm_s16le", "-ar", "16000", "-ac", "1"])
        .arg(&output_path)
        .output()
        .map_err(|e| VaaniError::AudioExtraction(format!("Failed to run FFmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VaaniError::AudioExtraction(format!(
            "FFmpeg audio extraction failed: {}",
            stderr.trim()
        )));
    }

    let wav = std::fs::read(&output_path).map_err(|e| {
        VaaniError::AudioExtraction(format!("Extracted audio was not readable: {e}"))
    })?;

    debug!("Extracted {} bytes of WAV audio", wav.len());
    Ok(wav)
}
