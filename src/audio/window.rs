use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{Result, VaaniError};

use super::AudioWindow;

/// Window duration fed to the recognition backend.
pub const WINDOW_MS: u64 = 30_000;

/// Overlap between consecutive windows.
pub const OVERLAP_MS: u64 = 5_000;

/// Leading slice of each window consumed by ambient-noise calibration.
pub const CALIBRATION_MS: u64 = 500;

/// Partition a stream of the given duration into fixed windows with
/// overlap. A stream shorter than one window yields exactly one window
/// spanning the whole stream; the final window is clipped, never padded.
pub fn plan_windows(duration_ms: u64) -> Vec<AudioWindow> {
    let stride = WINDOW_MS - OVERLAP_MS;
    let mut windows = Vec::new();
    let mut start_ms = 0;

    while start_ms < duration_ms {
        let end_ms = (start_ms + WINDOW_MS).min(duration_ms);
        windows.push(AudioWindow { start_ms, end_ms });
        start_ms += stride;
    }

    windows
}

/// Decoded 16-bit PCM audio held in memory for windowed processing.
///
/// Samples are interleaved when the stream has more than one channel.
#[derive(Debug, Clone)]
pub struct PcmAudio {
    spec: WavSpec,
    samples: Vec<i16>,
}

impl PcmAudio {
    /// Parse a WAV byte stream. Only 16-bit integer PCM is accepted; the
    /// normalizer is responsible for producing that form.
    pub fn parse(wav: &[u8]) -> Result<Self> {
        let mut reader = WavReader::new(Cursor::new(wav))
            .map_err(|e| VaaniError::Normalization(format!("Failed to parse WAV stream: {e}")))?;

        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(VaaniError::Normalization(format!(
                "Unsupported WAV sample format: {:?} {}-bit",
                spec.sample_format, spec.bits_per_sample
            )));
        }

        let samples = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<i16>, _>>()
            .map_err(|e| VaaniError::Normalization(format!("Failed to read WAV samples: {e}")))?;

        Ok(Self { spec, samples })
    }

    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    fn frames(&self) -> usize {
        self.samples.len() / self.spec.channels as usize
    }

    pub fn duration_ms(&self) -> u64 {
        self.frames() as u64 * 1000 / self.spec.sample_rate as u64
    }

    fn frame_at(&self, ms: u64) -> usize {
        let frame = ms * self.spec.sample_rate as u64 / 1000;
        (frame as usize).min(self.frames())
    }

    /// Interleaved samples covering the given window.
    pub fn window_samples(&self, window: AudioWindow) -> &[i16] {
        let channels = self.spec.channels as usize;
        let start = self.frame_at(window.start_ms) * channels;
        let end = self.frame_at(window.end_ms) * channels;
        &self.samples[start..end]
    }

    /// Split a window's samples into the calibration pass and the clip the
    /// recognizer sees. Returns the RMS noise floor measured over the first
    /// `CALIBRATION_MS` and the remaining samples; a window shorter than
    /// the calibration pass yields an empty clip.
    pub fn calibrate<'a>(&self, window_samples: &'a [i16]) -> (f32, &'a [i16]) {
        let channels = self.spec.channels as usize;
        let cal_frames = (CALIBRATION_MS * self.spec.sample_rate as u64 / 1000) as usize;
        let cal_len = (cal_frames * channels).min(window_samples.len());

        let (calibration, clip) = window_samples.split_at(cal_len);
        (rms(calibration), clip)
    }

    /// Re-encode a sample slice as a standalone WAV byte stream with the
    /// source's spec.
    pub fn encode_clip(&self, samples: &[i16]) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, self.spec)
                .map_err(|e| VaaniError::Normalization(format!("Failed to encode clip: {e}")))?;
            for &sample in samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| VaaniError::Normalization(format!("Failed to encode clip: {e}")))?;
            }
            writer
                .finalize()
                .map_err(|e| VaaniError::Normalization(format!("Failed to encode clip: {e}")))?;
        }
        Ok(cursor.into_inner())
    }
}

fn rms(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_squares / samples.len() as f64).sqrt() as f32
}
