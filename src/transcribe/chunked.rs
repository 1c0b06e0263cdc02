use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::audio::window::{plan_windows, PcmAudio};
use crate::error::{Result, VaaniError};

use super::{Recognizer, SpeechLanguage, WindowClip, WindowOutcome};

/// Stop processing further windows once the accumulated transcript passes
/// this many characters.
const MAX_TRANSCRIPT_CHARS: usize = 5_000;

/// Transcribes long audio by splitting it into overlapping windows and
/// feeding each window to the recognition backend independently.
///
/// A single window's failure never aborts the run; adjacent windows overlap
/// and duplicated words at the boundaries are an accepted tradeoff of the
/// windowing, not deduplicated.
pub struct ChunkedTranscriber {
    recognizer: Arc<dyn Recognizer>,
}

impl ChunkedTranscriber {
    pub fn new(recognizer: Box<dyn Recognizer>) -> Self {
        Self {
            recognizer: Arc::from(recognizer),
        }
    }

    /// Transcribe a WAV byte stream. Returns the joined transcript, or
    /// `NoSpeech` when no window produced any text.
    pub async fn transcribe(&self, wav: &[u8], language: SpeechLanguage) -> Result<String> {
        let audio = PcmAudio::parse(wav)?;
        let duration_ms = audio.duration_ms();
        let windows = plan_windows(duration_ms);

        info!(
            "Transcribing {:.1}s of audio in {} windows with {}",
            duration_ms as f64 / 1000.0,
            windows.len(),
            self.recognizer.name()
        );

        let mut segments: Vec<String> = Vec::new();
        let mut accumulated_chars = 0usize;

        for window in windows {
            let window_samples = audio.window_samples(window);
            let (noise_rms, clip_samples) = audio.calibrate(window_samples);

            if clip_samples.is_empty() {
                debug!(
                    "Window [{}ms..{}ms]: shorter than calibration pass, no speech",
                    window.start_ms, window.end_ms
                );
                continue;
            }

            let clip = WindowClip {
                wav: audio.encode_clip(clip_samples)?,
                window,
                noise_rms,
            };

            match self.recognizer.recognize(&clip, language).await {
                WindowOutcome::Recognized(text) => {
                    debug!(
                        "Window [{}ms..{}ms]: {} characters",
                        window.start_ms,
                        window.end_ms,
                        text.chars().count()
                    );
                    accumulated_chars += text.chars().count() + 1;
                    segments.push(text);
                }
                WindowOutcome::NoSpeech => {
                    debug!(
                        "Window [{}ms..{}ms]: could not understand audio",
                        window.start_ms, window.end_ms
                    );
                }
                WindowOutcome::BackendError(reason) => {
                    warn!(
                        "Window [{}ms..{}ms]: recognition backend error: {}",
                        window.start_ms, window.end_ms, reason
                    );
                }
            }

            if accumulated_chars > MAX_TRANSCRIPT_CHARS {
                info!(
                    "Transcript reached {} characters, stopping early",
                    accumulated_chars
                );
                break;
            }
        }

        let transcript = segments.join(" ").trim().to_string();
        info!("Total transcribed text: {} characters", transcript.chars().count());

        if transcript.is_empty() {
            return Err(VaaniError::NoSpeech);
        }

        Ok(transcript)
    }
}
