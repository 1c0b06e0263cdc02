use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, VaaniError};

use super::{TextLanguage, TranslationBackend};

/// Texts at or below this many characters go to the backend in one call.
const SINGLE_CALL_MAX_CHARS: usize = 1_500;

/// A chunk is flushed once appending the next sentence would bring it to
/// this many characters.
const CHUNK_FLUSH_CHARS: usize = 1_000;

/// Translates arbitrarily long text by splitting it into sentence-aligned
/// chunks that fit the backend's practical limits, translating each chunk,
/// and reassembling the output in order.
pub struct Translator {
    backend: Arc<dyn TranslationBackend>,
}

impl Translator {
    pub fn new(backend: Box<dyn TranslationBackend>) -> Self {
        Self {
            backend: Arc::from(backend),
        }
    }

    /// Translate `text` from `src` to `dst`.
    ///
    /// Same-language jobs and empty text return the input unchanged with
    /// zero backend calls. Any backend failure fails the whole job; partial
    /// results are discarded, never returned.
    pub async fn translate(
        &self,
        text: &str,
        src: TextLanguage,
        dst: TextLanguage,
    ) -> Result<String> {
        if src == dst || text.is_empty() {
            return Ok(text.to_string());
        }

        debug!(
            "Translating {} -> {}, text length: {}",
            src,
            dst,
            text.chars().count()
        );

        if text.chars().count() <= SINGLE_CALL_MAX_CHARS {
            return self.call_backend(text, src, dst).await;
        }

        let mut translated_chunks: Vec<String> = Vec::new();
        let mut buffer = String::new();
        let mut buffer_chars = 0usize;

        for sentence in split_sentences(text) {
            let sentence_chars = sentence.chars().count();

            if buffer_chars + sentence_chars < CHUNK_FLUSH_CHARS {
                buffer.push_str(sentence);
                buffer.push_str(". ");
                buffer_chars += sentence_chars + 2;
            } else {
                if !buffer.is_empty() {
                    translated_chunks.push(self.call_backend(&buffer, src, dst).await?);
                }
                buffer = format!("{sentence}. ");
                buffer_chars = sentence_chars + 2;
            }
        }

        if !buffer.is_empty() {
            translated_chunks.push(self.call_backend(&buffer, src, dst).await?);
        }

        Ok(translated_chunks.join(" "))
    }

    async fn call_backend(
        &self,
        text: &str,
        src: TextLanguage,
        dst: TextLanguage,
    ) -> Result<String> {
        self.backend
            .translate_span(text, src, dst)
            .await
            .map_err(|e| VaaniError::Translation {
                src: src.code().to_string(),
                dst: dst.code().to_string(),
                reason: e.to_string(),
            })
    }
}

/// Split on sentence terminators, dropping the terminators and empty
/// fragments.
fn split_sentences(text: &str) -> Vec<&str> {
    let terminators = Regex::new(r"[.!?]+").expect("Invalid regex");
    terminators
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that tags each span so tests can see call boundaries.
    struct TaggingBackend {
        calls: AtomicUsize,
        fail: bool,
    }

    impl TaggingBackend {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl TranslationBackend for TaggingBackend {
        async fn translate_span(
            &self,
            text: &str,
            _src: TextLanguage,
            _dst: TextLanguage,
        ) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(VaaniError::Api("backend down".to_string()));
            }
            assert!(
                text.chars().count() < CHUNK_FLUSH_CHARS + 2
                    || text.chars().count() <= SINGLE_CALL_MAX_CHARS,
                "span exceeded chunk limits: {} chars",
                text.chars().count()
            );
            Ok(format!("[{call}]{}", text.trim()))
        }

        fn name(&self) -> &'static str {
            "Tagging"
        }
    }

    fn translator() -> Translator {
        Translator::new(Box::new(TaggingBackend::new()))
    }

    #[tokio::test]
    async fn test_same_language_is_noop() {
        let t = translator();
        let out = t
            .translate("anything at all", TextLanguage::English, TextLanguage::English)
            .await
            .unwrap();
        assert_eq!(out, "anything at all");
    }

    #[tokio::test]
    async fn test_empty_text_is_noop() {
        let t = translator();
        let out = t
            .translate("", TextLanguage::Hindi, TextLanguage::English)
            .await
            .unwrap();
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_short_text_single_call() {
        let t = translator();
        let out = t
            .translate("Hello there.", TextLanguage::English, TextLanguage::Bengali)
            .await
            .unwrap();
        // One backend call, tagged 0.
        assert_eq!(out, "[0]Hello there.");
    }

    #[tokio::test]
    async fn test_long_text_chunks_are_sentence_aligned() {
        // 40 sentences of ~60 chars each, ~2400 chars total: forces the
        // chunked path with multiple flushes.
        let sentence = "This sentence is exactly long enough to matter here";
        let text = (0..40).map(|_| sentence).collect::<Vec<_>>().join(". ");

        let t = translator();
        let out = t
            .translate(&text, TextLanguage::English, TextLanguage::Bengali)
            .await
            .unwrap();

        // More than one chunk was translated and reassembled with spaces.
        assert!(out.contains("[0]"));
        assert!(out.contains("[1]"));
        // No chunk split mid-sentence: every tag is followed by the start
        // of the sentence.
        for part in out.split(' ').filter(|p| p.starts_with('[')) {
            let after_tag = part.split(']').nth(1).unwrap_or("");
            assert!(sentence.starts_with(after_tag.split(' ').next().unwrap_or("")));
        }
    }

    #[tokio::test]
    async fn test_backend_failure_fails_whole_job() {
        let t = Translator::new(Box::new(TaggingBackend::failing()));
        let result = t
            .translate("Some text.", TextLanguage::Hindi, TextLanguage::Bengali)
            .await;

        match result {
            Err(VaaniError::Translation { src, dst, reason }) => {
                assert_eq!(src, "hi");
                assert_eq!(dst, "bn");
                assert!(reason.contains("backend down"));
            }
            other => panic!("Expected Translation error, got: {other:?}"),
        }
    }

    #[test]
    fn test_split_sentences_terminators() {
        let sentences = split_sentences("One. Two! Three? Four");
        assert_eq!(sentences, vec!["One", "Two", "Three", "Four"]);
    }

    #[test]
    fn test_split_sentences_collapses_runs() {
        let sentences = split_sentences("Wait... what?! Ok.");
        assert_eq!(sentences, vec!["Wait", "what", "Ok"]);
    }
}
