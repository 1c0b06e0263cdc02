//! Wiremock tests for the network-backed recognition and translation
//! adapters: outcome classification and request shape, without hitting
//! real endpoints.

use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vaani::audio::AudioWindow;
use vaani::error::VaaniError;
use vaani::transcribe::{Recognizer, SpeechApiClient, SpeechLanguage, WindowClip, WindowOutcome};
use vaani::translate::{RestTranslateClient, TextLanguage, TranslationBackend, Translator};

fn test_clip() -> WindowClip {
    WindowClip {
        wav: vec![0u8; 64],
        window: AudioWindow {
            start_ms: 0,
            end_ms: 10_000,
        },
        noise_rms: 12.5,
    }
}

// ============================================================================
// Speech API adapter
// ============================================================================

mod speech_api_tests {
    use super::*;

    #[tokio::test]
    async fn test_recognized_transcript() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recognize"))
            .and(query_param("lang", "en-IN"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "{\"result\":[]}\n{\"result\":[{\"alternative\":[{\"transcript\":\"hello there\",\"confidence\":0.93}],\"final\":true}],\"result_index\":0}",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = SpeechApiClient::new(format!("{}/recognize", server.uri()));
        let outcome = client
            .recognize(&test_clip(), SpeechLanguage::EnglishIndia)
            .await;

        assert_eq!(outcome, WindowOutcome::Recognized("hello there".to_string()));
    }

    #[tokio::test]
    async fn test_hindi_language_tag_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recognize"))
            .and(query_param("lang", "hi-IN"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(
                    "{\"result\":[{\"alternative\":[{\"transcript\":\"नमस्ते\"}]}]}",
                ),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = SpeechApiClient::new(format!("{}/recognize", server.uri()));
        let outcome = client
            .recognize(&test_clip(), SpeechLanguage::HindiIndia)
            .await;

        assert_eq!(outcome, WindowOutcome::Recognized("नमस्ते".to_string()));
    }

    #[tokio::test]
    async fn test_api_key_goes_in_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recognize"))
            .and(query_param("key", "sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"result\":[]}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = SpeechApiClient::new(format!("{}/recognize", server.uri()))
            .with_api_key(Some("sk-test".to_string()));
        let outcome = client
            .recognize(&test_clip(), SpeechLanguage::EnglishIndia)
            .await;

        assert_eq!(outcome, WindowOutcome::NoSpeech);
    }

    #[tokio::test]
    async fn test_empty_results_classify_as_no_speech() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recognize"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"result\":[]}"))
            .mount(&server)
            .await;

        let client = SpeechApiClient::new(format!("{}/recognize", server.uri()));
        let outcome = client
            .recognize(&test_clip(), SpeechLanguage::EnglishIndia)
            .await;

        assert_eq!(outcome, WindowOutcome::NoSpeech);
    }

    #[tokio::test]
    async fn test_server_error_classifies_as_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recognize"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = SpeechApiClient::new(format!("{}/recognize", server.uri()));
        let outcome = client
            .recognize(&test_clip(), SpeechLanguage::EnglishIndia)
            .await;

        match outcome {
            WindowOutcome::BackendError(reason) => {
                assert!(reason.contains("503"));
            }
            other => panic!("Expected BackendError, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_classifies_as_backend_error() {
        // Nothing is listening on this port.
        let client = SpeechApiClient::new("http://127.0.0.1:1/recognize");
        let outcome = client
            .recognize(&test_clip(), SpeechLanguage::EnglishIndia)
            .await;

        assert!(matches!(outcome, WindowOutcome::BackendError(_)));
    }
}

// ============================================================================
// REST translate adapter
// ============================================================================

mod translate_tests {
    use super::*;

    #[tokio::test]
    async fn test_translate_span_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_partial_json(serde_json::json!({
                "q": "hello",
                "source": "en",
                "target": "bn",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"translatedText": "হ্যালো"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = RestTranslateClient::new(format!("{}/translate", server.uri()));
        let translated = client
            .translate_span("hello", TextLanguage::English, TextLanguage::Bengali)
            .await
            .unwrap();

        assert_eq!(translated, "হ্যালো");
    }

    #[tokio::test]
    async fn test_error_body_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "unsupported language pair"})),
            )
            .mount(&server)
            .await;

        let client = RestTranslateClient::new(format!("{}/translate", server.uri()));
        let result = client
            .translate_span("hello", TextLanguage::English, TextLanguage::Bengali)
            .await;

        match result {
            Err(VaaniError::Api(message)) => {
                assert!(message.contains("unsupported language pair"));
            }
            other => panic!("Expected Api error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_adapter_chunks_long_text_into_multiple_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"translatedText": "chunk"})),
            )
            .expect(2..)
            .mount(&server)
            .await;

        // ~2400 characters of distinct sentences forces the chunked path.
        let text = (0..40)
            .map(|i| format!("Sentence number {i} is here to pad out the total length"))
            .collect::<Vec<_>>()
            .join(". ");

        let translator = Translator::new(Box::new(RestTranslateClient::new(format!(
            "{}/translate",
            server.uri()
        ))));
        let translated = translator
            .translate(&text, TextLanguage::English, TextLanguage::Bengali)
            .await
            .unwrap();

        // One "chunk" per backend call, joined with spaces.
        assert!(translated.split(' ').all(|part| part == "chunk"));
        assert!(translated.split(' ').count() >= 2);
    }

    #[tokio::test]
    async fn test_failure_carries_language_pair() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let translator = Translator::new(Box::new(RestTranslateClient::new(format!(
            "{}/translate",
            server.uri()
        ))));
        let result = translator
            .translate("Short text.", TextLanguage::Hindi, TextLanguage::Bengali)
            .await;

        match result {
            Err(VaaniError::Translation { src, dst, .. }) => {
                assert_eq!(src, "hi");
                assert_eq!(dst, "bn");
            }
            other => panic!("Expected Translation error, got: {other:?}"),
        }
    }
}
