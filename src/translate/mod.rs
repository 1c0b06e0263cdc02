pub mod chunked;
pub mod rest;

pub use chunked::Translator;
pub use rest::RestTranslateClient;

use crate::error::Result;
use async_trait::async_trait;

/// Written-language codes the service translates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLanguage {
    English,
    Hindi,
    Bengali,
}

impl TextLanguage {
    pub fn code(&self) -> &'static str {
        match self {
            TextLanguage::English => "en",
            TextLanguage::Hindi => "hi",
            TextLanguage::Bengali => "bn",
        }
    }
}

impl std::fmt::Display for TextLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// External translation capability for one bounded span of text.
/// Implementations never chunk; the [`Translator`] adapter does.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate_span(
        &self,
        text: &str,
        src: TextLanguage,
        dst: TextLanguage,
    ) -> Result<String>;

    fn name(&self) -> &'static str;
}
