//! The external translation capability.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::types::LanguageCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Network or service failure.
    #[error("Translation service unavailable: {0}")]
    Unavailable(String),
    #[error("Translation service does not support '{0}'")]
    UnsupportedLanguage(LanguageCode),
    #[error("Translation request timed out after {0:?}")]
    Timeout(Duration),
}

/// Translates a batch of source strings into one target language.
///
/// The returned map may be partial: strings without an entry are shown in
/// their source language. Entries for strings that were not requested are
/// ignored by the caller.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        texts: Vec<String>,
        target: LanguageCode,
    ) -> BoxFuture<'_, Result<HashMap<String, String>, TranslateError>>;
}

/// A translator that never translates anything.
///
/// Used when the app runs without a translation backend: every string
/// falls back to its source text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn translate(
        &self,
        _texts: Vec<String>,
        _target: LanguageCode,
    ) -> BoxFuture<'_, Result<HashMap<String, String>, TranslateError>> {
        Box::pin(async { Ok(HashMap::new()) })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[tokio::test]
    async fn noop_translator_returns_empty_map() {
        let result = NoopTranslator
            .translate(vec!["Home".to_string()], LanguageCode::new("ko").unwrap())
            .await;

        assert_that!(result, ok(is_empty()));
    }

    #[googletest::test]
    fn error_messages() {
        let code = LanguageCode::new("vi").unwrap();

        expect_that!(
            TranslateError::UnsupportedLanguage(code).to_string(),
            eq("Translation service does not support 'vi'")
        );
        expect_that!(
            TranslateError::Timeout(Duration::from_millis(1500)).to_string(),
            contains_substring("1.5s")
        );
    }
}
