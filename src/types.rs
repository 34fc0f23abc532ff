//! Core types used throughout the project.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageCodeError {
    #[error("Language code cannot be empty")]
    Empty,
    #[error("Invalid language code '{0}': only ASCII letters, digits and '-' are allowed")]
    InvalidCharacter(String),
}

/// A language tag such as `en`, `ko` or `pt-BR`.
///
/// Stored trimmed and lowercased so that `"KO"` and `"ko"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(
    /// 正規化済みのコード
    String,
);

impl LanguageCode {
    /// # Errors
    /// - The code is empty after trimming
    /// - The code contains characters other than ASCII alphanumerics and `-`
    pub fn new(code: impl AsRef<str>) -> Result<Self, LanguageCodeError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LanguageCodeError::Empty);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(LanguageCodeError::InvalidCharacter(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = LanguageCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LanguageCode {
    type Error = LanguageCodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An entry of the language selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    /// Name shown to the user, written in the language itself.
    pub name: String,
}

impl Language {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { code: code.into(), name: name.into() }
    }
}

/// Languages offered by the selector when nothing is configured.
#[must_use]
pub fn default_languages() -> Vec<Language> {
    vec![
        Language::new("en", "English"),
        Language::new("ko", "한국어"),
        Language::new("vi", "Tiếng Việt"),
        Language::new("ar", "Arabic"),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("ko", "ko")]
    #[case::uppercase("KO", "ko")]
    #[case::padded("  vi ", "vi")]
    #[case::region("pt-BR", "pt-br")]
    fn test_new_normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_that!(LanguageCode::new(input).unwrap().as_str(), eq(expected));
    }

    #[rstest]
    #[case::empty("", LanguageCodeError::Empty)]
    #[case::blank("   ", LanguageCodeError::Empty)]
    #[case::underscore("en_US", LanguageCodeError::InvalidCharacter("en_US".to_string()))]
    #[case::space("e n", LanguageCodeError::InvalidCharacter("e n".to_string()))]
    fn test_new_rejects(#[case] input: &str, #[case] expected: LanguageCodeError) {
        assert_that!(LanguageCode::new(input), err(eq(&expected)));
    }

    #[rstest]
    fn test_deserialize_validates() {
        let code: LanguageCode = serde_json::from_str(r#""AR""#).unwrap();
        assert_that!(code.as_str(), eq("ar"));

        let invalid: std::result::Result<LanguageCode, _> = serde_json::from_str(r#""""#);
        assert_that!(invalid.is_err(), eq(true));
    }

    #[rstest]
    fn test_default_languages() {
        let codes: Vec<_> = default_languages().into_iter().map(|l| l.code).collect();
        assert_that!(codes, elements_are![eq("en"), eq("ko"), eq("vi"), eq("ar")]);
    }
}
