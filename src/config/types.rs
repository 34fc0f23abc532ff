use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::favourites::is_valid_key;
use crate::types::{
    Language,
    LanguageCode,
    default_languages,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[0].code")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AussistSettings {
    /// Language the content is authored in. Never sent to the translator.
    pub source_language: String,

    /// Languages offered by the selector, in display order.
    /// Must contain `source_language`.
    pub languages: Vec<Language>,

    pub translation: TranslationConfig,
    pub favourites: FavouritesConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationConfig {
    /// Upper bound for a single translator request, in milliseconds.
    /// An expired request is treated as a failure.
    pub timeout_ms: u64,

    /// Max number of strings sent in one translator request.
    pub batch_size: usize,
}

impl TranslationConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000, batch_size: 50 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FavouritesConfig {
    /// Key the favourites list is persisted under.
    pub storage_key: String,
}

impl Default for FavouritesConfig {
    fn default() -> Self {
        Self { storage_key: "favourites".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,

    /// Write logs to a daily rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), directory: None }
    }
}

impl AussistSettings {
    /// # Errors
    /// - Invalid or duplicated language code
    /// - Source language missing from `languages`
    /// - Zero timeout or batch size
    /// - Empty storage key
    /// - Unparsable log level
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let source = match LanguageCode::new(&self.source_language) {
            Ok(code) => Some(code),
            Err(e) => {
                errors.push(ValidationError::new("sourceLanguage", e.to_string()));
                None
            }
        };

        if self.languages.is_empty() {
            errors.push(ValidationError::new(
                "languages",
                "At least one language is required. Example: [{\"code\": \"en\", \"name\": \"English\"}]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, language) in self.languages.iter().enumerate() {
            match LanguageCode::new(&language.code) {
                Ok(code) => {
                    if !seen.insert(code.clone()) {
                        errors.push(ValidationError::new(
                            format!("languages[{index}].code"),
                            format!("Duplicate language code '{code}'"),
                        ));
                    }
                }
                Err(e) => {
                    errors.push(ValidationError::new(
                        format!("languages[{index}].code"),
                        e.to_string(),
                    ));
                }
            }
            if language.name.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("languages[{index}].name"),
                    "The display name cannot be empty",
                ));
            }
        }

        if let Some(source) = &source
            && !self.languages.is_empty()
            && !seen.contains(source)
        {
            errors.push(ValidationError::new(
                "sourceLanguage",
                format!("Source language '{source}' must also be listed in 'languages'"),
            ));
        }

        if self.translation.timeout_ms == 0 {
            errors.push(ValidationError::new(
                "translation.timeoutMs",
                "The timeout must be greater than 0. Example: 10000",
            ));
        }

        if self.translation.batch_size == 0 {
            errors.push(ValidationError::new(
                "translation.batchSize",
                "The batch size must be greater than 0. Example: 50",
            ));
        }

        if self.favourites.storage_key.is_empty() {
            errors.push(ValidationError::new(
                "favourites.storageKey",
                "The storage key cannot be empty. Example: \"favourites\"",
            ));
        } else if !is_valid_key(&self.favourites.storage_key) {
            errors.push(ValidationError::new(
                "favourites.storageKey",
                format!(
                    "Invalid storage key '{}': only letters, digits, '-' and '_' are allowed. Example: \"favourites\"",
                    self.favourites.storage_key
                ),
            ));
        }

        if let Err(e) = EnvFilter::try_new(&self.log.level) {
            errors.push(ValidationError::new(
                "log.level",
                format!("Invalid log level '{}': {e}", self.log.level),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// 設定済みの言語コード一覧（不正なコードは除外）
    #[must_use]
    pub fn language_codes(&self) -> Vec<LanguageCode> {
        self.languages.iter().filter_map(|l| LanguageCode::new(&l.code).ok()).collect()
    }
}

impl Default for AussistSettings {
    fn default() -> Self {
        Self {
            source_language: "en".to_string(),
            languages: default_languages(),
            translation: TranslationConfig::default(),
            favourites: FavouritesConfig::default(),
            log: LogConfig::default(),
        }
    }
}
