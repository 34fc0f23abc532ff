//! 表示文字列の翻訳
/// Per-language cache and registered source strings
mod cache;
/// Published translation snapshot
mod map;
/// Translation session
mod session;
/// External translation capability
mod translator;

pub use map::TranslationMap;
pub use session::{
    SessionOptions,
    TranslateOutcome,
    TranslationSession,
};
pub use translator::{
    NoopTranslator,
    TranslateError,
    Translator,
};
