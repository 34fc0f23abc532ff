//! アプリ設定（`.aussist.json`）の読み込みと検証
/// Config file loader
mod loader;
/// Configuration types and settings
mod types;

pub use loader::{
    default_data_dir,
    load_settings,
};
pub use types::{
    AussistSettings,
    ConfigError,
    FavouritesConfig,
    LogConfig,
    TranslationConfig,
    ValidationError,
};
