//! 設定ファイルの読み込み関数

use std::path::{
    Path,
    PathBuf,
};

use super::{
    AussistSettings,
    ConfigError,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".aussist.json";

/// データディレクトリから設定を読み込む
///
/// `.aussist.json` ファイルを探して読み込む
///
/// # Arguments
/// * `data_dir` - アプリのデータディレクトリ
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_dir(data_dir: &Path) -> Result<Option<AussistSettings>, ConfigError> {
    let config_path = data_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: AussistSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

/// データディレクトリの設定を読み込んで検証する
///
/// 設定ファイルがなければデフォルト設定を使う（デフォルト設定も検証する）
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー（すべての項目をまとめて返す）
pub fn load_settings(data_dir: &Path) -> Result<AussistSettings, ConfigError> {
    let settings = load_from_dir(data_dir)?.unwrap_or_else(|| {
        tracing::debug!("Using default settings");
        AussistSettings::default()
    });

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!(source_language = settings.source_language, "Settings loaded");
    Ok(settings)
}

/// プラットフォーム標準のデータディレクトリ（`<data_dir>/aussist`）
///
/// 取得できない環境ではカレントディレクトリを使う
#[must_use]
pub fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("aussist");
    path
}
