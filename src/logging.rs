//! ログ出力の初期化

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// ログファイル名のプレフィックス
const LOG_FILE_PREFIX: &str = "aussist.log";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter { directive: String, message: String },

    #[error("Failed to install the global subscriber: {0}")]
    AlreadyInitialized(String),
}

/// `RUST_LOG` があればそれを、なければ設定のレベルを使うフィルタを作る
///
/// # Errors
/// 設定のレベルが `EnvFilter` として解釈できない場合
pub fn build_filter(config: &LogConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| LoggingError::InvalidFilter {
        directive: config.level.clone(),
        message: e.to_string(),
    })
}

/// グローバルな tracing subscriber を設定する
///
/// `directory` が設定されていれば日次ローテーションのファイルへ、
/// なければ標準エラー出力へ書き出す。
///
/// ファイル出力時は返された `WorkerGuard` を保持しておくこと
/// （drop されるとバッファがフラッシュされ書き込みが止まる）。
///
/// # Errors
/// - フィルタの解釈に失敗
/// - 既に subscriber が設定済み
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(config)?;

    if let Some(directory) = &config.directory {
        let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .try_init()
            .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;
        tracing::debug!(directory = %directory.display(), "File logging initialized");
        return Ok(Some(guard));
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;
    Ok(None)
}
