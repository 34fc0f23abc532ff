//! 翻訳セッション
//!
//! 表示言語と公開中の翻訳結果を保持し、言語変更時に表示文字列を一括翻訳する。
//!
//! # 古い応答の破棄
//!
//! `translate_all` は呼び出し時にシーケンス番号を採番する。結果を公開できるのは
//! 最新の番号を持つ呼び出しだけで、それより前の呼び出しの結果は到着時に破棄される。
//! 判定と公開は `watch::Sender::send_if_modified` の中でまとめて行う。

use std::collections::{
    HashMap,
    HashSet,
};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{
    AtomicU64,
    Ordering,
};
use std::time::Duration;

use tokio::sync::{
    Mutex,
    MutexGuard,
    watch,
};
use tokio::task::JoinHandle;

use super::cache::{
    SourceStrings,
    TranslationCache,
};
use super::map::TranslationMap;
use super::translator::{
    TranslateError,
    Translator,
};
use crate::config::AussistSettings;
use crate::types::{
    LanguageCode,
    LanguageCodeError,
};

/// セッションの動作設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// コンテンツの記述言語（翻訳リクエストは発行しない）
    pub source_language: LanguageCode,
    /// 選択可能な言語
    pub supported_languages: Vec<LanguageCode>,
    /// 1 バッチあたりのタイムアウト
    pub timeout: Duration,
    /// 1 バッチあたりの最大文字列数
    pub batch_size: usize,
}

impl SessionOptions {
    /// 設定から作成する
    ///
    /// `source_language` が `languages` に含まれていない場合は先頭に追加する
    pub fn from_settings(settings: &AussistSettings) -> Result<Self, LanguageCodeError> {
        let source_language = LanguageCode::new(&settings.source_language)?;
        let mut supported_languages = settings.language_codes();
        if !supported_languages.contains(&source_language) {
            supported_languages.insert(0, source_language.clone());
        }

        Ok(Self {
            source_language,
            supported_languages,
            timeout: settings.translation.timeout(),
            batch_size: settings.translation.batch_size.max(1),
        })
    }

    /// 選択可能な言語か
    fn is_supported(&self, code: &LanguageCode) -> bool {
        self.supported_languages.contains(code)
    }
}

/// `translate_all` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateOutcome {
    /// 新しい翻訳結果を公開した
    Applied {
        /// 翻訳済みの文字列数
        translated: usize,
        /// 翻訳元のまま表示される文字列数
        fallback: usize,
    },
    /// より新しい呼び出しがあったため結果を破棄した
    Superseded,
    /// 非対応の言語コードのため何もしなかった
    Unsupported,
}

/// 翻訳セッション
///
/// `Clone` は同じセッションへのハンドルを作る（状態は共有される）。
#[derive(Clone)]
pub struct TranslationSession {
    /// 動作設定
    options: Arc<SessionOptions>,
    /// 外部の翻訳サービス
    translator: Arc<dyn Translator>,
    /// 現在の表示言語
    active_language: Arc<Mutex<LanguageCode>>,
    /// 翻訳対象の文字列
    sources: Arc<Mutex<SourceStrings>>,
    /// 言語ごとの翻訳キャッシュ
    cache: Arc<Mutex<TranslationCache>>,
    /// 最後に採番したシーケンス番号
    latest_sequence: Arc<AtomicU64>,
    /// 購読者に公開中の翻訳結果
    published: Arc<watch::Sender<Arc<TranslationMap>>>,
}

impl std::fmt::Debug for TranslationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationSession")
            .field("options", &self.options)
            .field("translator", &"<dyn Translator>")
            .field("latest_sequence", &self.latest_sequence.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl TranslationSession {
    /// 新しいセッションを作成する。表示言語は翻訳元の言語
    #[must_use]
    pub fn new(options: SessionOptions, translator: Arc<dyn Translator>) -> Self {
        let source_language = options.source_language.clone();
        let (published, _) =
            watch::channel(Arc::new(TranslationMap::empty(source_language.clone())));

        Self {
            options: Arc::new(options),
            translator,
            active_language: Arc::new(Mutex::new(source_language)),
            sources: Arc::new(Mutex::new(SourceStrings::default())),
            cache: Arc::new(Mutex::new(TranslationCache::default())),
            latest_sequence: Arc::new(AtomicU64::new(0)),
            published: Arc::new(published),
        }
    }

    /// 翻訳対象の文字列を登録する
    ///
    /// 空文字列と登録済みの文字列は無視する。追加した件数を返す。
    pub async fn register_sources<I, S>(&self, sources: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let added = self.sources.lock().await.extend(sources.into_iter().map(Into::into));
        tracing::trace!(added, "Registered source strings");
        added
    }

    /// 翻訳対象の文字列をすべて解除する
    pub async fn clear_sources(&self) {
        self.sources.lock().await.clear();
    }

    /// 翻訳キャッシュを破棄する（公開中の翻訳結果はそのまま）
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    /// 表示言語を変更する
    ///
    /// 翻訳は行わない。現在と同じ言語、または非対応の言語の場合は何もせず
    /// `false` を返す。
    pub async fn set_language(&self, code: &str) -> bool {
        self.switch_language(code).await.is_some()
    }

    /// 表示言語を変更し、変更した場合はロックを保持したまま返す
    async fn switch_language(&self, code: &str) -> Option<MutexGuard<'_, LanguageCode>> {
        let code = self.resolve(code)?;

        let mut active = self.active_language.lock().await;
        if *active == code {
            tracing::debug!(language = %code, "Language already active");
            return None;
        }

        tracing::info!(from = %*active, to = %code, "Active language changed");
        *active = code;
        Some(active)
    }

    /// 登録済みの文字列を `code` に一括翻訳し、結果を公開する
    ///
    /// リクエストは返された Future を待つ前、この呼び出しの時点で開始扱いになる
    /// （シーケンス番号を採番する）。完了までは以前の翻訳結果が表示され続ける。
    ///
    /// 翻訳に失敗した、時間切れになった、または応答に含まれなかった文字列は
    /// 翻訳元のまま表示する。
    pub fn translate_all(&self, code: &str) -> impl Future<Output = TranslateOutcome> + Send + use<> {
        let session = self.clone();
        let ticket = self.resolve(code).map(|target| {
            let sequence = self.latest_sequence.fetch_add(1, Ordering::SeqCst) + 1;
            (target, sequence)
        });

        async move {
            match ticket {
                Some((target, sequence)) => session.run(target, sequence).await,
                None => TranslateOutcome::Unsupported,
            }
        }
    }

    /// `translate_all` をバックグラウンドで実行する
    ///
    /// # Panics
    /// tokio ランタイムの外から呼んだ場合
    pub fn spawn_translate_all(&self, code: &str) -> JoinHandle<TranslateOutcome> {
        tokio::spawn(self.translate_all(code))
    }

    /// 言語選択の操作
    ///
    /// 表示言語が変わった場合だけ一括翻訳をバックグラウンドで開始する。
    /// 同じ言語を再選択した場合はリクエストを発行せず `None` を返す。
    ///
    /// 表示言語の更新とシーケンス番号の採番は同じロックの中で行う。並行に呼ばれても
    /// 最後に設定された表示言語の翻訳結果だけが公開される。
    pub async fn change_language(&self, code: &str) -> Option<JoinHandle<TranslateOutcome>> {
        let active = self.switch_language(code).await?;
        let handle = self.spawn_translate_all(code);
        drop(active);
        Some(handle)
    }

    /// 翻訳結果を返す。未翻訳なら翻訳元をそのまま返す
    #[must_use]
    pub fn get(&self, source: &str) -> String {
        self.published.borrow().get(source).to_string()
    }

    /// 公開中の翻訳結果
    #[must_use]
    pub fn snapshot(&self) -> Arc<TranslationMap> {
        Arc::clone(&self.published.borrow())
    }

    /// 翻訳結果の更新を購読する
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<TranslationMap>> {
        self.published.subscribe()
    }

    /// 現在の表示言語
    pub async fn active_language(&self) -> LanguageCode {
        self.active_language.lock().await.clone()
    }

    #[must_use]
    pub fn source_language(&self) -> &LanguageCode {
        &self.options.source_language
    }

    #[must_use]
    pub fn supported_languages(&self) -> &[LanguageCode] {
        &self.options.supported_languages
    }

    /// 言語コードを解釈し、選択可能なものだけを返す
    fn resolve(&self, code: &str) -> Option<LanguageCode> {
        match LanguageCode::new(code) {
            Ok(code) if self.options.is_supported(&code) => Some(code),
            Ok(code) => {
                tracing::warn!(language = %code, "Unsupported language; ignoring");
                None
            }
            Err(error) => {
                tracing::warn!(language = code, %error, "Invalid language code; ignoring");
                None
            }
        }
    }

    /// `sequence` が最新の呼び出しか
    fn is_latest(&self, sequence: u64) -> bool {
        self.latest_sequence.load(Ordering::SeqCst) == sequence
    }

    /// 一括翻訳の本体
    async fn run(&self, target: LanguageCode, sequence: u64) -> TranslateOutcome {
        let sources = self.sources.lock().await.as_slice().to_vec();
        tracing::debug!(language = %target, sequence, count = sources.len(), "Translating visible strings");

        let entries = if target == self.options.source_language {
            HashMap::new()
        } else {
            let (mut entries, missing) = self.cache.lock().await.partition(&target, &sources);
            let fetched = self.fetch(&target, &missing).await;

            if !self.is_latest(sequence) {
                tracing::debug!(language = %target, sequence, "Discarding superseded translation result");
                return TranslateOutcome::Superseded;
            }

            self.cache
                .lock()
                .await
                .extend(&target, fetched.iter().map(|(source, text)| (source.clone(), text.clone())));
            entries.extend(fetched);
            entries
        };

        let translated = entries.len();
        let fallback = sources.len().saturating_sub(translated);
        let map = Arc::new(TranslationMap::new(target.clone(), sequence, entries));

        let applied = self.published.send_if_modified(|current| {
            if !self.is_latest(sequence) {
                return false;
            }
            *current = map;
            true
        });

        if !applied {
            tracing::debug!(language = %target, sequence, "Discarding superseded translation result");
            return TranslateOutcome::Superseded;
        }

        tracing::info!(language = %target, sequence, translated, fallback, "Translation applied");
        TranslateOutcome::Applied { translated, fallback }
    }

    /// 未翻訳の文字列をバッチに分けて並行にリクエストする
    ///
    /// 失敗したバッチは空として扱う（該当文字列は翻訳元のまま）
    async fn fetch(&self, target: &LanguageCode, missing: &[String]) -> HashMap<String, String> {
        if missing.is_empty() {
            return HashMap::new();
        }

        let requests: Vec<_> = missing
            .chunks(self.options.batch_size.max(1))
            .map(|batch| self.request_batch(batch.to_vec(), target.clone()))
            .collect();

        futures::future::join_all(requests).await.into_iter().flatten().collect()
    }

    /// 1 バッチ分のリクエスト
    async fn request_batch(&self, batch: Vec<String>, target: LanguageCode) -> Vec<(String, String)> {
        let requested: HashSet<String> = batch.iter().cloned().collect();
        let count = batch.len();
        let timeout = self.options.timeout;

        let result = tokio::time::timeout(timeout, self.translator.translate(batch, target.clone()))
            .await
            .unwrap_or_else(|_| Err(TranslateError::Timeout(timeout)));

        match result {
            Ok(translated) => translated
                .into_iter()
                .filter(|(source, text)| requested.contains(source) && !text.trim().is_empty())
                .collect(),
            Err(error) => {
                tracing::warn!(
                    language = %target,
                    count,
                    %error,
                    "Translation failed; falling back to source strings"
                );
                Vec::new()
            }
        }
    }
}
