//! 画面から参照されるアプリの共有状態

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{
    AussistSettings,
    ConfigError,
    load_settings,
};
use crate::content::{
    Category,
    ContentItem,
    ContentRegistry,
};
use crate::favourites::{
    FavouriteItem,
    FavouritesError,
    FavouritesStore,
    JsonFileStorage,
    Storage,
};
use crate::translation::{
    SessionOptions,
    TranslationSession,
    Translator,
};
use crate::types::{
    Language,
    LanguageCodeError,
};

#[derive(Error, Debug)]
pub enum ContextError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid source language: {0}")]
    SourceLanguage(#[from] LanguageCodeError),

    #[error(transparent)]
    Favourites(#[from] FavouritesError),
}

/// アプリの共有状態
///
/// グローバル変数は使わず、画面にはこの値への参照を渡す。
#[derive(Debug)]
pub struct AppContext {
    /// 検証済みの設定
    settings: AussistSettings,
    /// 表示コンテンツ
    registry: ContentRegistry,
    /// 翻訳セッション
    session: TranslationSession,
    /// お気に入り
    favourites: FavouritesStore,
}

impl AppContext {
    /// # Errors
    /// - 設定のバリデーションエラー
    /// - お気に入りの読み込みエラー
    pub fn new(
        settings: AussistSettings,
        registry: ContentRegistry,
        translator: Arc<dyn Translator>,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, ContextError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        let session = TranslationSession::new(SessionOptions::from_settings(&settings)?, translator);
        let favourites = FavouritesStore::open(storage, settings.favourites.storage_key.clone())?;

        tracing::debug!(
            source_language = %session.source_language(),
            favourites = favourites.len(),
            "App context created"
        );
        Ok(Self { settings, registry, session, favourites })
    }

    /// データディレクトリの `.aussist.json` を読み込み、お気に入りも同じディレクトリに保存する
    ///
    /// # Errors
    /// - 設定ファイルの読み込み・パース・バリデーションエラー
    /// - お気に入りの読み込みエラー
    pub fn open(
        data_dir: PathBuf,
        registry: ContentRegistry,
        translator: Arc<dyn Translator>,
    ) -> Result<Self, ContextError> {
        let settings = load_settings(&data_dir)?;
        Self::new(settings, registry, translator, Arc::new(JsonFileStorage::new(data_dir)))
    }

    #[must_use]
    pub const fn settings(&self) -> &AussistSettings {
        &self.settings
    }

    /// 言語選択に表示する言語
    #[must_use]
    pub fn languages(&self) -> &[Language] {
        &self.settings.languages
    }

    #[must_use]
    pub const fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn session(&self) -> &TranslationSession {
        &self.session
    }

    #[must_use]
    pub const fn favourites(&self) -> &FavouritesStore {
        &self.favourites
    }

    pub const fn favourites_mut(&mut self) -> &mut FavouritesStore {
        &mut self.favourites
    }

    /// カテゴリの画面を表示する
    ///
    /// 表示される文字列を翻訳対象に登録し、アイテム一覧を返す
    pub async fn show_category(&self, category: Category) -> &[ContentItem] {
        let added = self.session.register_sources(self.registry.source_strings(category)).await;
        tracing::debug!(%category, added, "Category shown");
        self.registry.items(category)
    }

    /// コンテンツのアイテムをお気に入りに保存する
    ///
    /// ID がコンテンツに存在しなければ何もせず `false` を返す
    pub fn save_item(&mut self, id: &str) -> Result<bool, ContextError> {
        let Some((_, item)) = self.registry.find(id) else {
            tracing::warn!(id, "Content item not found; nothing to save");
            return Ok(false);
        };

        self.favourites.add(FavouriteItem::from(item))?;
        Ok(true)
    }
}
