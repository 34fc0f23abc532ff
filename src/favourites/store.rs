//! お気に入りの管理

use std::sync::Arc;

use thiserror::Error;

use super::item::FavouriteItem;
use super::storage::{
    Storage,
    StorageError,
};

#[derive(Error, Debug)]
pub enum FavouritesError {
    #[error("Failed to access favourites storage: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to (de)serialize favourites: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// お気に入り一覧（追加順）
///
/// 変更のたびに一覧全体を JSON 配列として保存する。保存に失敗した場合は
/// エラーを返し、メモリ上の一覧は変更しない。
pub struct FavouritesStore {
    /// 永続化先
    storage: Arc<dyn Storage>,
    /// 保存キー
    key: String,
    /// 保存済みアイテム（追加順）
    items: Vec<FavouriteItem>,
}

impl std::fmt::Debug for FavouritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavouritesStore")
            .field("storage", &"<dyn Storage>")
            .field("key", &self.key)
            .field("items", &self.items)
            .finish()
    }
}

impl FavouritesStore {
    /// 保存済みの一覧を読み込む（未保存なら空）
    ///
    /// # Errors
    /// - ストレージの読み込みエラー
    /// - 保存内容が壊れている
    pub fn open(storage: Arc<dyn Storage>, key: impl Into<String>) -> Result<Self, FavouritesError> {
        let key = key.into();
        let items = match storage.load(&key)? {
            Some(content) => serde_json::from_str(&content)?,
            None => Vec::new(),
        };
        tracing::debug!(key, count = items.len(), "Favourites loaded");

        Ok(Self { storage, key, items })
    }

    /// 追加する。同じ ID があれば同じ位置で置き換える
    pub fn add(&mut self, item: FavouriteItem) -> Result<(), FavouritesError> {
        let mut items = self.items.clone();
        if let Some(existing) = items.iter_mut().find(|existing| existing.id == item.id) {
            *existing = item;
        } else {
            items.push(item);
        }

        self.commit(items)
    }

    /// 削除する。存在しなければ何もせず `false` を返す
    pub fn remove(&mut self, id: &str) -> Result<bool, FavouritesError> {
        if !self.contains(id) {
            tracing::debug!(id, "Favourite not found; nothing to remove");
            return Ok(false);
        }

        let items = self.items.iter().filter(|item| item.id != id).cloned().collect();
        self.commit(items)?;
        Ok(true)
    }

    #[must_use]
    pub fn list(&self) -> &[FavouriteItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FavouriteItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 保存に成功した場合だけメモリ上の一覧を差し替える
    fn commit(&mut self, items: Vec<FavouriteItem>) -> Result<(), FavouritesError> {
        let content = serde_json::to_string(&items)?;
        if let Err(error) = self.storage.save(&self.key, &content) {
            tracing::error!(key = self.key, %error, "Failed to save favourites");
            return Err(error.into());
        }

        self.items = items;
        tracing::debug!(key = self.key, count = self.items.len(), "Favourites saved");
        Ok(())
    }
}
