//! 保存アイテムの定義

use serde::{
    Deserialize,
    Serialize,
};

use crate::content::{
    ContentItem,
    ItemTarget,
};

/// ユーザーが保存したアイテム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// 外部サイトの URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// アプリ内の遷移先
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl FavouriteItem {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), description: description.into(), url: None, route: None }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }
}

impl From<&ContentItem> for FavouriteItem {
    /// 電話・メールの遷移先は保存しない
    fn from(item: &ContentItem) -> Self {
        let favourite = Self::new(item.id.clone(), item.title.clone(), item.description.clone());
        match &item.target {
            Some(ItemTarget::Url(url)) => favourite.with_url(url.clone()),
            Some(ItemTarget::Route(route)) => favourite.with_route(route.clone()),
            Some(ItemTarget::Phone(_) | ItemTarget::Email(_)) | None => favourite,
        }
    }
}
