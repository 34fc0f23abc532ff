//! 画面ごとの表示アイテムの管理

use std::collections::{
    BTreeMap,
    HashSet,
};

use thiserror::Error;

use super::item::{
    Category,
    ContentItem,
};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to parse content: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// カテゴリ → 表示アイテム一覧
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    /// カテゴリごとのアイテム（表示順）
    sections: BTreeMap<Category, Vec<ContentItem>>,
}

impl ContentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `{ "<category>": [items...] }` 形式の JSON から読み込む
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let sections: BTreeMap<Category, Vec<ContentItem>> = serde_json::from_str(json)?;
        tracing::debug!(categories = sections.len(), "Content registry loaded");
        Ok(Self { sections })
    }

    /// カテゴリのアイテムを追加する（既存アイテムの後ろに並ぶ）
    pub fn insert(&mut self, category: Category, items: impl IntoIterator<Item = ContentItem>) {
        self.sections.entry(category).or_default().extend(items);
    }

    /// カテゴリのアイテム一覧（未登録なら空）
    #[must_use]
    pub fn items(&self, category: Category) -> &[ContentItem] {
        self.sections.get(&category).map_or(&[], Vec::as_slice)
    }

    /// タイトルまたは説明に検索文字列を含むアイテム
    ///
    /// 大文字小文字を区別しない。前後の空白は無視し、空文字列なら全件を返す。
    #[must_use]
    pub fn search(&self, category: Category, query: &str) -> Vec<&ContentItem> {
        let needle = query.trim().to_lowercase();
        self.items(category).iter().filter(|item| item.matches_lowercase(&needle)).collect()
    }

    /// カテゴリで表示される翻訳元文字列（重複なし、表示順）
    #[must_use]
    pub fn source_strings(&self, category: Category) -> Vec<String> {
        let mut seen = HashSet::new();
        self.items(category)
            .iter()
            .flat_map(|item| [item.title.as_str(), item.description.as_str()])
            .filter(|text| !text.is_empty() && seen.insert(*text))
            .map(ToString::to_string)
            .collect()
    }

    /// 全カテゴリから ID でアイテムを探す
    #[must_use]
    pub fn find(&self, id: &str) -> Option<(Category, &ContentItem)> {
        self.sections
            .iter()
            .find_map(|(category, items)| items.iter().find(|item| item.id == id).map(|item| (*category, item)))
    }

    /// 登録済みのカテゴリ
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.sections.keys().copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::content::ItemTarget;

    #[fixture]
    fn registry() -> ContentRegistry {
        let mut registry = ContentRegistry::new();
        registry.insert(
            Category::Home,
            [
                ContentItem::new("transport", "Transport", "Public transport information and services in NSW"),
                ContentItem::new("banking", "Banking", "Australian banking systems and financial assistance"),
                ContentItem::new("housing", "Housing", "Find accommodation and rental assistance"),
            ],
        );
        registry.insert(
            Category::Banking,
            [
                ContentItem::new("1", "Commonwealth", "Digital banking in multiple languages")
                    .with_target(ItemTarget::Url("https://www.commbank.com.au/".to_string())),
                ContentItem::new("4", "ANZ", "Digital banking in multiple languages"),
            ],
        );
        registry
    }

    #[rstest]
    fn items_unknown_category_is_empty(registry: ContentRegistry) {
        assert_that!(registry.items(Category::Legal), is_empty());
    }

    #[rstest]
    #[case::empty_query("", 3)]
    #[case::blank_query("   ", 3)]
    #[case::title_case_insensitive("BANK", 1)]
    #[case::description("assistance", 2)]
    #[case::padded(" housing ", 1)]
    #[case::no_match("visa", 0)]
    fn search_filters(registry: ContentRegistry, #[case] query: &str, #[case] expected: usize) {
        assert_that!(registry.search(Category::Home, query), len(eq(expected)));
    }

    #[rstest]
    fn search_keeps_display_order(registry: ContentRegistry) {
        let ids: Vec<String> =
            registry.search(Category::Home, "a").into_iter().map(|item| item.id.clone()).collect();

        assert_that!(ids, elements_are![eq("transport"), eq("banking"), eq("housing")]);
    }

    #[rstest]
    fn source_strings_deduplicates(registry: ContentRegistry) {
        let strings = registry.source_strings(Category::Banking);

        assert_that!(
            strings,
            elements_are![eq("Commonwealth"), eq("Digital banking in multiple languages"), eq("ANZ")]
        );
    }

    #[rstest]
    fn source_strings_skips_empty_description() {
        let mut registry = ContentRegistry::new();
        registry.insert(Category::Legal, [ContentItem::new("legal-aid", "Legal Aid NSW", "")]);

        assert_that!(registry.source_strings(Category::Legal), elements_are![eq("Legal Aid NSW")]);
    }

    #[rstest]
    fn find_searches_all_categories(registry: ContentRegistry) {
        let (category, item) = registry.find("4").unwrap();

        assert_that!(category, eq(Category::Banking));
        assert_that!(item.title, eq("ANZ"));
        assert_that!(registry.find("missing"), none());
    }

    #[rstest]
    fn from_json_loads_sections() {
        let json = r#"{
            "emergency": [{"id": "000", "title": "Emergency", "target": {"kind": "phone", "value": "000"}}],
            "jobs": [{"id": "seek", "title": "SEEK", "description": "Job search"}]
        }"#;

        let registry = ContentRegistry::from_json(json).unwrap();

        assert_that!(registry.items(Category::Emergency), len(eq(1)));
        assert_that!(
            registry.items(Category::Emergency)[0].target,
            some(eq(&ItemTarget::Phone("000".to_string())))
        );
        let categories: Vec<_> = registry.categories().collect();
        assert_that!(categories, elements_are![eq(&Category::Jobs), eq(&Category::Emergency)]);
    }

    #[rstest]
    fn from_json_unknown_category_is_error() {
        let result = ContentRegistry::from_json(r#"{"healthcare": []}"#);

        assert!(matches!(result, Err(ContentError::ParseError(_))));
    }
}
