//! 購読者に公開される翻訳スナップショット

use std::collections::HashMap;

use crate::types::LanguageCode;

/// ある時点で公開された翻訳結果（不変）
///
/// 購読者は `Arc<TranslationMap>` の差し替えとして更新を受け取るため、
/// 一部の文字列だけが更新された状態は観測されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationMap {
    /// 翻訳先の言語
    language: LanguageCode,
    /// 公開元リクエストのシーケンス番号（初期状態は 0）
    sequence: u64,
    /// 翻訳元文字列 → 翻訳結果
    entries: HashMap<String, String>,
}

impl TranslationMap {
    /// 何も翻訳されていない初期状態
    #[must_use]
    pub fn empty(language: LanguageCode) -> Self {
        Self { language, sequence: 0, entries: HashMap::new() }
    }

    pub(crate) const fn new(
        language: LanguageCode,
        sequence: u64,
        entries: HashMap<String, String>,
    ) -> Self {
        Self { language, sequence, entries }
    }

    /// 翻訳結果を返す。なければ翻訳元をそのまま返す
    #[must_use]
    pub fn get<'a>(&'a self, source: &'a str) -> &'a str {
        self.entries.get(source).map_or(source, String::as_str)
    }

    #[must_use]
    pub const fn language(&self) -> &LanguageCode {
        &self.language
    }

    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    #[must_use]
    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::translated("Home", "홈")]
    #[case::missing("Settings", "Settings")]
    #[case::empty_input("", "")]
    fn get_falls_back_to_source(#[case] source: &str, #[case] expected: &str) {
        let map = TranslationMap::new(
            LanguageCode::new("ko").unwrap(),
            1,
            HashMap::from([("Home".to_string(), "홈".to_string())]),
        );

        assert_that!(map.get(source), eq(expected));
    }

    #[rstest]
    fn empty_map_has_sequence_zero() {
        let map = TranslationMap::empty(LanguageCode::new("en").unwrap());

        assert_that!(map.sequence(), eq(0));
        assert_that!(map.is_empty(), eq(true));
        assert_that!(map.language().as_str(), eq("en"));
    }
}
