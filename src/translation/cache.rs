//! 言語ごとの翻訳キャッシュと翻訳対象文字列の集合

use std::collections::{
    HashMap,
    HashSet,
};

use crate::types::LanguageCode;

/// (言語, 翻訳元) → 翻訳結果 のメモ
#[derive(Debug, Default)]
pub(crate) struct TranslationCache {
    /// 言語 → (翻訳元 → 翻訳結果)
    entries: HashMap<LanguageCode, HashMap<String, String>>,
}

impl TranslationCache {
    /// キャッシュ済みの翻訳と未翻訳の文字列に分ける
    ///
    /// 未翻訳の文字列は `sources` の順序を保つ
    pub(crate) fn partition(
        &self,
        language: &LanguageCode,
        sources: &[String],
    ) -> (HashMap<String, String>, Vec<String>) {
        let Some(cached) = self.entries.get(language) else {
            return (HashMap::new(), sources.to_vec());
        };

        let mut hits = HashMap::new();
        let mut missing = Vec::new();
        for source in sources {
            match cached.get(source) {
                Some(translated) => {
                    hits.insert(source.clone(), translated.clone());
                }
                None => missing.push(source.clone()),
            }
        }
        (hits, missing)
    }

    pub(crate) fn extend(
        &mut self,
        language: &LanguageCode,
        translations: impl IntoIterator<Item = (String, String)>,
    ) {
        self.entries.entry(language.clone()).or_default().extend(translations);
    }

    #[cfg(test)]
    pub(crate) fn len(&self, language: &LanguageCode) -> usize {
        self.entries.get(language).map_or(0, HashMap::len)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// 翻訳対象の文字列（登録順、重複なし）
#[derive(Debug, Default)]
pub(crate) struct SourceStrings {
    /// 登録順の一覧
    ordered: Vec<String>,
    /// 重複判定用
    seen: HashSet<String>,
}

impl SourceStrings {
    /// 追加した件数を返す。空文字列と登録済みの文字列は無視する
    pub(crate) fn extend(&mut self, sources: impl IntoIterator<Item = String>) -> usize {
        let before = self.ordered.len();
        for source in sources {
            if source.is_empty() || self.seen.contains(&source) {
                continue;
            }
            self.seen.insert(source.clone());
            self.ordered.push(source);
        }
        self.ordered.len() - before
    }

    pub(crate) fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub(crate) fn clear(&mut self) {
        self.ordered.clear();
        self.seen.clear();
    }
}
