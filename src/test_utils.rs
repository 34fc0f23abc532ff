//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::{
    HashMap,
    HashSet,
};
use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::oneshot;

use crate::translation::{
    TranslateError,
    Translator,
};
use crate::types::LanguageCode;

/// 応答内容と完了タイミングを制御できる翻訳サービス
#[derive(Debug, Default)]
pub(crate) struct ScriptedTranslator {
    /// 言語 → (翻訳元 → 翻訳結果)
    dictionaries: HashMap<String, HashMap<String, String>>,
    /// リクエストに関係なく応答に含める項目
    extras: HashMap<String, HashMap<String, String>>,
    /// 常に失敗する言語
    failing_languages: HashSet<String>,
    /// これを含むバッチは失敗する
    failing_texts: HashSet<String>,
    /// 応答までの待ち時間
    delay: Option<Duration>,
    /// 言語ごとの完了待ち（1 リクエスト分）
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    /// 受け付けたリクエスト（言語, 文字列）
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedTranslator {
    /// 言語ごとの辞書を追加する
    pub(crate) fn with_dictionary<const N: usize>(
        mut self,
        language: &str,
        entries: [(&str, &str); N],
    ) -> Self {
        self.dictionaries
            .entry(language.to_string())
            .or_default()
            .extend(entries.iter().map(|(source, text)| ((*source).to_string(), (*text).to_string())));
        self
    }

    /// 要求されていない項目を応答に混ぜる
    pub(crate) fn with_extra_entry(mut self, language: &str, source: &str, text: &str) -> Self {
        self.extras
            .entry(language.to_string())
            .or_default()
            .insert(source.to_string(), text.to_string());
        self
    }

    /// 指定した言語のリクエストを常に失敗させる
    pub(crate) fn failing(mut self, language: &str) -> Self {
        self.failing_languages.insert(language.to_string());
        self
    }

    /// 指定した文字列を含むバッチを失敗させる
    pub(crate) fn failing_text(mut self, text: &str) -> Self {
        self.failing_texts.insert(text.to_string());
        self
    }

    /// 応答を遅らせる
    pub(crate) const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 次の `language` へのリクエストを、返された Sender に送信するまで完了させない
    pub(crate) fn hold(&self, language: &str) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.gates.lock().unwrap().insert(language.to_string(), receiver);
        sender
    }

    /// 受け付けたリクエストの一覧
    pub(crate) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Translator for ScriptedTranslator {
    fn translate(
        &self,
        texts: Vec<String>,
        target: LanguageCode,
    ) -> BoxFuture<'_, Result<HashMap<String, String>, TranslateError>> {
        let language = target.as_str().to_string();
        self.calls.lock().unwrap().push((language.clone(), texts.clone()));
        let gate = self.gates.lock().unwrap().remove(&language);

        Box::pin(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            if self.failing_languages.contains(&language)
                || texts.iter().any(|text| self.failing_texts.contains(text))
            {
                return Err(TranslateError::Unavailable("scripted failure".to_string()));
            }

            let dictionary = self.dictionaries.get(&language);
            let mut result: HashMap<String, String> = texts
                .iter()
                .filter_map(|text| {
                    dictionary.and_then(|d| d.get(text)).map(|translated| (text.clone(), translated.clone()))
                })
                .collect();
            if let Some(extra) = self.extras.get(&language) {
                result.extend(extra.clone());
            }
            Ok(result)
        })
    }
}
