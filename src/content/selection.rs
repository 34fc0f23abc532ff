//! 複数選択のリスト（症状チェックなど）

/// 選択中の項目と絞り込み文字列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// 選択中の項目（選択した順）
    selected: Vec<String>,
    /// 絞り込み文字列
    query: String,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 選択/解除を切り替え、切り替え後に選択されているかを返す
    pub fn toggle(&mut self, option: &str) -> bool {
        if let Some(position) = self.selected.iter().position(|selected| selected == option) {
            self.selected.remove(position);
            false
        } else {
            self.selected.push(option.to_string());
            true
        }
    }

    #[must_use]
    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.iter().any(|selected| selected == option)
    }

    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// 1 つ以上選択されていれば次の画面へ進める
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// 絞り込み文字列を大文字小文字を区別せずに含む項目（空なら全件）
    ///
    /// 選択状態は絞り込みの影響を受けない
    #[must_use]
    pub fn visible<'a, S: AsRef<str>>(&self, options: &'a [S]) -> Vec<&'a str> {
        let query = self.query.trim().to_lowercase();
        options
            .iter()
            .map(AsRef::as_ref)
            .filter(|option| query.is_empty() || option.to_lowercase().contains(&query))
            .collect()
    }

    /// 選択と絞り込みをすべて解除する
    pub fn clear(&mut self) {
        self.selected.clear();
        self.query.clear();
    }
}
