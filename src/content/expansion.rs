//! カードの展開状態

/// 展開中のカード ID（展開した順）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    /// 展開中の ID
    expanded: Vec<String>,
}

impl ExpansionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 展開/折りたたみを切り替え、切り替え後に展開されているかを返す
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(position) = self.expanded.iter().position(|expanded| expanded == id) {
            self.expanded.remove(position);
            false
        } else {
            self.expanded.push(id.to_string());
            true
        }
    }

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.iter().any(|expanded| expanded == id)
    }

    #[must_use]
    pub fn expanded(&self) -> &[String] {
        &self.expanded
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}
