//! Display item definitions.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Screen a content item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Home,
    Transport,
    Banking,
    Housing,
    Legal,
    English,
    Jobs,
    Emergency,
}

impl Category {
    pub const ALL: [Self; 8] = [
        Self::Home,
        Self::Transport,
        Self::Banking,
        Self::Housing,
        Self::Legal,
        Self::English,
        Self::Jobs,
        Self::Emergency,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Transport => "transport",
            Self::Banking => "banking",
            Self::Housing => "housing",
            Self::Legal => "legal",
            Self::English => "english",
            Self::Jobs => "jobs",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where tapping an item leads. Resolution is left to the host app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum ItemTarget {
    /// Third-party website or app store page.
    Url(String),
    /// In-app route such as `/banking/banking`.
    Route(String),
    Phone(String),
    Email(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub target: Option<ItemTarget>,
}

impl ContentItem {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon: None,
            target: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: ItemTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Case-insensitive match on title or description.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn deserialize_item_with_target() {
        let json = r#"{
            "id": "banking",
            "title": "Banking",
            "description": "Australian banking systems",
            "icon": "card-outline",
            "target": {"kind": "route", "value": "/banking/banking"}
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();

        assert_that!(item.icon, some(eq("card-outline")));
        assert_that!(item.target, some(eq(&ItemTarget::Route("/banking/banking".to_string()))));
    }

    #[rstest]
    fn deserialize_item_minimal() {
        let item: ContentItem = serde_json::from_str(r#"{"id": "1", "title": "NAB"}"#).unwrap();

        assert_that!(item, eq(&ContentItem::new("1", "NAB", "")));
    }

    #[rstest]
    #[case::title("housing", true)]
    #[case::description("rental", true)]
    #[case::no_match("visa", false)]
    fn matches_lowercase(#[case] needle: &str, #[case] expected: bool) {
        let item = ContentItem::new("housing", "Housing", "Find accommodation and Rental assistance");

        assert_that!(item.matches_lowercase(needle), eq(expected));
    }

    #[rstest]
    fn category_round_trips_lowercase() {
        let json = serde_json::to_string(&Category::Emergency).unwrap();

        assert_that!(json, eq("\"emergency\""));
        assert_that!(Category::ALL.map(Category::as_str).len(), eq(8));
    }
}
