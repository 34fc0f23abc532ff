//! aussist-core
//!
//! 移住者向けサポートアプリ Aussist の非 UI 部分
//! （翻訳セッション、お気に入り、表示コンテンツ）

pub mod config;
pub mod content;
pub mod context;
pub mod favourites;
pub mod logging;
pub mod translation;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use context::AppContext;
