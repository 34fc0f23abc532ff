//! お気に入り（ユーザーが保存したアイテム）
/// Saved item definition
mod item;
/// Key-value persistence
mod storage;
/// Favourites store
mod store;

pub use item::FavouriteItem;
pub(crate) use storage::is_valid_key;
pub use storage::{
    JsonFileStorage,
    MemoryStorage,
    Storage,
    StorageError,
};
pub use store::{
    FavouritesError,
    FavouritesStore,
};
