//! Static content shown by the domain screens.
/// Card expand/collapse state
mod expansion;
/// Display items and categories
mod item;
/// Category → items registry
mod registry;
/// Multi-select list state
mod selection;

pub use expansion::ExpansionState;
pub use item::{
    Category,
    ContentItem,
    ItemTarget,
};
pub use registry::{
    ContentError,
    ContentRegistry,
};
pub use selection::SelectionState;
