mod item;
mod store;

pub use item::{Item, Mode, MAX_ITEM_CHARS};
pub use store::ItemStore;
pub(crate) use store::{default_texts, parse_list};
