pub mod category;
pub mod comment;
pub mod item;

pub use category::Category;
pub use comment::{CommentNode, PollOption};
pub use item::{plain_text, Item, ItemId, ItemKind};
