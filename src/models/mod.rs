pub mod category;
pub mod db_item;
pub mod time_entry;

pub use category::Category;
pub use db_item::{CatalogView, DbItem};
pub use time_entry::{NumberedEntry, TimeEntry, number_entries};
