pub mod json_file;
pub mod traits;

pub use json_file::JsonHistoryStore;
pub use traits::{load_or_empty, HistoryStore};
