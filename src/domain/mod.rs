pub mod announcement;
pub mod change;
pub mod history;
pub mod link;
pub mod notification;
pub mod source;

pub use announcement::Announcement;
pub use change::Change;
pub use history::HistoryRecord;
pub use link::LinkKind;
pub use notification::{Notification, Update, UpdateBatch};
pub use source::Source;
