use serde::{Deserialize, Serialize};

/// The first list entry found on a source's page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub title: String,
    /// Always absolute once produced by the extractor
    pub link: String,
}

impl Announcement {
    pub fn new(title: String, link: String) -> Self {
        Self { title, link }
    }
}
