use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Last-seen announcement title per source name.
///
/// This is the whole durable state of the watcher. Serialized as a flat JSON
/// object; a `BTreeMap` keeps the keys sorted so rewrites produce stable files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRecord {
    titles: BTreeMap<String, String>,
}

impl HistoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source_name: &str) -> Option<&str> {
        self.titles.get(source_name).map(String::as_str)
    }

    /// Remember `title` for the source, returning the title it replaces
    pub fn record(&mut self, source_name: &str, title: &str) -> Option<String> {
        self.titles
            .insert(source_name.to_string(), title.to_string())
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl FromIterator<(String, String)> for HistoryRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            titles: iter.into_iter().collect(),
        }
    }
}
