use super::HistoryRecord;

/// Result of comparing a freshly extracted title with the stored one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Source absent from history; the first observation sets the baseline
    New,
    /// Stored title differs from the current one
    Changed { previous: String },
    Unchanged,
}

impl Change {
    /// Compare byte-for-byte; case and whitespace differences count
    pub fn detect(history: &HistoryRecord, source_name: &str, title: &str) -> Self {
        match history.get(source_name) {
            None => Change::New,
            Some(stored) if stored != title => Change::Changed {
                previous: stored.to_string(),
            },
            Some(_) => Change::Unchanged,
        }
    }

    pub fn is_update(&self) -> bool {
        !matches!(self, Change::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> HistoryRecord {
        let mut history = HistoryRecord::new();
        history.record("known", "2024年事业单位招聘公告");
        history
    }

    #[test]
    fn test_unknown_source_is_update() {
        let change = Change::detect(&history(), "unknown", "anything");
        assert_eq!(change, Change::New);
        assert!(change.is_update());
    }

    #[test]
    fn test_same_title_is_not_update() {
        let change = Change::detect(&history(), "known", "2024年事业单位招聘公告");
        assert_eq!(change, Change::Unchanged);
        assert!(!change.is_update());
    }

    #[test]
    fn test_different_title_is_update() {
        let change = Change::detect(&history(), "known", "2025年事业单位招聘公告");
        assert_eq!(
            change,
            Change::Changed {
                previous: "2024年事业单位招聘公告".to_string()
            }
        );
        assert!(change.is_update());
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let mut history = HistoryRecord::new();
        history.record("s", "Notice");
        assert!(Change::detect(&history, "s", "notice").is_update());
        assert!(Change::detect(&history, "s", "Notice ").is_update());
    }
}
