use crate::domain::HistoryRecord;
use crate::errors::WatchResult;

#[cfg_attr(test, mockall::automock)]
pub trait HistoryStore: Send + Sync {
    /// Missing state is an empty record; unreadable state is an error
    fn load(&self) -> WatchResult<HistoryRecord>;
    /// Replace the stored record with `history`
    fn save(&self, history: &HistoryRecord) -> WatchResult<()>;
}

/// Load history, starting over from an empty record if it cannot be read
pub fn load_or_empty<S: HistoryStore + ?Sized>(store: &S) -> HistoryRecord {
    match store.load() {
        Ok(history) => history,
        Err(e) => {
            log::warn!("Could not read history, starting from scratch: {}", e);
            HistoryRecord::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WatchError;

    #[test]
    fn test_load_error_recovers_to_empty() {
        let mut store = MockHistoryStore::new();
        store
            .expect_load()
            .returning(|| Err(WatchError::Config("corrupt".to_string())));

        assert!(load_or_empty(&store).is_empty());
    }

    #[test]
    fn test_load_ok_passes_through() {
        let mut store = MockHistoryStore::new();
        store.expect_load().returning(|| {
            let mut history = HistoryRecord::new();
            history.record("a", "t");
            Ok(history)
        });

        assert_eq!(load_or_empty(&store).get("a"), Some("t"));
    }
}
