use crate::errors::WatchResult;

/// Retrieves the markup of a listing page
#[cfg_attr(test, mockall::automock)]
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> WatchResult<String>;
}
