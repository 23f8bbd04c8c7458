use scraper::Selector;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{WatchError, WatchResult};

/// One monitored page together with the rule for finding its newest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Unique key, also used as the heading of the notification block
    pub name: String,
    /// Listing page to fetch
    pub url: String,
    /// Prefix for root-relative links, e.g. `http://rsj.changsha.gov.cn`
    pub base_url: String,
    /// CSS selectors for a list item, tried in order until one matches
    pub selectors: Vec<String>,
}

impl Source {
    pub fn new(name: &str, url: &str, base_url: &str, selectors: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            base_url: base_url.to_string(),
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check that the source can be fetched and its selectors compile
    pub fn validate(&self) -> WatchResult<()> {
        if self.name.trim().is_empty() {
            return Err(WatchError::Config("Source name must not be empty".to_string()));
        }

        Url::parse(&self.url)
            .map_err(|e| WatchError::InvalidUrl(format!("{} ({}): {}", self.url, self.name, e)))?;
        Url::parse(&self.base_url).map_err(|e| {
            WatchError::InvalidUrl(format!("{} ({}): {}", self.base_url, self.name, e))
        })?;

        if self.selectors.is_empty() {
            return Err(WatchError::Config(format!(
                "Source '{}' has no selectors",
                self.name
            )));
        }

        self.compiled_selectors().map(|_| ())
    }

    pub fn compiled_selectors(&self) -> WatchResult<Vec<Selector>> {
        self.selectors
            .iter()
            .map(|s| Selector::parse(s).map_err(|e| WatchError::selector(s, format!("{e:?}"))))
            .collect()
    }
}
