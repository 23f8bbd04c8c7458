use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::Source;
use crate::errors::{WatchError, WatchResult};

#[derive(Debug, Deserialize)]
struct SourcesFile {
    #[serde(default)]
    sources: Vec<Source>,
}

/// Pages watched when no sources file is configured
pub fn default_sources() -> Vec<Source> {
    vec![Source::new(
        "长沙市人社局",
        "http://rsj.changsha.gov.cn/xxgk/rsxx/sydwzp/",
        "http://rsj.changsha.gov.cn",
        &["ul.news_list li", ".news_list li", ".list li"],
    )]
}

pub fn parse_sources(content: &str) -> WatchResult<Vec<Source>> {
    let file: SourcesFile = toml::from_str(content)?;
    validate_sources(&file.sources)?;
    Ok(file.sources)
}

pub fn load_sources_file<P: AsRef<Path>>(path: P) -> WatchResult<Vec<Source>> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        WatchError::Config(format!(
            "Cannot read sources file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    parse_sources(&content)
}

pub fn validate_sources(sources: &[Source]) -> WatchResult<()> {
    if sources.is_empty() {
        return Err(WatchError::Config("No sources configured".to_string()));
    }

    let mut names = HashSet::new();
    for source in sources {
        source.validate()?;
        if !names.insert(source.name.as_str()) {
            return Err(WatchError::Config(format!(
                "Duplicate source name: {}",
                source.name
            )));
        }
    }

    Ok(())
}
