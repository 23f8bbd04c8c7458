pub mod sources;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::Source;
use crate::errors::{WatchError, WatchResult};
use crate::sources::RetryPolicy;

pub use sources::{default_sources, load_sources_file, parse_sources, validate_sources};

#[derive(Debug, Clone)]
pub struct Config {
    /// ServerChan send key; `None` turns notifications into log lines
    pub send_key: Option<String>,
    pub push_endpoint: String,
    pub history_path: String,
    pub sources: Vec<Source>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub verify_tls: bool,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> WatchResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok(), exe_dir)
    }

    /// Build the configuration from any variable lookup
    pub fn from_lookup<F>(lookup: F, exe_dir: Option<PathBuf>) -> WatchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let send_key = var("SCKEY").map(|k| k.trim().to_string());

        let push_endpoint =
            var("SERVERCHAN_URL").unwrap_or_else(|| serverchan::DEFAULT_ENDPOINT.to_string());

        // Default history_path is relative to executable directory
        let history_path = var("JOBWATCH_HISTORY_PATH").unwrap_or_else(|| {
            exe_dir
                .map(|d| d.join("history.json").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./history.json".to_string())
        });

        let sources = match var("JOBWATCH_SOURCES") {
            Some(path) => load_sources_file(path)?,
            None => default_sources(),
        };

        let timeout_secs = parse_number("JOBWATCH_TIMEOUT_SECS", var("JOBWATCH_TIMEOUT_SECS"), 20)?;
        let attempts: u32 = parse_number("JOBWATCH_RETRIES", var("JOBWATCH_RETRIES"), 3)?;
        let delay_secs =
            parse_number("JOBWATCH_RETRY_DELAY_SECS", var("JOBWATCH_RETRY_DELAY_SECS"), 10)?;
        let verify_tls = parse_flag("JOBWATCH_VERIFY_TLS", var("JOBWATCH_VERIFY_TLS"), false)?;

        if attempts == 0 {
            return Err(WatchError::InvalidEnvVar {
                name: "JOBWATCH_RETRIES".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(Self {
            send_key,
            push_endpoint,
            history_path,
            sources,
            timeout: Duration::from_secs(timeout_secs),
            retry: RetryPolicy::new(attempts, Duration::from_secs(delay_secs)),
            verify_tls,
        })
    }
}

fn parse_number<T: FromStr>(name: &str, value: Option<String>, default: T) -> WatchResult<T> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| WatchError::InvalidEnvVar {
            name: name.to_string(),
            value: v,
        }),
    }
}

fn parse_flag(name: &str, value: Option<String>, default: bool) -> WatchResult<bool> {
    let Some(v) = value else {
        return Ok(default);
    };

    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(WatchError::InvalidEnvVar {
            name: name.to_string(),
            value: v,
        }),
    }
}
