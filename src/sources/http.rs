use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::errors::{WatchError, WatchResult};
use crate::sources::traits::PageFetcher;

const USER_AGENT: &str = concat!("jobwatch/", env!("CARGO_PKG_VERSION"));

/// Fixed-delay retry for transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Run `op` until it succeeds, fails with a non-transport error, or the
    /// attempts are used up. The attempt number (from 1) is passed in.
    pub fn run<T, F>(&self, label: &str, mut op: F) -> WatchResult<T>
    where
        F: FnMut(u32) -> WatchResult<T>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transport() && attempt < attempts => {
                    log::warn!(
                        "{}: attempt {}/{} failed: {}; retrying in {}s",
                        label,
                        attempt,
                        attempts,
                        e,
                        self.delay.as_secs()
                    );
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

pub struct HttpFetcher {
    client: Client,
    retry: RetryPolicy,
}

impl HttpFetcher {
    /// `verify_tls = false` accepts any certificate; several government
    /// sites serve expired or self-signed chains.
    pub fn new(timeout: Duration, verify_tls: bool, retry: RetryPolicy) -> WatchResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;

        Ok(Self { client, retry })
    }

    fn fetch_once(&self, url: &str) -> WatchResult<String> {
        let response = self.client.get(url).send()?;

        if response.status() != StatusCode::OK {
            return Err(WatchError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        // Pages are UTF-8 whatever the headers claim
        let bytes = response.bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> WatchResult<String> {
        self.retry.run(url, |attempt| {
            log::debug!("GET {} (attempt {})", url, attempt);
            self.fetch_once(url)
        })
    }
}
