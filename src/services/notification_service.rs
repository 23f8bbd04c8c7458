use serverchan::PushClient;

use crate::config::Config;
use crate::domain::{Notification, UpdateBatch};
use crate::errors::WatchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Nothing was sent: no send key, or nothing to report
    Skipped,
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn send(&self, notification: &Notification) -> WatchResult<Delivery>;
}

pub struct NotificationService {
    client: Option<PushClient>,
}

impl NotificationService {
    pub fn new(config: &Config) -> WatchResult<Self> {
        let client = match &config.send_key {
            Some(key) => Some(PushClient::new(&config.push_endpoint, key, config.timeout)?),
            None => None,
        };

        Ok(Self { client })
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

impl Notifier for NotificationService {
    fn send(&self, notification: &Notification) -> WatchResult<Delivery> {
        let Some(client) = &self.client else {
            log::warn!("SCKEY is not set, skipping notification: {}", notification.title);
            return Ok(Delivery::Skipped);
        };

        let response = client.send(&notification.title, &notification.body)?;
        log::debug!("Push accepted: {}", response.data);
        Ok(Delivery::Sent)
    }
}

/// Send the whole batch as one message; an empty batch sends nothing
pub fn notify_batch<N: Notifier + ?Sized>(
    notifier: &N,
    batch: &UpdateBatch,
) -> WatchResult<Delivery> {
    if batch.is_empty() {
        log::info!("No updates, nothing to notify");
        return Ok(Delivery::Skipped);
    }

    notifier.send(&Notification::from_batch(batch))
}
