pub mod monitor_service;
pub mod notification_service;

pub use monitor_service::{MonitorService, NotifyOutcome, RunReport, SourceStatus};
pub use notification_service::{notify_batch, Delivery, NotificationService, Notifier};
