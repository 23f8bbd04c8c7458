use std::fmt;

use crate::domain::{Announcement, Change, HistoryRecord, Notification, Source, Update, UpdateBatch};
use crate::errors::{WatchError, WatchResult};
use crate::services::notification_service::{notify_batch, Delivery, Notifier};
use crate::sources::{extract_first, PageFetcher};
use crate::storage::{load_or_empty, HistoryStore};

/// What happened to one source during a run
#[derive(Debug)]
pub enum SourceStatus {
    Updated {
        announcement: Announcement,
        change: Change,
    },
    Unchanged {
        title: String,
    },
    /// Page fetched but no announcement could be extracted
    NotFound,
    Failed(WatchError),
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceStatus::Updated {
                announcement,
                change: Change::New,
            } => write!(f, "found (first run): {}", announcement.title),
            SourceStatus::Updated { announcement, .. } => {
                write!(f, "found update: {}", announcement.title)
            }
            SourceStatus::Unchanged { title } => write!(f, "no change ({})", title),
            SourceStatus::NotFound => write!(f, "no announcement found"),
            SourceStatus::Failed(e) => write!(f, "error: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum NotifyOutcome {
    NothingToSend,
    DryRun(Notification),
    Delivered(Delivery),
    /// Delivery failed; history was still saved
    Failed(WatchError),
}

#[derive(Debug)]
pub struct RunReport {
    /// `(source name, status)` in configured order
    pub statuses: Vec<(String, SourceStatus)>,
    pub batch: UpdateBatch,
    pub notify: NotifyOutcome,
    pub history_saved: bool,
}

impl RunReport {
    pub fn failures(&self) -> usize {
        self.statuses
            .iter()
            .filter(|(_, s)| matches!(s, SourceStatus::Failed(_)))
            .count()
    }
}

pub struct MonitorService<F: PageFetcher, N: Notifier, S: HistoryStore> {
    sources: Vec<Source>,
    fetcher: F,
    notifier: N,
    store: S,
}

impl<F: PageFetcher, N: Notifier, S: HistoryStore> MonitorService<F, N, S> {
    pub fn new(sources: Vec<Source>, fetcher: F, notifier: N, store: S) -> Self {
        Self {
            sources,
            fetcher,
            notifier,
            store,
        }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Fetch one source and compare its newest title with `history`
    pub fn check_source(&self, source: &Source, history: &HistoryRecord) -> SourceStatus {
        let html = match self.fetcher.fetch(&source.url) {
            Ok(html) => html,
            Err(e) => return SourceStatus::Failed(e),
        };

        let announcement = match extract_first(&html, source) {
            Ok(Some(announcement)) => announcement,
            Ok(None) => return SourceStatus::NotFound,
            Err(e) => return SourceStatus::Failed(e),
        };

        let change = Change::detect(history, &source.name, &announcement.title);
        if change.is_update() {
            SourceStatus::Updated {
                announcement,
                change,
            }
        } else {
            SourceStatus::Unchanged {
                title: announcement.title,
            }
        }
    }

    /// One pass over every source.
    ///
    /// `on_status` is called as each source finishes so callers can report
    /// progress while slow sources retry. History is written only when at
    /// least one source changed, and regardless of whether the push went
    /// through. A dry run neither pushes nor writes.
    pub fn run<P>(&self, dry_run: bool, mut on_status: P) -> WatchResult<RunReport>
    where
        P: FnMut(&Source, &SourceStatus),
    {
        let mut history = load_or_empty(&self.store);
        let mut batch = UpdateBatch::new();
        let mut statuses = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let status = self.check_source(source, &history);
            on_status(source, &status);

            if let SourceStatus::Updated { announcement, .. } = &status {
                history.record(&source.name, &announcement.title);
                batch.push(Update::new(&source.name, announcement.clone()));
            }

            statuses.push((source.name.clone(), status));
        }

        if batch.is_empty() {
            return Ok(RunReport {
                statuses,
                batch,
                notify: NotifyOutcome::NothingToSend,
                history_saved: false,
            });
        }

        if dry_run {
            return Ok(RunReport {
                statuses,
                notify: NotifyOutcome::DryRun(Notification::from_batch(&batch)),
                batch,
                history_saved: false,
            });
        }

        let notify = match notify_batch(&self.notifier, &batch) {
            Ok(delivery) => NotifyOutcome::Delivered(delivery),
            Err(e) => {
                log::error!("Notification failed: {}", e);
                NotifyOutcome::Failed(e)
            }
        };

        self.store.save(&history)?;

        Ok(RunReport {
            statuses,
            batch,
            notify,
            history_saved: true,
        })
    }
}
