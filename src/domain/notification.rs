use super::Announcement;

/// A source whose newest announcement changed during this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub source_name: String,
    pub announcement: Announcement,
}

impl Update {
    pub fn new(source_name: &str, announcement: Announcement) -> Self {
        Self {
            source_name: source_name.to_string(),
            announcement,
        }
    }

    /// Markdown block: heading, title line, link line
    pub fn format(&self) -> String {
        format!(
            "### {}\n\n最新公告：{}\n\n[点击查看详情]({})",
            self.source_name, self.announcement.title, self.announcement.link
        )
    }
}

/// Updates collected over one run, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateBatch {
    updates: Vec<Update>,
}

impl UpdateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, update: Update) {
        self.updates.push(update);
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn entries(&self) -> Vec<String> {
        self.updates.iter().map(Update::format).collect()
    }
}

/// One push message covering a whole batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn from_batch(batch: &UpdateBatch) -> Self {
        Self {
            title: format!("招聘公告更新（{}）", batch.len()),
            body: batch.entries().join("\n\n"),
        }
    }

    /// Plain console rendering, used by dry runs
    pub fn format(&self) -> String {
        format!("{}\n\n{}", self.title, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(name: &str, title: &str, link: &str) -> Update {
        Update::new(name, Announcement::new(title.to_string(), link.to_string()))
    }

    #[test]
    fn test_update_format() {
        let formatted = update("长沙市人社局", "2024年事业单位招聘公告", "http://x.gov.cn/a.html").format();
        assert_eq!(
            formatted,
            "### 长沙市人社局\n\n最新公告：2024年事业单位招聘公告\n\n[点击查看详情](http://x.gov.cn/a.html)"
        );
    }

    #[test]
    fn test_notification_from_batch_keeps_order() {
        let mut batch = UpdateBatch::new();
        batch.push(update("A", "first", "http://a.gov.cn/1"));
        batch.push(update("B", "second", "http://b.gov.cn/2"));

        let notification = Notification::from_batch(&batch);

        assert_eq!(notification.title, "招聘公告更新（2）");
        let a = notification.body.find("### A").unwrap();
        let b = notification.body.find("### B").unwrap();
        assert!(a < b);
        assert!(notification.body.contains("\n\n### B"));
    }

    #[test]
    fn test_empty_batch() {
        let batch = UpdateBatch::new();
        assert!(batch.is_empty());
        assert!(batch.entries().is_empty());
    }
}
