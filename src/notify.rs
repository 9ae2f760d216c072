use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// One toast for the shell to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// Ordered queue of pending toasts. Pages push, the shell drains.
#[derive(Debug, Default)]
pub struct Notifier {
    queue: Vec<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, title: &str, description: impl Into<String>) {
        self.push(title, description, Severity::Success);
    }

    pub fn error(&mut self, title: &str, description: impl Into<String>) {
        self.push(title, description, Severity::Error);
    }

    pub fn info(&mut self, title: &str, description: impl Into<String>) {
        self.push(title, description, Severity::Info);
    }

    fn push(&mut self, title: &str, description: impl Into<String>, severity: Severity) {
        self.queue.push(Notice {
            title: title.to_string(),
            description: description.into(),
            severity,
        });
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.queue)
    }

    pub fn pending(&self) -> &[Notice] {
        &self.queue
    }
}
