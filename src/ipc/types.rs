use serde::Deserialize;

use crate::api::RecordsBackend;
use crate::export::Exporter;
use crate::notify::Notifier;
use crate::pages::{LevelsPage, ProgramsPage, StudentsPage};
use crate::shell::ShellState;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Everything the sidecar owns. Each page owns its own lists and dialog
/// state exclusively; the shell state is chrome only and never touches the
/// pages.
pub struct AppState {
    pub backend: Box<dyn RecordsBackend + Send + Sync>,
    pub exporter: Box<dyn Exporter + Send + Sync>,
    pub backend_name: &'static str,
    pub notifier: Notifier,
    pub shell: ShellState,
    pub programs: ProgramsPage,
    pub levels: LevelsPage,
    pub students: StudentsPage,
}

impl AppState {
    pub fn new(
        backend: Box<dyn RecordsBackend + Send + Sync>,
        exporter: Box<dyn Exporter + Send + Sync>,
        backend_name: &'static str,
    ) -> Self {
        Self {
            backend,
            exporter,
            backend_name,
            notifier: Notifier::new(),
            shell: ShellState::new(),
            programs: ProgramsPage::new(),
            levels: LevelsPage::new(),
            students: StudentsPage::new(),
        }
    }
}
