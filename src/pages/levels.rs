use crate::api::RecordsBackend;
use crate::draft::LevelDraft;
use crate::model::{Level, Program};
use crate::notify::Notifier;
use crate::table::{SortValue, TableState};

/// Orchestration state for the levels screen. Mirrors the programs page,
/// with the program list as the auxiliary reference data: the dialog lets
/// the user toggle which programs a level belongs to. The association is
/// only ever edited from this side.
pub struct LevelsPage {
    pub items: Vec<Level>,
    pub programs: Vec<Program>,
    pub loading: bool,
    pub dialog_open: bool,
    pub current: Option<Level>,
    pub draft: LevelDraft,
    pub table: TableState,
}

impl Default for LevelsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelsPage {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            programs: Vec::new(),
            loading: true,
            dialog_open: false,
            current: None,
            draft: LevelDraft::default(),
            table: TableState::new(),
        }
    }

    pub async fn open(&mut self, backend: &dyn RecordsBackend, notifier: &mut Notifier) {
        self.loading = true;
        let (levels, programs) = tokio::join!(backend.levels_list(), backend.programs_list());

        let mut failed = false;
        match levels {
            Ok(list) => self.items = list,
            Err(e) => {
                eprintln!("supadmind: levels list failed: {e}");
                failed = true;
            }
        }
        match programs {
            Ok(list) => self.programs = list,
            Err(e) => {
                eprintln!("supadmind: programs list failed: {e}");
                failed = true;
            }
        }
        if failed {
            notifier.error("Error", "Could not load data");
        }
        self.loading = false;
    }

    pub fn begin_create(&mut self) {
        self.current = None;
        self.draft = LevelDraft::default();
        self.dialog_open = true;
    }

    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(level) = self.items.iter().find(|l| l.id == id).cloned() else {
            return false;
        };
        self.draft = LevelDraft::from_level(&level);
        self.current = Some(level);
        self.dialog_open = true;
        true
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.current = None;
    }

    /// Toggle one program in the draft's association set. The id must name a
    /// program from the reference list.
    pub fn toggle_program(&mut self, program_id: &str) -> bool {
        let Some(program) = self.programs.iter().find(|p| p.id == program_id).cloned() else {
            return false;
        };
        self.draft.toggle_program(&program);
        true
    }

    pub async fn submit(&mut self, backend: &dyn RecordsBackend, notifier: &mut Notifier) -> bool {
        let payload = match self.draft.payload() {
            Ok(p) => p,
            Err(msg) => {
                notifier.error("Error", msg);
                return false;
            }
        };

        let outcome = match &self.current {
            Some(current) => backend
                .level_update(&current.id, &payload)
                .await
                .map(|updated| {
                    if let Some(slot) = self.items.iter_mut().find(|l| l.id == updated.id) {
                        *slot = updated;
                    }
                    "Level updated"
                }),
            None => backend.level_create(&payload).await.map(|created| {
                self.items.push(created);
                "Level created"
            }),
        };

        match outcome {
            Ok(message) => {
                notifier.success("Success", message);
                self.close_dialog();
                true
            }
            Err(e) => {
                eprintln!("supadmind: level save failed: {e}");
                notifier.error("Error", "Could not save the level");
                false
            }
        }
    }

    pub async fn confirm_delete(
        &mut self,
        backend: &dyn RecordsBackend,
        notifier: &mut Notifier,
    ) -> Option<String> {
        let id = self.table.take_staged()?;
        match backend.level_delete(&id).await {
            Ok(()) => {
                self.items.retain(|l| l.id != id);
                notifier.success("Success", "Level deleted");
                Some(id)
            }
            Err(e) => {
                eprintln!("supadmind: level delete failed: {e}");
                notifier.error("Error", "Could not delete the level");
                None
            }
        }
    }
}

pub fn sort_value(level: &Level, column: &str) -> SortValue {
    match column {
        "name" => SortValue::text(&level.name),
        "acronym" => SortValue::text(&level.acronym),
        "index" => SortValue::number(level.index),
        "createdAt" => SortValue::text(&level.created_at),
        "updatedAt" => SortValue::text(&level.updated_at),
        _ => SortValue::text(""),
    }
}
