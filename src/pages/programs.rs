use crate::api::RecordsBackend;
use crate::draft::ProgramDraft;
use crate::model::{Program, ProgramType};
use crate::notify::Notifier;
use crate::table::{SortValue, TableState};

/// Orchestration state for the programs screen: the authoritative in-memory
/// list, the program-type reference data the dialog needs, and the dialog
/// and table state. The list only ever reflects the last successful server
/// response; nothing is written to it speculatively.
pub struct ProgramsPage {
    pub items: Vec<Program>,
    pub program_types: Vec<ProgramType>,
    pub loading: bool,
    pub dialog_open: bool,
    pub current: Option<Program>,
    pub draft: ProgramDraft,
    pub table: TableState,
}

impl Default for ProgramsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramsPage {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            program_types: Vec::new(),
            loading: true,
            dialog_open: false,
            current: None,
            draft: ProgramDraft::default(),
            table: TableState::new(),
        }
    }

    /// Mount: fetch the list and the type reference data together. Whichever
    /// half resolves is applied even if the other fails; a failure of either
    /// (or both) emits exactly one error toast.
    pub async fn open(&mut self, backend: &dyn RecordsBackend, notifier: &mut Notifier) {
        self.loading = true;
        let (programs, types) = tokio::join!(backend.programs_list(), backend.program_types_list());

        let mut failed = false;
        match programs {
            Ok(list) => self.items = list,
            Err(e) => {
                eprintln!("supadmind: programs list failed: {e}");
                failed = true;
            }
        }
        match types {
            Ok(list) => self.program_types = list,
            Err(e) => {
                eprintln!("supadmind: program types failed: {e}");
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
        self.draft = ProgramDraft::default();
        self.dialog_open = true;
    }

    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(program) = self.items.iter().find(|p| p.id == id).cloned() else {
            return false;
        };
        self.draft = ProgramDraft::from_program(&program);
        self.current = Some(program);
        self.dialog_open = true;
        true
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.current = None;
    }

    /// Persist the draft: update-and-replace when editing, create-and-append
    /// otherwise. The dialog closes only on success. Returns whether the
    /// save went through.
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
                .program_update(&current.id, &payload)
                .await
                .map(|updated| {
                    if let Some(slot) = self.items.iter_mut().find(|p| p.id == updated.id) {
                        *slot = updated;
                    }
                    "Program updated"
                }),
            None => backend.program_create(&payload).await.map(|created| {
                self.items.push(created);
                "Program created"
            }),
        };

        match outcome {
            Ok(message) => {
                notifier.success("Success", message);
                self.close_dialog();
                true
            }
            Err(e) => {
                eprintln!("supadmind: program save failed: {e}");
                notifier.error("Error", "Could not save the program");
                false
            }
        }
    }

    /// Delete the staged id, if any. The list entry goes away only after the
    /// remote call succeeds.
    pub async fn confirm_delete(
        &mut self,
        backend: &dyn RecordsBackend,
        notifier: &mut Notifier,
    ) -> Option<String> {
        let id = self.table.take_staged()?;
        match backend.program_delete(&id).await {
            Ok(()) => {
                self.items.retain(|p| p.id != id);
                notifier.success("Success", "Program deleted");
                Some(id)
            }
            Err(e) => {
                eprintln!("supadmind: program delete failed: {e}");
                notifier.error("Error", "Could not delete the program");
                None
            }
        }
    }
}

/// Column values for the programs table. Unknown columns sort as empty text,
/// which keeps the original order under a stable sort.
pub fn sort_value(program: &Program, column: &str) -> SortValue {
    match column {
        "name" => SortValue::text(&program.name),
        "acronym" => SortValue::text(&program.acronym),
        "type" => SortValue::text(&program.program_type.name),
        "createdAt" => SortValue::text(&program.created_at),
        "updatedAt" => SortValue::text(&program.updated_at),
        _ => SortValue::text(""),
    }
}
