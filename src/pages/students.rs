use crate::api::RecordsBackend;
use crate::export::{ExportFormat, Exporter};
use crate::model::{Level, Program, Student};
use crate::notify::Notifier;
use crate::table::{SortValue, TableState};

/// Read-only students screen: the full list plus three independent filter
/// values. The filtered list is recomputed from scratch on every read; it is
/// never stored.
pub struct StudentsPage {
    pub students: Vec<Student>,
    pub levels: Vec<Level>,
    pub programs: Vec<Program>,
    pub loading: bool,
    pub search: String,
    pub level_id: String,
    pub program_id: String,
    pub table: TableState,
}

impl Default for StudentsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentsPage {
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            levels: Vec::new(),
            programs: Vec::new(),
            loading: true,
            search: String::new(),
            level_id: String::new(),
            program_id: String::new(),
            table: TableState::new(),
        }
    }

    /// Mount: students plus both dropdown reference lists, fetched together.
    /// Partial success applies what resolved; any failure is one error toast.
    pub async fn open(&mut self, backend: &dyn RecordsBackend, notifier: &mut Notifier) {
        self.loading = true;
        let (students, levels, programs) = tokio::join!(
            backend.students_list(),
            backend.levels_list(),
            backend.programs_list()
        );

        let mut failed = false;
        match students {
            Ok(list) => self.students = list,
            Err(e) => {
                eprintln!("supadmind: students list failed: {e}");
                failed = true;
            }
        }
        match levels {
            Ok(list) => self.levels = list,
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

    /// Strict conjunction of the three filters. An empty value means "no
    /// constraint", not "match empty".
    pub fn filtered(&self) -> Vec<Student> {
        let term = self.search.trim().to_lowercase();
        self.students
            .iter()
            .filter(|s| {
                if !term.is_empty() {
                    let hit = s.first_name.to_lowercase().contains(&term)
                        || s.last_name.to_lowercase().contains(&term)
                        || s.email.to_lowercase().contains(&term);
                    if !hit {
                        return false;
                    }
                }
                if !self.level_id.is_empty()
                    && s.level.as_ref().map(|l| l.id.as_str()) != Some(self.level_id.as_str())
                {
                    return false;
                }
                if !self.program_id.is_empty()
                    && s.program.as_ref().map(|p| p.id.as_str()) != Some(self.program_id.as_str())
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect()
    }

    pub fn reset_filters(&mut self) {
        self.search.clear();
        self.level_id.clear();
        self.program_id.clear();
        self.table.page = 0;
    }

    /// Hand the currently filtered rows to the export collaborator. The
    /// toast fires on acceptance; failure is reported like any other remote
    /// failure.
    pub fn export(&self, exporter: &dyn Exporter, format: ExportFormat, notifier: &mut Notifier) {
        let rows = self.filtered();
        match exporter.export(format, &rows) {
            Ok(()) => notifier.info(
                &format!("{} export", format.label()),
                format!("Export of {} students has started", rows.len()),
            ),
            Err(e) => {
                eprintln!("supadmind: export failed: {e}");
                notifier.error("Error", "Could not export the student list");
            }
        }
    }
}

pub fn sort_value(student: &Student, column: &str) -> SortValue {
    match column {
        "firstName" => SortValue::text(&student.first_name),
        "lastName" => SortValue::text(&student.last_name),
        "email" => SortValue::text(&student.email),
        "level" => SortValue::text(
            student
                .level
                .as_ref()
                .map(|l| l.name.as_str())
                .unwrap_or(""),
        ),
        "program" => SortValue::text(
            student
                .program
                .as_ref()
                .map(|p| p.name.as_str())
                .unwrap_or(""),
        ),
        "registrationDate" => SortValue::text(&student.registration_date),
        _ => SortValue::text(""),
    }
}
