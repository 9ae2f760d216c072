use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use super::{ApiError, ApiResult, RecordsBackend};
use crate::model::{
    Level, LevelPayload, LevelRef, Program, ProgramPayload, ProgramRef, ProgramType, Student,
};

/// In-memory backend. Used when no remote API is configured (demo mode) and
/// by the integration tests. Ids are assigned here, never by page logic,
/// mirroring the remote contract.
pub struct FixtureBackend {
    store: Mutex<Store>,
    fail_next: Mutex<HashSet<String>>,
}

struct Store {
    program_types: Vec<ProgramType>,
    programs: Vec<Program>,
    levels: Vec<Level>,
    students: Vec<Student>,
}

fn seed_ts(day: u32) -> String {
    format!("2023-09-{day:02}T00:00:00.000Z")
}

fn now_ts() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn program_type(id: &str, name: &str) -> ProgramType {
    ProgramType {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn seed_program(id: &str, name: &str, acronym: &str, ty: &ProgramType) -> Program {
    Program {
        id: id.to_string(),
        name: name.to_string(),
        acronym: acronym.to_string(),
        program_type: ty.clone(),
        levels: Vec::new(),
        created_at: seed_ts(1),
        updated_at: seed_ts(1),
    }
}

fn seed_level(id: &str, name: &str, acronym: &str, index: i64) -> Level {
    Level {
        id: id.to_string(),
        name: name.to_string(),
        acronym: acronym.to_string(),
        index,
        programs: Vec::new(),
        created_at: seed_ts(1),
        updated_at: seed_ts(1),
    }
}

fn level_ref(id: &str, name: &str, acronym: &str) -> LevelRef {
    LevelRef {
        id: id.to_string(),
        name: name.to_string(),
        acronym: acronym.to_string(),
    }
}

fn program_ref(id: &str, name: &str, acronym: &str) -> ProgramRef {
    ProgramRef {
        id: id.to_string(),
        name: name.to_string(),
        acronym: acronym.to_string(),
    }
}

fn student(
    id: &str,
    first: &str,
    last: &str,
    email: &str,
    level: LevelRef,
    program: ProgramRef,
    day: u32,
) -> Student {
    Student {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        level: Some(level),
        program: Some(program),
        registration_date: seed_ts(day),
    }
}

/// The fixed five-record student list. The student endpoints are not
/// specified in the v2 API, so every backend serves this fixture.
pub fn student_fixture() -> Vec<Student> {
    vec![
        student(
            "1",
            "Jean",
            "Dupont",
            "jean.dupont@example.com",
            level_ref("1", "Licence 1", "L1"),
            program_ref("1", "Informatique", "INFO"),
            1,
        ),
        student(
            "2",
            "Marie",
            "Martin",
            "marie.martin@example.com",
            level_ref("2", "Licence 2", "L2"),
            program_ref("2", "Gestion", "GEST"),
            2,
        ),
        student(
            "3",
            "Pierre",
            "Durand",
            "pierre.durand@example.com",
            level_ref("3", "Licence 3", "L3"),
            program_ref("1", "Informatique", "INFO"),
            3,
        ),
        student(
            "4",
            "Sophie",
            "Leroy",
            "sophie.leroy@example.com",
            level_ref("4", "Master 1", "M1"),
            program_ref("3", "Marketing", "MKT"),
            4,
        ),
        student(
            "5",
            "Thomas",
            "Moreau",
            "thomas.moreau@example.com",
            level_ref("5", "Master 2", "M2"),
            program_ref("2", "Gestion", "GEST"),
            5,
        ),
    ]
}

impl Default for FixtureBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureBackend {
    pub fn new() -> Self {
        let licence = program_type("1", "Licence");
        let master = program_type("2", "Master");
        let doctorat = program_type("3", "Doctorat");

        let store = Store {
            programs: vec![
                seed_program("1", "Informatique", "INFO", &licence),
                seed_program("2", "Gestion", "GEST", &licence),
                seed_program("3", "Marketing", "MKT", &master),
            ],
            program_types: vec![licence, master, doctorat],
            levels: vec![
                seed_level("1", "Licence 1", "L1", 1),
                seed_level("2", "Licence 2", "L2", 2),
                seed_level("3", "Licence 3", "L3", 3),
                seed_level("4", "Master 1", "M1", 4),
                seed_level("5", "Master 2", "M2", 5),
            ],
            students: student_fixture(),
        };

        Self {
            store: Mutex::new(store),
            fail_next: Mutex::new(HashSet::new()),
        }
    }

    /// Make the next call to `op` fail with a 500. Test hook for the error
    /// paths the pages must survive.
    pub fn fail_next(&self, op: &str) {
        self.fail_next
            .lock()
            .expect("fixture fault lock")
            .insert(op.to_string());
    }

    fn take_fault(&self, op: &str) -> ApiResult<()> {
        let mut faults = self.fail_next.lock().expect("fixture fault lock");
        if faults.remove(op) {
            return Err(ApiError::Rejected {
                status: 500,
                message: format!("injected failure for {op}"),
            });
        }
        Ok(())
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut Store) -> ApiResult<T>) -> ApiResult<T> {
        let mut store = self.store.lock().expect("fixture store lock");
        f(&mut store)
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Rejected {
        status: 404,
        message: format!("{what} not found"),
    }
}

fn bad_reference(what: &str) -> ApiError {
    ApiError::Rejected {
        status: 422,
        message: format!("unknown {what}"),
    }
}

fn resolve_programs(store: &Store, ids: &[String]) -> ApiResult<Vec<Program>> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        let p = store
            .programs
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| bad_reference("program id"))?;
        // Embed without the back-reference to keep the shape flat.
        let mut p = p.clone();
        p.levels.clear();
        out.push(p);
    }
    Ok(out)
}

#[async_trait]
impl RecordsBackend for FixtureBackend {
    async fn programs_list(&self) -> ApiResult<Vec<Program>> {
        self.take_fault("programs.list")?;
        self.with_store(|s| Ok(s.programs.clone()))
    }

    async fn program_get(&self, id: &str) -> ApiResult<Program> {
        self.take_fault("programs.get")?;
        self.with_store(|s| {
            s.programs
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| not_found("program"))
        })
    }

    async fn program_create(&self, payload: &ProgramPayload) -> ApiResult<Program> {
        self.take_fault("programs.create")?;
        self.with_store(|s| {
            let ty = s
                .program_types
                .iter()
                .find(|t| t.id == payload.program_type_id)
                .cloned()
                .ok_or_else(|| bad_reference("program type"))?;
            let now = now_ts();
            let created = Program {
                id: Uuid::new_v4().to_string(),
                name: payload.name.clone(),
                acronym: payload.acronym.clone(),
                program_type: ty,
                levels: Vec::new(),
                created_at: now.clone(),
                updated_at: now,
            };
            s.programs.push(created.clone());
            Ok(created)
        })
    }

    async fn program_update(&self, id: &str, payload: &ProgramPayload) -> ApiResult<Program> {
        self.take_fault("programs.update")?;
        self.with_store(|s| {
            let ty = s
                .program_types
                .iter()
                .find(|t| t.id == payload.program_type_id)
                .cloned()
                .ok_or_else(|| bad_reference("program type"))?;
            let slot = s
                .programs
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| not_found("program"))?;
            slot.name = payload.name.clone();
            slot.acronym = payload.acronym.clone();
            slot.program_type = ty;
            slot.updated_at = now_ts();
            Ok(slot.clone())
        })
    }

    async fn program_delete(&self, id: &str) -> ApiResult<()> {
        self.take_fault("programs.delete")?;
        self.with_store(|s| {
            let before = s.programs.len();
            s.programs.retain(|p| p.id != id);
            if s.programs.len() == before {
                return Err(not_found("program"));
            }
            Ok(())
        })
    }

    async fn program_types_list(&self) -> ApiResult<Vec<ProgramType>> {
        self.take_fault("programTypes.list")?;
        self.with_store(|s| Ok(s.program_types.clone()))
    }

    async fn levels_list(&self) -> ApiResult<Vec<Level>> {
        self.take_fault("levels.list")?;
        self.with_store(|s| Ok(s.levels.clone()))
    }

    async fn level_get(&self, id: &str) -> ApiResult<Level> {
        self.take_fault("levels.get")?;
        self.with_store(|s| {
            s.levels
                .iter()
                .find(|l| l.id == id)
                .cloned()
                .ok_or_else(|| not_found("level"))
        })
    }

    async fn level_create(&self, payload: &LevelPayload) -> ApiResult<Level> {
        self.take_fault("levels.create")?;
        self.with_store(|s| {
            let programs = resolve_programs(s, &payload.program_ids)?;
            let now = now_ts();
            let created = Level {
                id: Uuid::new_v4().to_string(),
                name: payload.name.clone(),
                acronym: payload.acronym.clone(),
                index: payload.index,
                programs,
                created_at: now.clone(),
                updated_at: now,
            };
            s.levels.push(created.clone());
            Ok(created)
        })
    }

    async fn level_update(&self, id: &str, payload: &LevelPayload) -> ApiResult<Level> {
        self.take_fault("levels.update")?;
        self.with_store(|s| {
            let programs = resolve_programs(s, &payload.program_ids)?;
            let slot = s
                .levels
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or_else(|| not_found("level"))?;
            slot.name = payload.name.clone();
            slot.acronym = payload.acronym.clone();
            slot.index = payload.index;
            slot.programs = programs;
            slot.updated_at = now_ts();
            Ok(slot.clone())
        })
    }

    async fn level_delete(&self, id: &str) -> ApiResult<()> {
        self.take_fault("levels.delete")?;
        self.with_store(|s| {
            let before = s.levels.len();
            s.levels.retain(|l| l.id != id);
            if s.levels.len() == before {
                return Err(not_found("level"));
            }
            Ok(())
        })
    }

    async fn students_list(&self) -> ApiResult<Vec<Student>> {
        self.take_fault("students.list")?;
        self.with_store(|s| Ok(s.students.clone()))
    }
}
