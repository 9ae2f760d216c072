use serde::Serialize;

use crate::model::{Level, LevelPayload, Program, ProgramPayload};

/// Local, unsaved copy of a program's editable fields. Rebuilt on every
/// dialog open so nothing leaks from a previous edit session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDraft {
    pub name: String,
    pub acronym: String,
    pub program_type_id: String,
}

impl ProgramDraft {
    pub fn from_program(program: &Program) -> Self {
        Self {
            name: program.name.clone(),
            acronym: program.acronym.clone(),
            program_type_id: program.program_type.id.clone(),
        }
    }

    /// Project into the save shape, or say which required field is missing.
    pub fn payload(&self) -> Result<ProgramPayload, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name is required".to_string());
        }
        let acronym = self.acronym.trim();
        if acronym.is_empty() {
            return Err("acronym is required".to_string());
        }
        if self.program_type_id.is_empty() {
            return Err("program type is required".to_string());
        }
        Ok(ProgramPayload {
            name: name.to_string(),
            acronym: acronym.to_string(),
            program_type_id: self.program_type_id.clone(),
        })
    }
}

/// Local, unsaved copy of a level's editable fields, including the set of
/// associated programs (edited only from this side).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDraft {
    pub name: String,
    pub acronym: String,
    pub index: i64,
    pub programs: Vec<Program>,
}

impl LevelDraft {
    pub fn from_level(level: &Level) -> Self {
        Self {
            name: level.name.clone(),
            acronym: level.acronym.clone(),
            index: level.index,
            programs: level.programs.clone(),
        }
    }

    /// Set-symmetric membership toggle: present removes, absent appends.
    pub fn toggle_program(&mut self, program: &Program) {
        if self.programs.iter().any(|p| p.id == program.id) {
            self.programs.retain(|p| p.id != program.id);
        } else {
            self.programs.push(program.clone());
        }
    }

    /// Project into the save shape; the association flattens to bare ids.
    pub fn payload(&self) -> Result<LevelPayload, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name is required".to_string());
        }
        let acronym = self.acronym.trim();
        if acronym.is_empty() {
            return Err("acronym is required".to_string());
        }
        Ok(LevelPayload {
            name: name.to_string(),
            acronym: acronym.to_string(),
            index: self.index,
            program_ids: self.programs.iter().map(|p| p.id.clone()).collect(),
        })
    }
}
