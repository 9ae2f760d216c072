use serde::{Deserialize, Serialize};

/// Academic course of study. The backend embeds the full type record and,
/// depending on the endpoint, the associated levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub name: String,
    pub acronym: String,
    // The v2 API calls this field `type`; everywhere else in this codebase
    // the relation is `program_type`.
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<Level>,
    pub created_at: String,
    pub updated_at: String,
}

/// Read-only classification of programs. Fetched for the program dialog's
/// type selector, never mutated from this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramType {
    pub id: String,
    pub name: String,
}

/// Academic year/stage. `index` orders levels within a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: String,
    pub name: String,
    pub acronym: String,
    pub index: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub programs: Vec<Program>,
    pub created_at: String,
    pub updated_at: String,
}

/// Read-only enrollment record. The level/program references are the slim
/// shapes the student endpoint returns, not full entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub level: Option<LevelRef>,
    #[serde(default)]
    pub program: Option<ProgramRef>,
    pub registration_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRef {
    pub id: String,
    pub name: String,
    pub acronym: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRef {
    pub id: String,
    pub name: String,
    pub acronym: String,
}

/// Save shape for program create/update. Associations travel as bare ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramPayload {
    pub name: String,
    pub acronym: String,
    pub program_type_id: String,
}

/// Save shape for level create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelPayload {
    pub name: String,
    pub acronym: String,
    pub index: i64,
    pub program_ids: Vec<String>,
}
