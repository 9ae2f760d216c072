pub mod fixture;
pub mod remote;

use async_trait::async_trait;

use crate::model::{Level, LevelPayload, Program, ProgramPayload, ProgramType, Student};

pub use fixture::FixtureBackend;
pub use remote::RemoteBackend;

/// Failure of a single backend call. There is no retry or caching layer on
/// top of this; every call is one request, and every failure surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No usable response at all (DNS, connect, TLS, body read).
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status. `message` is the server's
    /// error body when it sent one, else the status line.
    #[error("rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote operations per entity type. Students are a degenerate resource:
/// list-only, served from a fixed fixture (the v2 API has no student
/// endpoints yet).
#[async_trait]
pub trait RecordsBackend {
    async fn programs_list(&self) -> ApiResult<Vec<Program>>;
    async fn program_get(&self, id: &str) -> ApiResult<Program>;
    async fn program_create(&self, payload: &ProgramPayload) -> ApiResult<Program>;
    async fn program_update(&self, id: &str, payload: &ProgramPayload) -> ApiResult<Program>;
    async fn program_delete(&self, id: &str) -> ApiResult<()>;

    async fn program_types_list(&self) -> ApiResult<Vec<ProgramType>>;

    async fn levels_list(&self) -> ApiResult<Vec<Level>>;
    async fn level_get(&self, id: &str) -> ApiResult<Level>;
    async fn level_create(&self, payload: &LevelPayload) -> ApiResult<Level>;
    async fn level_update(&self, id: &str, payload: &LevelPayload) -> ApiResult<Level>;
    async fn level_delete(&self, id: &str) -> ApiResult<()>;

    async fn students_list(&self) -> ApiResult<Vec<Student>>;
}
